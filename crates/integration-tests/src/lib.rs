//! Shared fixtures for the end-to-end scenarios in `tests/`.
//!
//! The harness wires the real adapters — an in-memory SQLite database and a
//! tempdir-backed artifact store — to the registries, with a manual clock so
//! scenarios can step through throttle windows and lease expiries.

use chrono::Utc;
use configs::ServerSettings;
use domains::error::ArtifactError;
use domains::models::{SpeciesSubmission, VersionPolicy};
use domains::traits::ArtifactStore;
use services::{
    ContentFilter, ManualClock, PeerRegistry, RateLimiter, SpeciesRegistry, SubmissionPolicy,
    VersionGate,
};
use std::sync::Arc;
use storage_adapters::{LocalArtifactStore, SqliteMetadataStore};
use tempfile::TempDir;

pub struct Harness {
    pub db: Arc<SqliteMetadataStore>,
    pub clock: Arc<ManualClock>,
    pub species: SpeciesRegistry,
    pub peers: PeerRegistry,
    _artifact_dir: TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        Self::build(ContentFilter::disabled(), None).await
    }

    pub async fn with_filter(filter: ContentFilter) -> Self {
        Self::build(filter, None).await
    }

    /// Harness whose artifact saves always fail, for driving compensation.
    pub async fn with_failing_artifacts() -> Self {
        Self::build(ContentFilter::disabled(), Some(Arc::new(FailingArtifactStore))).await
    }

    async fn build(filter: ContentFilter, artifacts: Option<Arc<dyn ArtifactStore>>) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let settings = ServerSettings::load().expect("default settings");
        let db = Arc::new(
            SqliteMetadataStore::new("sqlite::memory:")
                .await
                .expect("in-memory database"),
        );
        let artifact_dir = TempDir::new().expect("artifact tempdir");
        let artifacts = artifacts
            .unwrap_or_else(|| Arc::new(LocalArtifactStore::new(artifact_dir.path())));

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let throttle = Arc::new(RateLimiter::new(clock.clone()));
        let gate = VersionGate::new(db.clone());

        let species = SpeciesRegistry::new(
            db.clone(),
            artifacts,
            throttle,
            Arc::new(filter),
            gate.clone(),
            clock.clone(),
            SubmissionPolicy {
                introduction_wait_minutes: settings.introduction_wait_minutes,
                introduction_daily_limit: settings.introduction_daily_limit,
                recent_species_days: settings.recent_species_days,
            },
        );
        let peers = PeerRegistry::new(db.clone(), gate, clock.clone(), settings.peer_lease_minutes);

        Self {
            db,
            clock,
            species,
            peers,
            _artifact_dir: artifact_dir,
        }
    }

    /// Writes an enabled policy record so the gate opens for `version`.
    pub async fn enable_version(&self, version: &str) {
        self.db
            .set_version_policy(&VersionPolicy {
                version: version.to_string(),
                disabled: false,
                message: String::new(),
            })
            .await
            .expect("policy write");
    }

    /// Writes a disabled policy record for `version`.
    pub async fn disable_version(&self, version: &str, message: &str) {
        self.db
            .set_version_policy(&VersionPolicy {
                version: version.to_string(),
                disabled: true,
                message: message.to_string(),
            })
            .await
            .expect("policy write");
    }
}

pub fn submission(name: &str, version: &str) -> SpeciesSubmission {
    SpeciesSubmission {
        name: name.to_string(),
        version: version.to_string(),
        species_type: "Carnivore".to_string(),
        author: "Ada".to_string(),
        author_email: "ada@example.org".to_string(),
        assembly_full_name: format!("{}, Version={}", name, version),
        assembly: format!("{} organism bytes", name).into_bytes(),
    }
}

/// Artifact store whose saves always fail.
pub struct FailingArtifactStore;

#[async_trait::async_trait]
impl ArtifactStore for FailingArtifactStore {
    async fn save(&self, _: &[u8], _: &str, _: &str) -> Result<(), ArtifactError> {
        Err(ArtifactError::Io("injected failure".into()))
    }

    async fn load(&self, _: &str, _: &str) -> Result<Vec<u8>, ArtifactError> {
        Err(ArtifactError::NotFound)
    }

    async fn delete(&self, _: &str, _: &str) -> Result<(), ArtifactError> {
        Ok(())
    }
}
