//! Species registry: the submission pipeline and the extinction /
//! reintroduction lifecycle.
//!
//! A submission runs validate → throttle → moderation → metadata insert →
//! grant registration → artifact save. The metadata row and the artifact
//! blob are created together or not at all: a failed artifact save deletes
//! the row it was paired with before the failure is reported.

use chrono::{DateTime, Duration, Utc};
use domains::error::{
    ArtifactError, ModeratedField, RegistryError, ReintroduceError, StoreError,
    SubmissionOutcome, ThrottleWindow,
};
use domains::models::{Species, SpeciesSubmission};
use domains::traits::{ArtifactStore, Clock, SpeciesStore};
use domains::version;
use std::sync::Arc;
use uuid::Uuid;

use crate::throttle::RateLimiter;
use crate::version_gate::VersionGate;
use crate::wordfilter::ContentFilter;

const WAIT_POLICY: &str = "species-submit-wait";
const DAILY_POLICY: &str = "species-submit-daily";

/// Filter value that selects the full species set; anything else selects a
/// recency-bounded subset.
const FILTER_ALL: &str = "All";

/// Tunables for the submission pipeline.
#[derive(Debug, Clone)]
pub struct SubmissionPolicy {
    /// Minutes a submitter waits between uploads.
    pub introduction_wait_minutes: i64,
    /// Uploads allowed per submitter per 24 hours.
    pub introduction_daily_limit: u32,
    /// Window, in days, for non-"All" listing queries.
    pub recent_species_days: i64,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            introduction_wait_minutes: 5,
            introduction_daily_limit: 30,
            recent_species_days: 30,
        }
    }
}

pub struct SpeciesRegistry {
    store: Arc<dyn SpeciesStore>,
    artifacts: Arc<dyn ArtifactStore>,
    throttle: Arc<RateLimiter>,
    filter: Arc<ContentFilter>,
    gate: VersionGate,
    clock: Arc<dyn Clock>,
    policy: SubmissionPolicy,
}

impl SpeciesRegistry {
    pub fn new(
        store: Arc<dyn SpeciesStore>,
        artifacts: Arc<dyn ArtifactStore>,
        throttle: Arc<RateLimiter>,
        filter: Arc<ContentFilter>,
        gate: VersionGate,
        clock: Arc<dyn Clock>,
        policy: SubmissionPolicy,
    ) -> Self {
        Self {
            store,
            artifacts,
            throttle,
            filter,
            gate,
            clock,
            policy,
        }
    }

    /// Attempts to introduce a new species into the ecosystem.
    ///
    /// Throttle rejections take precedence over moderation rejections, and
    /// throttle grants are only consumed by a successful metadata insert, so
    /// rejected and duplicate submissions never burn quota. Every path
    /// returns a definitive outcome.
    pub async fn submit(
        &self,
        submission: SpeciesSubmission,
        client_ip: &str,
    ) -> SubmissionOutcome {
        let version = match validate(&submission) {
            Ok(v) => v,
            Err(reason) => {
                tracing::warn!("rejected submission from {}: {}", client_ip, reason);
                return SubmissionOutcome::InvalidRequest;
            }
        };

        if !self.throttle.check(client_ip, WAIT_POLICY) {
            return SubmissionOutcome::Throttled(ThrottleWindow::FiveMinute);
        }
        if !self.throttle.check(client_ip, DAILY_POLICY) {
            return SubmissionOutcome::Throttled(ThrottleWindow::TwentyFourHour);
        }

        if let Some(field) = self.moderate(&submission) {
            return SubmissionOutcome::Moderated(field);
        }

        let now = self.clock.now();
        let species = Species {
            name: submission.name.clone(),
            version: version.clone(),
            species_type: submission.species_type.clone(),
            author: submission.author.clone(),
            author_email: submission.author_email.clone(),
            date_added: now,
            assembly_full_name: submission.assembly_full_name.clone(),
            extinct: false,
            blacklisted: false,
            last_reintroduction: None,
            reintroduction_node: None,
        };

        match self.store.insert(&species).await {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => return SubmissionOutcome::AlreadyExists,
            Err(e) => {
                tracing::error!("species insert failed for {}: {}", species.name, e);
                return SubmissionOutcome::StorageFailure;
            }
        }

        self.register_grants(client_ip, now);

        let filename = artifact_filename(&species.name);
        if let Err(e) = self
            .artifacts
            .save(&submission.assembly, &version, &filename)
            .await
        {
            tracing::error!(
                "artifact save failed for {} {}: {}",
                species.name,
                version,
                e
            );
            if let Err(e) = self.store.delete(&species.name, &version).await {
                tracing::error!(
                    "compensating delete failed for {} {}: {}",
                    species.name,
                    version,
                    e
                );
            }
            return SubmissionOutcome::StorageFailure;
        }

        SubmissionOutcome::Success
    }

    /// Assembly full names of every blacklisted species.
    pub async fn blacklisted(&self) -> Result<Vec<String>, RegistryError> {
        self.store.blacklisted().await.map_err(|e| {
            tracing::error!("blacklist query failed: {}", e);
            RegistryError::Storage
        })
    }

    /// Species whose population has reached zero for the given version.
    pub async fn extinct_species(
        &self,
        version: &str,
        filter: &str,
    ) -> Result<Vec<Species>, RegistryError> {
        let version = normalize_param(version)?;
        self.store
            .extinct(&version, self.since_for(filter))
            .await
            .map_err(|e| {
                tracing::error!("extinct species query failed: {}", e);
                RegistryError::Storage
            })
    }

    /// All visible species for the given version. The version must pass the
    /// gate; a disabled version sees nothing.
    pub async fn all_species(
        &self,
        version: &str,
        filter: &str,
    ) -> Result<Vec<Species>, RegistryError> {
        let version = normalize_param(version)?;
        let status = self.gate.is_disabled(&version).await;
        if status.disabled {
            return Err(RegistryError::VersionDisabled(status.message));
        }
        self.store
            .all(&version, self.since_for(filter))
            .await
            .map_err(|e| {
                tracing::error!("species query failed: {}", e);
                RegistryError::Storage
            })
    }

    /// Raw artifact bytes for a species.
    pub async fn artifact(&self, name: &str, version: &str) -> Result<Vec<u8>, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::Validation("name is required".into()));
        }
        let version = normalize_param(version)?;

        match self.artifacts.load(&version, &artifact_filename(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(ArtifactError::NotFound) => {
                Err(RegistryError::NotFound(format!("artifact {} {}", name, version)))
            }
            Err(e) => {
                tracing::error!("artifact load failed for {} {}: {}", name, version, e);
                Err(RegistryError::Storage)
            }
        }
    }

    /// Brings an extinct species back into circulation and returns its
    /// artifact bytes. Exactly one concurrent caller wins; the others get
    /// `NotExtinct` and no state changes.
    pub async fn reintroduce(
        &self,
        name: &str,
        version: &str,
        node: Uuid,
    ) -> Result<Vec<u8>, ReintroduceError> {
        if name.trim().is_empty() || node.is_nil() {
            return Err(ReintroduceError::Validation(
                "name and reintroduction node are required".into(),
            ));
        }
        let version = version::normalize(version)
            .map_err(|e| ReintroduceError::Validation(e.to_string()))?;

        // Bytes first: the extinct flag must never clear for a species whose
        // artifact cannot be served.
        let bytes = match self.artifacts.load(&version, &artifact_filename(name)).await {
            Ok(bytes) => bytes,
            Err(ArtifactError::NotFound) => {
                return Err(ReintroduceError::NotFound(format!("artifact {}", name)))
            }
            Err(e) => {
                tracing::error!("artifact load failed for {} {}: {}", name, version, e);
                return Err(ReintroduceError::Storage);
            }
        };

        match self
            .store
            .reintroduce(name, &version, node, self.clock.now())
            .await
        {
            Ok(true) => Ok(bytes),
            Ok(false) => Err(ReintroduceError::NotExtinct),
            Err(e) => {
                tracing::error!("reintroduction failed for {} {}: {}", name, version, e);
                Err(ReintroduceError::Storage)
            }
        }
    }

    fn moderate(&self, submission: &SpeciesSubmission) -> Option<ModeratedField> {
        if self.filter.is_flagged(&submission.name) {
            return Some(ModeratedField::Name);
        }
        if self.filter.is_flagged(&submission.author) {
            return Some(ModeratedField::Author);
        }
        if self.filter.is_flagged(&submission.author_email) {
            return Some(ModeratedField::Email);
        }
        None
    }

    fn register_grants(&self, client_ip: &str, now: DateTime<Utc>) {
        let wait_end = now + Duration::minutes(self.policy.introduction_wait_minutes);
        if !self.throttle.admit(client_ip, WAIT_POLICY, 1, wait_end) {
            tracing::warn!("wait-window grant for {} raced past its quota", client_ip);
        }
        let daily_end = now + Duration::hours(24);
        if !self.throttle.admit(
            client_ip,
            DAILY_POLICY,
            self.policy.introduction_daily_limit,
            daily_end,
        ) {
            tracing::warn!("daily grant for {} raced past its quota", client_ip);
        }
    }

    fn since_for(&self, filter: &str) -> Option<DateTime<Utc>> {
        if filter == FILTER_ALL {
            None
        } else {
            Some(self.clock.now() - Duration::days(self.policy.recent_species_days))
        }
    }
}

fn validate(submission: &SpeciesSubmission) -> Result<String, String> {
    for (field, value) in [
        ("name", &submission.name),
        ("type", &submission.species_type),
        ("author", &submission.author),
        ("email", &submission.author_email),
        ("assembly full name", &submission.assembly_full_name),
    ] {
        if value.trim().is_empty() {
            return Err(format!("{} is required", field));
        }
    }
    version::normalize(&submission.version).map_err(|e| e.to_string())
}

fn normalize_param(version: &str) -> Result<String, RegistryError> {
    version::normalize(version).map_err(|e| RegistryError::Validation(e.to_string()))
}

fn artifact_filename(name: &str) -> String {
    format!("{}.bin", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use async_trait::async_trait;
    use domains::models::VersionPolicy;
    use domains::traits::VersionPolicyStore;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemSpeciesStore {
        rows: Mutex<HashMap<(String, String), Species>>,
        sink_inserts: bool,
        last_since: Mutex<Option<Option<DateTime<Utc>>>>,
    }

    #[async_trait]
    impl SpeciesStore for MemSpeciesStore {
        async fn insert(&self, species: &Species) -> Result<(), StoreError> {
            if self.sink_inserts {
                return Err(StoreError::Unavailable("down for maintenance".into()));
            }
            let key = (species.name.clone(), species.version.clone());
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(&key) {
                return Err(StoreError::Duplicate(species.name.clone()));
            }
            rows.insert(key, species.clone());
            Ok(())
        }

        async fn delete(&self, name: &str, version: &str) -> Result<(), StoreError> {
            self.rows
                .lock()
                .unwrap()
                .remove(&(name.to_string(), version.to_string()));
            Ok(())
        }

        async fn blacklisted(&self) -> Result<Vec<String>, StoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.blacklisted)
                .map(|s| s.assembly_full_name.clone())
                .collect())
        }

        async fn extinct(
            &self,
            version: &str,
            since: Option<DateTime<Utc>>,
        ) -> Result<Vec<Species>, StoreError> {
            *self.last_since.lock().unwrap() = Some(since);
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.version == version && s.extinct && !s.blacklisted)
                .cloned()
                .collect())
        }

        async fn all(
            &self,
            version: &str,
            since: Option<DateTime<Utc>>,
        ) -> Result<Vec<Species>, StoreError> {
            *self.last_since.lock().unwrap() = Some(since);
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.version == version && !s.blacklisted)
                .cloned()
                .collect())
        }

        async fn reintroduce(
            &self,
            name: &str,
            version: &str,
            node: Uuid,
            when: DateTime<Utc>,
        ) -> Result<bool, StoreError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&(name.to_string(), version.to_string())) {
                Some(species) if species.extinct => {
                    species.extinct = false;
                    species.last_reintroduction = Some(when);
                    species.reintroduction_node = Some(node);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    #[derive(Default)]
    struct MemArtifacts {
        files: Mutex<HashMap<(String, String), Vec<u8>>>,
        fail_saves: bool,
    }

    #[async_trait]
    impl ArtifactStore for MemArtifacts {
        async fn save(
            &self,
            bytes: &[u8],
            version: &str,
            filename: &str,
        ) -> Result<(), ArtifactError> {
            if self.fail_saves {
                return Err(ArtifactError::Io("disk full".into()));
            }
            let key = (version.to_string(), filename.to_string());
            let mut files = self.files.lock().unwrap();
            if files.contains_key(&key) {
                return Err(ArtifactError::AlreadyExists);
            }
            files.insert(key, bytes.to_vec());
            Ok(())
        }

        async fn load(&self, version: &str, filename: &str) -> Result<Vec<u8>, ArtifactError> {
            self.files
                .lock()
                .unwrap()
                .get(&(version.to_string(), filename.to_string()))
                .cloned()
                .ok_or(ArtifactError::NotFound)
        }

        async fn delete(&self, version: &str, filename: &str) -> Result<(), ArtifactError> {
            self.files
                .lock()
                .unwrap()
                .remove(&(version.to_string(), filename.to_string()));
            Ok(())
        }
    }

    /// Policy store that enables every version.
    struct OpenPolicies;

    #[async_trait]
    impl VersionPolicyStore for OpenPolicies {
        async fn policy(&self, version: &str) -> Result<Option<VersionPolicy>, StoreError> {
            Ok(Some(VersionPolicy {
                version: version.to_string(),
                disabled: false,
                message: String::new(),
            }))
        }
    }

    struct Fixture {
        store: Arc<MemSpeciesStore>,
        artifacts: Arc<MemArtifacts>,
        clock: Arc<ManualClock>,
        registry: SpeciesRegistry,
    }

    fn fixture() -> Fixture {
        fixture_with(ContentFilter::disabled(), false, false)
    }

    fn fixture_with(filter: ContentFilter, fail_saves: bool, sink_inserts: bool) -> Fixture {
        let store = Arc::new(MemSpeciesStore {
            sink_inserts,
            ..Default::default()
        });
        let artifacts = Arc::new(MemArtifacts {
            fail_saves,
            ..Default::default()
        });
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let registry = SpeciesRegistry::new(
            store.clone(),
            artifacts.clone(),
            Arc::new(RateLimiter::new(clock.clone())),
            Arc::new(filter),
            VersionGate::new(Arc::new(OpenPolicies)),
            clock.clone(),
            SubmissionPolicy::default(),
        );
        Fixture {
            store,
            artifacts,
            clock,
            registry,
        }
    }

    fn submission(name: &str) -> SpeciesSubmission {
        SpeciesSubmission {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            species_type: "Carnivore".to_string(),
            author: "Ada".to_string(),
            author_email: "ada@example.org".to_string(),
            assembly_full_name: format!("{}, Version=1.0.0", name),
            assembly: b"organism bytes".to_vec(),
        }
    }

    #[tokio::test]
    async fn clean_submission_succeeds_and_stores_both_halves() {
        let fx = fixture();
        let outcome = fx.registry.submit(submission("Fern"), "10.0.0.1").await;
        assert_eq!(outcome, SubmissionOutcome::Success);

        assert!(fx
            .store
            .rows
            .lock()
            .unwrap()
            .contains_key(&("Fern".to_string(), "1.0.0".to_string())));
        let bytes = fx.registry.artifact("Fern", "1.0.0").await.unwrap();
        assert_eq!(bytes, b"organism bytes");
    }

    #[tokio::test]
    async fn missing_fields_are_invalid() {
        let fx = fixture();
        let mut sub = submission("Fern");
        sub.author.clear();
        assert_eq!(
            fx.registry.submit(sub, "10.0.0.1").await,
            SubmissionOutcome::InvalidRequest
        );

        let mut sub = submission("Fern");
        sub.version = "one.two".into();
        assert_eq!(
            fx.registry.submit(sub, "10.0.0.1").await,
            SubmissionOutcome::InvalidRequest
        );
    }

    #[tokio::test]
    async fn moderation_priority_is_name_then_author_then_email() {
        let filter = ContentFilter::from_terms(vec!["grendel", "mordred", "spamlord"]);
        let fx = fixture_with(filter, false, false);

        let mut sub = submission("grendel");
        sub.author = "mordred".into();
        sub.author_email = "spamlord@example.org".into();
        assert_eq!(
            fx.registry.submit(sub, "10.0.0.1").await,
            SubmissionOutcome::Moderated(ModeratedField::Name)
        );

        let mut sub = submission("Fern");
        sub.author = "mordred".into();
        sub.author_email = "spamlord@example.org".into();
        assert_eq!(
            fx.registry.submit(sub, "10.0.0.2").await,
            SubmissionOutcome::Moderated(ModeratedField::Author)
        );

        let mut sub = submission("Moss");
        sub.author_email = "spamlord@example.org".into();
        assert_eq!(
            fx.registry.submit(sub, "10.0.0.3").await,
            SubmissionOutcome::Moderated(ModeratedField::Email)
        );
    }

    #[tokio::test]
    async fn moderated_submissions_write_nothing_and_burn_no_quota() {
        let filter = ContentFilter::from_terms(vec!["grendel"]);
        let fx = fixture_with(filter, false, false);

        let outcome = fx.registry.submit(submission("grendel"), "10.0.0.1").await;
        assert_eq!(outcome, SubmissionOutcome::Moderated(ModeratedField::Name));
        assert!(fx.store.rows.lock().unwrap().is_empty());
        assert!(fx.artifacts.files.lock().unwrap().is_empty());

        // The same identity can immediately submit a clean species.
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::Success
        );
    }

    #[tokio::test]
    async fn throttle_rejection_takes_precedence_over_moderation() {
        let filter = ContentFilter::from_terms(vec!["grendel"]);
        let fx = fixture_with(filter, false, false);

        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::Success
        );
        // Within the wait window, a flagged name is reported as throttled.
        assert_eq!(
            fx.registry.submit(submission("grendel"), "10.0.0.1").await,
            SubmissionOutcome::Throttled(ThrottleWindow::FiveMinute)
        );
    }

    #[tokio::test]
    async fn wait_window_frees_after_it_elapses() {
        let fx = fixture();
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::Success
        );
        assert_eq!(
            fx.registry.submit(submission("Moss"), "10.0.0.1").await,
            SubmissionOutcome::Throttled(ThrottleWindow::FiveMinute)
        );

        fx.clock.advance(Duration::minutes(6));
        assert_eq!(
            fx.registry.submit(submission("Moss"), "10.0.0.1").await,
            SubmissionOutcome::Success
        );
    }

    #[tokio::test]
    async fn daily_cap_rejects_distinctly() {
        let store = Arc::new(MemSpeciesStore::default());
        let artifacts = Arc::new(MemArtifacts::default());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let registry = SpeciesRegistry::new(
            store,
            artifacts,
            Arc::new(RateLimiter::new(clock.clone())),
            Arc::new(ContentFilter::disabled()),
            VersionGate::new(Arc::new(OpenPolicies)),
            clock.clone(),
            SubmissionPolicy {
                introduction_daily_limit: 2,
                ..Default::default()
            },
        );

        for name in ["Fern", "Moss"] {
            assert_eq!(
                registry.submit(submission(name), "10.0.0.1").await,
                SubmissionOutcome::Success
            );
            clock.advance(Duration::minutes(6));
        }
        assert_eq!(
            registry.submit(submission("Lichen"), "10.0.0.1").await,
            SubmissionOutcome::Throttled(ThrottleWindow::TwentyFourHour)
        );
    }

    #[tokio::test]
    async fn duplicate_insert_reports_already_exists_without_burning_quota() {
        let fx = fixture();
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::Success
        );
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.2").await,
            SubmissionOutcome::AlreadyExists
        );
        // The duplicate consumed nothing: the second identity may still submit.
        assert_eq!(
            fx.registry.submit(submission("Moss"), "10.0.0.2").await,
            SubmissionOutcome::Success
        );
    }

    #[tokio::test]
    async fn failed_artifact_save_compensates_the_metadata_row() {
        let fx = fixture_with(ContentFilter::disabled(), true, false);
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::StorageFailure
        );
        assert!(fx.store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_store_is_a_storage_failure() {
        let fx = fixture_with(ContentFilter::disabled(), false, true);
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::StorageFailure
        );
        assert!(fx.artifacts.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_requires_a_version() {
        let fx = fixture();
        assert!(matches!(
            fx.registry.extinct_species("", FILTER_ALL).await,
            Err(RegistryError::Validation(_))
        ));
        assert!(matches!(
            fx.registry.all_species("", FILTER_ALL).await,
            Err(RegistryError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn all_filter_selects_the_full_set_and_others_a_recent_window() {
        let fx = fixture();
        fx.registry.all_species("1.0.0", "All").await.unwrap();
        assert_eq!(*fx.store.last_since.lock().unwrap(), Some(None));

        fx.registry.all_species("1.0.0", "").await.unwrap();
        let since = fx.store.last_since.lock().unwrap().unwrap();
        assert_eq!(since, Some(fx.clock.now() - Duration::days(30)));
    }

    #[tokio::test]
    async fn reintroduce_rejects_a_non_extinct_species() {
        let fx = fixture();
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::Success
        );
        assert!(matches!(
            fx.registry
                .reintroduce("Fern", "1.0.0", Uuid::new_v4())
                .await,
            Err(ReintroduceError::NotExtinct)
        ));
    }

    #[tokio::test]
    async fn reintroduce_returns_bytes_and_exactly_one_winner() {
        let fx = fixture();
        assert_eq!(
            fx.registry.submit(submission("Fern"), "10.0.0.1").await,
            SubmissionOutcome::Success
        );
        fx.store
            .rows
            .lock()
            .unwrap()
            .get_mut(&("Fern".to_string(), "1.0.0".to_string()))
            .unwrap()
            .extinct = true;

        let node = Uuid::new_v4();
        let bytes = fx.registry.reintroduce("Fern", "1.0.0", node).await.unwrap();
        assert_eq!(bytes, b"organism bytes");

        // The race loser sees a no-op rejection.
        assert!(matches!(
            fx.registry
                .reintroduce("Fern", "1.0.0", Uuid::new_v4())
                .await,
            Err(ReintroduceError::NotExtinct)
        ));

        let rows = fx.store.rows.lock().unwrap();
        let fern = &rows[&("Fern".to_string(), "1.0.0".to_string())];
        assert!(!fern.extinct);
        assert_eq!(fern.reintroduction_node, Some(node));
    }

    #[tokio::test]
    async fn reintroduce_validates_its_parameters() {
        let fx = fixture();
        assert!(matches!(
            fx.registry.reintroduce("", "1.0.0", Uuid::new_v4()).await,
            Err(ReintroduceError::Validation(_))
        ));
        assert!(matches!(
            fx.registry.reintroduce("Fern", "1.0.0", Uuid::nil()).await,
            Err(ReintroduceError::Validation(_))
        ));
    }
}
