//! # Core Traits (Ports)
//!
//! Any storage adapter must implement these traits to be used by the
//! registries. Each method returns a typed error; the registries match them
//! exhaustively.

use crate::error::{ArtifactError, StoreError};
use crate::models::{Peer, Species, UserRegistration, VersionPolicy};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Relational persistence contract for species metadata.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait SpeciesStore: Send + Sync {
    /// Inserts a new species row. Fails with `Duplicate` when the
    /// (name, version) key already exists.
    async fn insert(&self, species: &Species) -> Result<(), StoreError>;

    /// Compensation hook: removes the row written by a submission whose
    /// artifact save failed.
    async fn delete(&self, name: &str, version: &str) -> Result<(), StoreError>;

    /// Assembly full names of every blacklisted species.
    async fn blacklisted(&self) -> Result<Vec<String>, StoreError>;

    /// Extinct species for a version. `since` bounds the result to rows
    /// added after the given instant; `None` returns the full set.
    async fn extinct(
        &self,
        version: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Species>, StoreError>;

    /// All visible species for a version, bounded like `extinct`.
    async fn all(
        &self,
        version: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Species>, StoreError>;

    /// Clears the extinct flag if and only if it is currently set, stamping
    /// the reintroduction time and node. Returns true when this caller won
    /// the swap, false when the species was missing or not extinct.
    async fn reintroduce(
        &self,
        name: &str,
        version: &str,
        node: Uuid,
        when: DateTime<Utc>,
    ) -> Result<bool, StoreError>;
}

/// Relational persistence contract for peer leases and user registrations.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PeerStore: Send + Sync {
    async fn add_user(&self, user: &UserRegistration) -> Result<(), StoreError>;

    /// Upserts the lease for (channel, ip, version). The first contact
    /// timestamp of an existing row is preserved.
    async fn register(&self, peer: &Peer) -> Result<(), StoreError>;

    /// Peers on (version, channel) whose lease is still ahead of `now`.
    async fn live_peers(
        &self,
        version: &str,
        channel: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Peer>, StoreError>;

    async fn count_peers(
        &self,
        version: &str,
        channel: &str,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError>;
}

/// Read-only view of the version enable/disable policy table. The records
/// are owned by the operations side; the core never writes them.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait VersionPolicyStore: Send + Sync {
    async fn policy(&self, version: &str) -> Result<Option<VersionPolicy>, StoreError>;
}

/// Durable byte storage for species artifacts, keyed by (version, filename).
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Create-only write. Fails with `AlreadyExists` when the key is taken;
    /// never leaves a partial file behind on failure.
    async fn save(&self, bytes: &[u8], version: &str, filename: &str)
        -> Result<(), ArtifactError>;

    async fn load(&self, version: &str, filename: &str) -> Result<Vec<u8>, ArtifactError>;

    /// Best-effort removal; a missing target is not an error.
    async fn delete(&self, version: &str, filename: &str) -> Result<(), ArtifactError>;
}

/// Time source injected into admission control and lease computation.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
