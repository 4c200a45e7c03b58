//! # Error and outcome vocabulary
//!
//! Collaborator failures (`StoreError`, `ArtifactError`) and the typed
//! outcomes the registries return. No raw storage error crosses a registry
//! boundary; every externally observed operation resolves to one of these.

use crate::models::Peer;
use thiserror::Error;

/// Failures surfaced by the relational metadata store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert hit an existing key.
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("{0} not found")]
    NotFound(String),

    /// The store is unreachable or rejected the operation.
    #[error("metadata store unavailable: {0}")]
    Unavailable(String),
}

/// Failures surfaced by the artifact store.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Create-only write refused: the key is already present.
    #[error("artifact already exists")]
    AlreadyExists,

    #[error("artifact not found")]
    NotFound,

    /// The (version, filename) key would escape the storage root.
    #[error("invalid artifact key")]
    InvalidKey,

    #[error("artifact i/o failure: {0}")]
    Io(String),
}

/// Which submission field tripped the content filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeratedField {
    Name,
    Author,
    Email,
}

/// Which admission window rejected a submission. Surfaced distinctly so the
/// caller can pick a retry delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleWindow {
    FiveMinute,
    TwentyFourHour,
}

/// Definitive outcome of a species submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    /// A species with this name and version is already registered.
    AlreadyExists,
    Moderated(ModeratedField),
    Throttled(ThrottleWindow),
    /// A required parameter was missing or malformed.
    InvalidRequest,
    /// Metadata or artifact storage failed; partial writes were compensated.
    StorageFailure,
}

/// Outcome of a peer registration.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterPeerOutcome {
    /// Lease written; the caller receives the current live membership.
    Success { count: i64, peers: Vec<Peer> },
    /// Version disabled or required parameters missing. No lease is written.
    GlobalFailure,
    /// Storage failed mid-registration.
    Failure,
}

/// Failures surfaced by the registry query operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("missing or malformed parameter: {0}")]
    Validation(String),

    #[error("version disabled: {0}")]
    VersionDisabled(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("storage failure")]
    Storage,
}

/// Failures surfaced by a reintroduction attempt.
#[derive(Error, Debug)]
pub enum ReintroduceError {
    /// The species is not currently extinct; another peer won the race.
    #[error("species is not extinct")]
    NotExtinct,

    #[error("missing or malformed parameter: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("storage failure")]
    Storage,
}
