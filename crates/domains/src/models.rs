//! # Domain Models
//!
//! These structs represent the entities the coordination server tracks:
//! species artifacts submitted by clients, leased peer memberships, and the
//! per-version enable/disable policy owned by the operations side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, versioned organism artifact in the ecosystem.
///
/// The row is never physically deleted once committed; lifecycle changes are
/// expressed through the `extinct` and `blacklisted` flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    /// Canonical three-component version, e.g. "1.2.3".
    pub version: String,
    pub species_type: String,
    pub author: String,
    pub author_email: String,
    pub date_added: DateTime<Utc>,
    pub assembly_full_name: String,
    /// Population reached zero; eligible for reintroduction.
    pub extinct: bool,
    /// Hidden from listings. Blacklisting gates visibility, not storage.
    pub blacklisted: bool,
    pub last_reintroduction: Option<DateTime<Utc>>,
    pub reintroduction_node: Option<Uuid>,
}

/// The payload a client sends when introducing a new species.
#[derive(Debug, Clone)]
pub struct SpeciesSubmission {
    pub name: String,
    pub version: String,
    pub species_type: String,
    pub author: String,
    pub author_email: String,
    pub assembly_full_name: String,
    /// Raw artifact bytes, stored verbatim.
    pub assembly: Vec<u8>,
}

/// A client process holding a leased membership slot on one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub channel: String,
    pub ip_address: String,
    pub version: String,
    pub guid: Uuid,
    /// Expiry timestamp. A peer past its lease is excluded from counts even
    /// if the row still exists.
    pub lease: DateTime<Utc>,
    pub first_contact: DateTime<Utc>,
}

/// An email registration recorded when a client first announces itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRegistration {
    pub email: String,
    pub ip_address: String,
    pub registered_at: DateTime<Utc>,
}

/// Central kill-switch record for one client version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionPolicy {
    pub version: String,
    pub disabled: bool,
    pub message: String,
}
