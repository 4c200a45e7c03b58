//! # Domains
//!
//! Core entities and port definitions for the vivarium coordination server:
//! species metadata, peer leases, version policies, and the storage
//! contracts the adapter crates implement.

pub mod error;
pub mod models;
pub mod traits;
pub mod version;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
