//! # Services
//!
//! Coordination logic for the vivarium server: admission control,
//! content moderation, version gating, and the species/peer registries
//! that orchestrate them over the storage ports.

pub mod clock;
pub mod peers;
pub mod species;
pub mod throttle;
pub mod version_gate;
pub mod wordfilter;

pub use clock::{ManualClock, SystemClock};
pub use peers::PeerRegistry;
pub use species::{SpeciesRegistry, SubmissionPolicy};
pub use throttle::RateLimiter;
pub use version_gate::{VersionGate, VersionStatus};
pub use wordfilter::ContentFilter;
