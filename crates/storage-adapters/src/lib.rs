//! # Storage Adapters
//!
//! Concrete implementations of the `domains` storage ports: a SQLite-backed
//! metadata store and a local-filesystem artifact store.

pub mod local_fs;
pub mod sqlite;

pub use local_fs::LocalArtifactStore;
pub use sqlite::SqliteMetadataStore;
