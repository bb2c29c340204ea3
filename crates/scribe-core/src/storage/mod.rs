//! # Scribe Core Storage
//!
//! Persistence for host settings. A [`StorageProvider`] abstracts where bytes
//! live ([`LocalStorageProvider`] writes atomically through a temporary file),
//! and [`SettingsStore`] keeps a flat string map on top of it.
pub mod error;
pub mod local;
pub mod provider;
pub mod settings;

/// Re-export key types
pub use error::StorageSystemError;
pub use local::LocalStorageProvider;
pub use provider::{StorageProvider, StorageResult};
pub use settings::{SettingsFormat, SettingsStore};
