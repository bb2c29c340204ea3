//! # Scribe Core Workspace
//!
//! [`WorkspaceManager`] tracks the active workspace root and a bounded,
//! deduplicated most-recently-used list of files, persisted through the
//! [`SettingsStore`](crate::storage::SettingsStore).
pub mod error;
pub mod manager;

pub use error::WorkspaceError;
pub use manager::WorkspaceManager;
