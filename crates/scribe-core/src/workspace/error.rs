//! # Scribe Core Workspace Errors
use std::path::PathBuf;
use thiserror::Error;

use crate::storage::error::StorageSystemError;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Invalid workspace root '{path}': {reason}")]
    InvalidWorkspace { path: PathBuf, reason: String },

    /// The in-memory state was updated but could not be persisted
    #[error("Failed to persist workspace state: {0}")]
    Storage(#[from] StorageSystemError),
}
