//! # Scribe Core Kernel Errors
//!
//! Defines the aggregate [`Error`] returned across subsystem boundaries.
//!
//! Each subsystem owns a typed error enum; the kernel error wraps all of them
//! so host code can use a single `Result` alias while still matching on the
//! specific failure.
use std::result::Result as StdResult;

use crate::extension::error::ExtensionError;
use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;
use crate::vfs::error::VfsError;
use crate::workspace::error::WorkspaceError;
use thiserror::Error as ThisError;

/// Top-level error type for the Scribe core
#[derive(Debug, ThisError)]
pub enum Error {
    /// Registry error (duplicates, provenance violations)
    #[error("Extension error: {0}")]
    Extension(#[from] ExtensionError),

    /// Plugin lifecycle error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Settings and storage provider error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Virtual file system error
    #[error("Virtual file error: {0}")]
    Vfs(#[from] VfsError),

    /// Workspace error
    #[error("Workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    /// Host configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        component_name: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the kernel's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Bootstrap")]
    Bootstrap,
    #[error("Initialize")]
    Initialize,
    #[error("Start")]
    Start,
    #[error("Shutdown")]
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
