//! # Scribe Core Storage System Errors
//!
//! Defines [`StorageSystemError`], covering provider I/O failures and the
//! settings store's persistence and parsing failures. Persistence errors are
//! reported to the caller but never invalidate in-memory settings.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to persist settings to '{path}' during '{operation}': {source}")]
    Persistence {
        path: PathBuf,
        operation: String,
        #[source]
        source: Box<StorageSystemError>,
    },

    #[error("Malformed settings line {line} in '{path}': {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Serialization to '{format}' failed: {source}")]
    SerializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Deserialization from '{format}' failed: {source}")]
    DeserializationError {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid path provided: '{path}': {reason}")]
    InvalidPath { path: PathBuf, reason: String },
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    pub fn persistence(source: StorageSystemError, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Persistence {
            path,
            operation: operation.into(),
            source: Box::new(source),
        }
    }
}
