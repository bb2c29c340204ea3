//! # Scribe Core Virtual File System Errors
use std::path::PathBuf;
use thiserror::Error;

use crate::vfs::file::TextEncoding;

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("I/O error during operation '{operation}' on '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Content of '{path}' is not valid {encoding}")]
    Decode { path: PathBuf, encoding: TextEncoding },

    #[error("Cannot read content of a directory: {0}")]
    IsADirectory(PathBuf),
}

impl VfsError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        VfsError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
