use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::storage::error::StorageSystemError;

pub type StorageResult<T> = std::result::Result<T, StorageSystemError>;

/// Trait for storage providers that back persisted settings
pub trait StorageProvider: Send + Sync + Debug {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a file to a string
    fn read_to_string(&self, path: &Path) -> StorageResult<String>;

    /// Write a string to a file, creating parent directories as needed
    fn write_string(&self, path: &Path, contents: &str) -> StorageResult<()>;

    /// Resolve a provider-relative path to the location it refers to
    fn resolve(&self, path: &Path) -> PathBuf;
}
