use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::storage::error::StorageSystemError;
use crate::storage::provider::{StorageProvider, StorageResult};

/// Local filesystem storage provider
#[derive(Clone)]
pub struct LocalStorageProvider {
    base_path: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider with the given base path
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a relative path against the base path
    fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.base_path.join(path)
    }
}

impl StorageProvider for LocalStorageProvider {
    fn name(&self) -> &str {
        "local"
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve_path(path).exists()
    }

    fn read_to_string(&self, path: &Path) -> StorageResult<String> {
        let full_path = self.resolve_path(path);
        fs::read_to_string(&full_path).map_err(|e| StorageSystemError::io(e, "read_to_string", full_path))
    }

    fn write_string(&self, path: &Path, contents: &str) -> StorageResult<()> {
        let full_path = self.resolve_path(path);

        let parent = match full_path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => {
                return Err(StorageSystemError::InvalidPath {
                    path: full_path,
                    reason: "Cannot write to path without parent directory".to_string(),
                });
            }
        };
        if !parent.is_dir() {
            fs::create_dir_all(&parent).map_err(|e| StorageSystemError::io(e, "create_dir_all", parent.clone()))?;
        }

        // Write next to the target, then atomically replace it
        let temp_file = NamedTempFile::new_in(&parent)
            .map_err(|e| StorageSystemError::io(e, "create_temp_file", parent.clone()))?;

        temp_file
            .as_file()
            .write_all(contents.as_bytes())
            .map_err(|e| StorageSystemError::io(e, "write_to_temp_file", temp_file.path().to_path_buf()))?;

        temp_file
            .persist(&full_path)
            .map_err(|e| StorageSystemError::io(e.error, "persist_temp_file", full_path.clone()))?;

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.resolve_path(path)
    }
}

impl fmt::Debug for LocalStorageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStorageProvider")
            .field("base_path", &self.base_path)
            .finish()
    }
}
