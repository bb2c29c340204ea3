use std::fmt;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::vfs::error::VfsError;
use crate::vfs::file::VirtualFile;

/// Local filesystem virtual file
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LocalVirtualFile {
    path: PathBuf,
}

impl LocalVirtualFile {
    /// Create a handle for the given path. The path does not need to exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a shared handle, the form registries and navigation targets use
    pub fn shared(path: impl Into<PathBuf>) -> Arc<dyn VirtualFile> {
        Arc::new(Self::new(path))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl VirtualFile for LocalVirtualFile {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    fn local_path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
    }

    fn is_directory(&self) -> bool {
        self.path.is_dir()
    }

    fn length(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn last_modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).and_then(|m| m.modified()).ok()
    }

    fn input_stream(&self) -> Result<Box<dyn Read + Send>, VfsError> {
        if self.path.is_dir() {
            return Err(VfsError::IsADirectory(self.path.clone()));
        }
        let file = File::open(&self.path).map_err(|e| VfsError::io(e, "open", self.path.clone()))?;
        Ok(Box::new(file))
    }

    fn parent(&self) -> Option<Arc<dyn VirtualFile>> {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| LocalVirtualFile::shared(p))
    }

    fn children(&self) -> Result<Vec<Arc<dyn VirtualFile>>, VfsError> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.path).map_err(|e| VfsError::io(e, "read_dir", self.path.clone()))?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VfsError::io(e, "read_dir_entry", self.path.clone()))?;
            children.push(LocalVirtualFile::shared(entry.path()));
        }
        // read_dir order is platform dependent
        children.sort_by_key(|child| child.name());
        Ok(children)
    }
}

impl fmt::Debug for LocalVirtualFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalVirtualFile")
            .field("path", &self.path)
            .finish()
    }
}
