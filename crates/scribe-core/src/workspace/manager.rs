use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::kernel::component::KernelComponent;
use crate::kernel::constants::{RECENT_FILES_LIMIT, RECENT_FILES_PREFIX, WORKSPACE_ROOT_KEY};
use crate::kernel::error::Result as KernelResult;
use crate::storage::settings::SettingsStore;
use crate::workspace::error::WorkspaceError;

/// Tracks the current workspace root and the most-recently-used file list.
///
/// Recent files are stored in the settings as `files.recent.0` (most recent)
/// through `files.recent.9`.
pub struct WorkspaceManager {
    settings: Arc<SettingsStore>,
    root: RwLock<Option<PathBuf>>,
    // Serializes read-modify-write of the recent list
    recent_guard: Mutex<()>,
}

impl WorkspaceManager {
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self {
            settings,
            root: RwLock::new(None),
            recent_guard: Mutex::new(()),
        }
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    /// Current root, unset until a workspace is opened
    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.root.read().clone()
    }

    /// Make `root` the current workspace. The root must be an existing
    /// directory. The choice is recorded in the settings but not synced.
    pub fn open_workspace(&self, root: impl AsRef<Path>) -> Result<(), WorkspaceError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(WorkspaceError::InvalidWorkspace {
                path: root.to_path_buf(),
                reason: "path does not exist".to_string(),
            });
        }
        if !root.is_dir() {
            return Err(WorkspaceError::InvalidWorkspace {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        *self.root.write() = Some(root.to_path_buf());
        self.settings.put(WORKSPACE_ROOT_KEY, root.to_string_lossy());
        log::info!("Opened workspace {}", root.display());
        Ok(())
    }

    pub fn close_workspace(&self) {
        if let Some(root) = self.root.write().take() {
            log::info!("Closed workspace {}", root.display());
        }
    }

    /// Reopen the last recorded workspace if it still exists
    pub fn restore_last_workspace(&self) -> Option<PathBuf> {
        let last = PathBuf::from(self.settings.get(WORKSPACE_ROOT_KEY)?);
        match self.open_workspace(&last) {
            Ok(()) => Some(last),
            Err(e) => {
                log::debug!("Not restoring last workspace: {}", e);
                None
            }
        }
    }

    /// Recent files, most recent first. Entries whose target no longer
    /// exists are left out.
    pub fn recent_files(&self) -> Vec<PathBuf> {
        self.stored_recent_files()
            .into_iter()
            .filter(|path| path.exists())
            .take(RECENT_FILES_LIMIT)
            .collect()
    }

    /// Move `path` to the front of the recent list and persist the list.
    ///
    /// On a persistence error the in-memory list is still updated.
    pub fn add_recent_file(&self, path: impl AsRef<Path>) -> Result<(), WorkspaceError> {
        let path = path.as_ref().to_path_buf();
        let _guard = self.recent_guard.lock();

        let mut files = self.recent_files();
        files.retain(|existing| *existing != path);
        files.insert(0, path);
        files.truncate(RECENT_FILES_LIMIT);
        self.write_recent_files(&files)
    }

    /// Returns whether `path` was in the list
    pub fn remove_recent_file(&self, path: impl AsRef<Path>) -> Result<bool, WorkspaceError> {
        let path = path.as_ref();
        let _guard = self.recent_guard.lock();

        let mut files = self.stored_recent_files();
        let before = files.len();
        files.retain(|existing| existing != path);
        if files.len() == before {
            return Ok(false);
        }
        self.write_recent_files(&files)?;
        Ok(true)
    }

    pub fn clear_recent_files(&self) -> Result<(), WorkspaceError> {
        let _guard = self.recent_guard.lock();
        self.write_recent_files(&[])
    }

    /// Stored entries ordered by numeric index, first occurrence of each path
    /// only, without existence filtering
    fn stored_recent_files(&self) -> Vec<PathBuf> {
        let mut indexed: Vec<(usize, String)> = self
            .settings
            .keys(RECENT_FILES_PREFIX)
            .into_iter()
            .filter_map(|key| {
                let index = key.strip_prefix(RECENT_FILES_PREFIX)?.parse::<usize>().ok()?;
                Some((index, key))
            })
            .collect();
        indexed.sort_by_key(|(index, _)| *index);

        let mut seen = HashSet::new();
        indexed
            .into_iter()
            .filter_map(|(_, key)| self.settings.get(&key))
            .map(PathBuf::from)
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }

    /// Replace every indexed key with `files` and sync
    fn write_recent_files(&self, files: &[PathBuf]) -> Result<(), WorkspaceError> {
        for key in self.settings.keys(RECENT_FILES_PREFIX) {
            self.settings.remove(&key);
        }
        for (index, file) in files.iter().enumerate() {
            self.settings
                .put(format!("{}{}", RECENT_FILES_PREFIX, index), file.to_string_lossy());
        }
        self.settings.sync()?;
        Ok(())
    }
}

impl std::fmt::Debug for WorkspaceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceManager")
            .field("root", &*self.root.read())
            .field("settings", &self.settings.location())
            .finish()
    }
}

#[async_trait]
impl KernelComponent for WorkspaceManager {
    fn name(&self) -> &'static str {
        "WorkspaceManager"
    }

    async fn initialize(&self) -> KernelResult<()> {
        if let Some(root) = self.restore_last_workspace() {
            log::info!("Restored workspace {}", root.display());
        }
        Ok(())
    }

    async fn start(&self) -> KernelResult<()> {
        Ok(())
    }

    // Settings are synced by the store itself on shutdown
    async fn stop(&self) -> KernelResult<()> {
        Ok(())
    }
}
