use std::ops::Deref;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::extension::registry::{DuplicatePolicy, ExtensionRegistry, Identified};
use crate::vfs::VirtualFile;

/// Where a navigation lands: a file and a character offset in it.
///
/// The offset is not checked against the file's length.
#[derive(Debug, Clone)]
pub struct NavigationTarget {
    file: Arc<dyn VirtualFile>,
    offset: usize,
}

impl NavigationTarget {
    pub fn new(file: Arc<dyn VirtualFile>, offset: usize) -> Self {
        Self { file, offset }
    }

    pub fn file(&self) -> &Arc<dyn VirtualFile> {
        &self.file
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Resolves "go to definition" for the files it supports
pub trait NavigationProvider: Identified + Send + Sync {
    fn supports(&self, file: &dyn VirtualFile) -> bool;

    /// Find the definition of the symbol at `offset` (a character offset into `contents`)
    fn goto_definition(
        &self,
        file: &Arc<dyn VirtualFile>,
        offset: usize,
        contents: &str,
    ) -> Option<NavigationTarget>;
}

/// Registry of navigation providers. Resolution is first registered, first
/// matched; there is no priority ordering.
pub struct NavigationRegistry {
    inner: ExtensionRegistry<dyn NavigationProvider>,
}

impl NavigationRegistry {
    pub fn new() -> Self {
        Self {
            inner: ExtensionRegistry::new("navigation provider", DuplicatePolicy::Reject),
        }
    }

    /// The first registered provider supporting `file`
    pub fn provider_for(&self, file: &dyn VirtualFile) -> Option<Arc<dyn NavigationProvider>> {
        self.inner.find_first(|provider| provider.supports(file))
    }

    /// Ask the provider resolved for `file` for a definition.
    ///
    /// A panicking provider is logged and treated as having no answer.
    pub fn goto_definition(
        &self,
        file: &Arc<dyn VirtualFile>,
        offset: usize,
        contents: &str,
    ) -> Option<NavigationTarget> {
        let provider = self.provider_for(file.as_ref())?;
        match panic::catch_unwind(AssertUnwindSafe(|| provider.goto_definition(file, offset, contents))) {
            Ok(target) => target,
            Err(_) => {
                log::error!(
                    "Navigation provider '{}' panicked resolving {} at offset {}",
                    provider.id(),
                    file.path(),
                    offset
                );
                None
            }
        }
    }
}

impl Default for NavigationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for NavigationRegistry {
    type Target = ExtensionRegistry<dyn NavigationProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl std::fmt::Debug for NavigationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}
