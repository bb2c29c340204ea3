use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::extension::error::ExtensionError;
use crate::extension::navigation::{NavigationProvider, NavigationRegistry, NavigationTarget};
use crate::extension::registry::Identified;
use crate::vfs::{LocalVirtualFile, VirtualFile};

/// Supports files with one extension and always answers with a fixed offset
struct FixedProvider {
    id: String,
    extension: String,
    answer: usize,
    calls: Arc<AtomicUsize>,
}

impl FixedProvider {
    fn new(id: &str, extension: &str, answer: usize) -> Self {
        Self {
            id: id.to_string(),
            extension: extension.to_string(),
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl Identified for FixedProvider {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NavigationProvider for FixedProvider {
    fn supports(&self, file: &dyn VirtualFile) -> bool {
        file.extension().as_deref() == Some(self.extension.as_str())
    }

    fn goto_definition(&self, file: &Arc<dyn VirtualFile>, _offset: usize, _contents: &str) -> Option<NavigationTarget> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Some(NavigationTarget::new(file.clone(), self.answer))
    }
}

struct PanickingProvider;

impl Identified for PanickingProvider {
    fn id(&self) -> &str {
        "panicking"
    }
}

impl NavigationProvider for PanickingProvider {
    fn supports(&self, _file: &dyn VirtualFile) -> bool {
        true
    }

    fn goto_definition(&self, _file: &Arc<dyn VirtualFile>, _offset: usize, _contents: &str) -> Option<NavigationTarget> {
        panic!("provider bug");
    }
}

#[test]
fn test_first_registered_supporting_provider_wins() {
    let registry = NavigationRegistry::new();
    let first = Arc::new(FixedProvider::new("first", "rs", 10));
    let second = Arc::new(FixedProvider::new("second", "rs", 20));
    let first_calls = first.calls.clone();
    let second_calls = second.calls.clone();

    registry.register(Arc::new(FixedProvider::new("xml", "xml", 1)), "host").unwrap();
    registry.register(first, "host").unwrap();
    registry.register(second, "plugin").unwrap();

    let file = LocalVirtualFile::shared("/project/src/main.rs");
    assert_eq!(registry.provider_for(file.as_ref()).unwrap().id(), "first");

    let target = registry.goto_definition(&file, 3, "fn main() {}").unwrap();
    assert_eq!(target.offset(), 10);
    assert_eq!(target.file().path(), file.path());
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_supporting_provider() {
    let registry = NavigationRegistry::new();
    registry.register(Arc::new(FixedProvider::new("xml", "xml", 1)), "host").unwrap();

    let file = LocalVirtualFile::shared("/project/readme.md");
    assert!(registry.provider_for(file.as_ref()).is_none());
    assert!(registry.goto_definition(&file, 0, "").is_none());
}

#[test]
fn test_duplicate_provider_id_rejected() {
    let registry = NavigationRegistry::new();
    registry.register(Arc::new(FixedProvider::new("p", "rs", 1)), "host").unwrap();
    let err = registry.register(Arc::new(FixedProvider::new("p", "xml", 2)), "plugin").unwrap_err();
    assert!(matches!(err, ExtensionError::DuplicateRegistration { kind: "navigation provider", .. }));
}

#[test]
fn test_panicking_provider_yields_no_target() {
    let registry = NavigationRegistry::new();
    registry.register(Arc::new(PanickingProvider), "plugin").unwrap();

    let file = LocalVirtualFile::shared("/project/any.txt");
    assert!(registry.goto_definition(&file, 0, "text").is_none());
}

#[test]
fn test_target_offset_is_not_validated() {
    let file = LocalVirtualFile::shared("/does/not/exist.txt");
    let target = NavigationTarget::new(file, 1_000_000);
    assert_eq!(target.offset(), 1_000_000);
}
