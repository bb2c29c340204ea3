use std::sync::Arc;

use crate::extension::file_type::FileTypeRegistry;
use crate::extension::language::LanguageRegistry;
use crate::extension::navigation::NavigationRegistry;
use crate::extension::view::ViewRegistry;

/// Every extension point of the host, constructed once at startup and shared
/// by reference with the components that register into or query it.
#[derive(Debug)]
pub struct RegistrySet {
    pub languages: LanguageRegistry,
    pub file_types: FileTypeRegistry,
    pub navigation: NavigationRegistry,
    pub activity_bar: ViewRegistry,
    pub side_bar: ViewRegistry,
}

impl RegistrySet {
    pub fn new() -> Self {
        Self {
            languages: LanguageRegistry::new(),
            file_types: FileTypeRegistry::new(),
            navigation: NavigationRegistry::new(),
            activity_bar: ViewRegistry::new("activity bar item"),
            side_bar: ViewRegistry::new("side bar view"),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Remove everything `owner` registered in any registry.
    /// Returns the total number of removed entries.
    pub fn purge_owner(&self, owner: &str) -> usize {
        self.navigation.unregister_owned_by(owner)
            + self.file_types.unregister_owned_by(owner)
            + self.languages.unregister_owned_by(owner)
            + self.activity_bar.unregister_owned_by(owner)
            + self.side_bar.unregister_owned_by(owner)
    }

    /// Number of entries `owner` currently has registered
    pub fn count_owned_by(&self, owner: &str) -> usize {
        self.navigation.ids_owned_by(owner).len()
            + self.file_types.ids_owned_by(owner).len()
            + self.languages.ids_owned_by(owner).len()
            + self.activity_bar.ids_owned_by(owner).len()
            + self.side_bar.ids_owned_by(owner).len()
    }
}

impl Default for RegistrySet {
    fn default() -> Self {
        Self::new()
    }
}
