use std::sync::Arc;

use crate::extension::error::ExtensionError;
use crate::extension::file_type::FileType;
use crate::extension::language::Language;
use crate::extension::navigation::NavigationProvider;
use crate::extension::set::RegistrySet;
use crate::extension::view::ViewProvider;

/// The only channel between an activating plugin and the host.
///
/// Every registration made through the context is tagged with the plugin's
/// id, so the manager can remove it when the plugin is deactivated or its
/// activation fails part way.
pub struct PluginContext {
    plugin_id: String,
    registries: Arc<RegistrySet>,
    registrations: usize,
}

impl PluginContext {
    pub(crate) fn new(plugin_id: impl Into<String>, registries: Arc<RegistrySet>) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            registries,
            registrations: 0,
        }
    }

    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    pub fn register_language(&mut self, language: Language) -> Result<Arc<Language>, ExtensionError> {
        let language = self.registries.languages.register_language(language, &self.plugin_id)?;
        self.registrations += 1;
        Ok(language)
    }

    /// Register a file type. Its language does not have to be registered.
    pub fn register_file_type(&mut self, file_type: FileType) -> Result<Arc<FileType>, ExtensionError> {
        let file_type = Arc::new(file_type);
        self.registries.file_types.register(file_type.clone(), &self.plugin_id)?;
        self.registrations += 1;
        Ok(file_type)
    }

    pub fn register_navigation_provider(&mut self, provider: Arc<dyn NavigationProvider>) -> Result<(), ExtensionError> {
        self.registries.navigation.register(provider, &self.plugin_id)?;
        self.registrations += 1;
        Ok(())
    }

    /// Returns `false` if the label was already taken
    pub fn add_activity_bar_item(&mut self, label: impl Into<String>, provider: Arc<dyn ViewProvider>) -> bool {
        let added = self.registries.activity_bar.add(label, provider, &self.plugin_id);
        if added {
            self.registrations += 1;
        }
        added
    }

    /// Returns `false` if the label was already taken
    pub fn add_side_bar_view(&mut self, label: impl Into<String>, provider: Arc<dyn ViewProvider>) -> bool {
        let added = self.registries.side_bar.add(label, provider, &self.plugin_id);
        if added {
            self.registrations += 1;
        }
        added
    }

    /// Look up an already registered language, e.g. to attach a file type to it
    pub fn language(&self, id: &str) -> Option<Arc<Language>> {
        self.registries.languages.get(id)
    }

    /// Number of successful registrations made through this context
    pub fn registration_count(&self) -> usize {
        self.registrations
    }
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext")
            .field("plugin_id", &self.plugin_id)
            .field("registrations", &self.registrations)
            .finish_non_exhaustive()
    }
}
