use std::sync::Arc;

use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::Plugin;

/// Supplies plugin units to the lifecycle manager.
///
/// How plugins are found (linked in, unpacked from an archive, fetched) is
/// the source's concern; the manager only sees the discovered instances.
pub trait PluginSource: Send + Sync {
    fn name(&self) -> &str;

    fn discover(&self) -> Result<Vec<Arc<dyn Plugin>>, PluginSystemError>;
}

/// Source for plugins linked into the host binary
pub struct StaticPluginSource {
    name: String,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl StaticPluginSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugins: Vec::new(),
        }
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn push(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginSource for StaticPluginSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn discover(&self) -> Result<Vec<Arc<dyn Plugin>>, PluginSystemError> {
        Ok(self.plugins.clone())
    }
}

impl std::fmt::Debug for StaticPluginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticPluginSource")
            .field("name", &self.name)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}
