use std::fmt;

use semver::Version;

use crate::plugin_system::context::PluginContext;
use crate::plugin_system::error::{PluginError, PluginSystemError};

/// Immutable plugin metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    id: String,
    name: String,
    version: Version,
}

impl PluginInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: Version) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version,
        }
    }

    /// Build the metadata from a version string such as `"1.2.0"`
    pub fn parse(id: impl Into<String>, name: impl Into<String>, version: &str) -> Result<Self, PluginSystemError> {
        let id = id.into();
        let version = Version::parse(version).map_err(|source| PluginSystemError::InvalidVersion {
            plugin_id: id.clone(),
            version: version.to_string(),
            source,
        })?;
        Ok(Self::new(id, name, version))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl fmt::Display for PluginInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.id, self.name, self.version)
    }
}

/// Core trait that all plugins must implement.
///
/// `activate` is the single entry point through which a plugin contributes
/// extensions; everything it registers through the context is attributed to
/// the plugin and removed again when it is deactivated. Both hooks run on a
/// blocking worker thread, so they may do synchronous I/O.
pub trait Plugin: Send + Sync {
    fn info(&self) -> &PluginInfo;

    fn activate(&self, ctx: &mut PluginContext) -> Result<(), PluginError>;

    /// Optional teardown hook, called on deactivation
    fn deactivate(&self) -> Result<(), PluginError> {
        Ok(())
    }
}

impl fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin").field("info", self.info()).finish()
    }
}
