//! # Scribe Core Plugin System Errors
//!
//! Defines [`PluginSystemError`], raised by the lifecycle manager, and
//! [`PluginError`], returned by plugin code from its activation and teardown
//! hooks. A plugin's failure is recorded against that plugin and reported;
//! it never aborts the manager or other plugins.
use crate::extension::error::ExtensionError;
use crate::plugin_system::state::PluginState;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin '{plugin_id}' from source '{source_name}' is already loaded")]
    DuplicatePlugin {
        plugin_id: String,
        source_name: String,
    },

    #[error("Plugin id '{plugin_id}' from source '{source_name}' is reserved or empty")]
    ReservedPluginId {
        plugin_id: String,
        source_name: String,
    },

    #[error("Plugin not found: {plugin_id}")]
    PluginNotFound { plugin_id: String },

    #[error("Cannot {operation} plugin '{plugin_id}' in state {state}")]
    InvalidState {
        plugin_id: String,
        operation: &'static str,
        state: PluginState,
    },

    #[error("Plugin '{plugin_id}' failed to activate: {reason}")]
    ActivationFailed { plugin_id: String, reason: String },

    #[error("Plugin '{plugin_id}' failed to deactivate: {reason}")]
    DeactivationFailed { plugin_id: String, reason: String },

    #[error("Plugin discovery failed for source '{source_name}': {message}")]
    DiscoveryFailed {
        source_name: String,
        message: String,
    },

    #[error("Invalid version '{version}' for plugin '{plugin_id}': {source}")]
    InvalidVersion {
        plugin_id: String,
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error(transparent)]
    Extension(#[from] ExtensionError),
}

/// Error returned by a plugin's own hooks
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Plugin activation error: {0}")]
    Activation(String),

    #[error("Plugin teardown error: {0}")]
    Teardown(String),

    #[error("Plugin registration error: {0}")]
    Extension(#[from] ExtensionError),
}
