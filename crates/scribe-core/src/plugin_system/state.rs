use std::fmt;

use crate::plugin_system::traits::PluginInfo;

/// Lifecycle state of a loaded plugin.
///
/// `Discovered -> Activating -> Activated -> Deactivated`, or
/// `Activating -> FailedToActivate`, which is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginState {
    Discovered,
    /// Activation hook is running; blocks a concurrent second activation
    Activating,
    Activated,
    Deactivated,
    FailedToActivate(String),
}

impl PluginState {
    pub fn is_active(&self) -> bool {
        matches!(self, PluginState::Activated)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PluginState::FailedToActivate(_))
    }
}

impl fmt::Display for PluginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginState::Discovered => write!(f, "discovered"),
            PluginState::Activating => write!(f, "activating"),
            PluginState::Activated => write!(f, "activated"),
            PluginState::Deactivated => write!(f, "deactivated"),
            PluginState::FailedToActivate(reason) => write!(f, "failed to activate ({})", reason),
        }
    }
}

/// Point-in-time view of one plugin for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginStatus {
    pub info: PluginInfo,
    pub state: PluginState,
    pub enabled: bool,
    /// Name of the source that discovered the plugin
    pub source: String,
}
