use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::Mutex;
use tokio::task::JoinError;

use crate::extension::set::RegistrySet;
use crate::kernel::component::KernelComponent;
use crate::kernel::constants::HOST_OWNER;
use crate::kernel::error::Result;
use crate::plugin_system::context::PluginContext;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::source::PluginSource;
use crate::plugin_system::state::{PluginState, PluginStatus};
use crate::plugin_system::traits::{Plugin, PluginInfo};

/// Outcome of [`PluginManager::load_all`]
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Plugins added to the table, in discovery order
    pub loaded: Vec<PluginInfo>,
    /// Failing sources and rejected duplicates
    pub errors: Vec<PluginSystemError>,
}

/// Outcome of [`PluginManager::activate_all`]
#[derive(Debug, Default)]
pub struct ActivationReport {
    pub activated: Vec<String>,
    /// Plugin id and failure reason
    pub failed: Vec<(String, String)>,
    /// Disabled plugins that were left alone
    pub skipped: Vec<String>,
}

/// Plugin lifecycle component interface
#[async_trait]
pub trait PluginManager: KernelComponent {
    /// Discover plugins from every source. A failing source is logged and
    /// skipped; a plugin id that is already loaded is rejected.
    async fn load_all(&self, sources: &[Arc<dyn PluginSource>]) -> LoadReport;

    /// Activate a discovered plugin
    async fn activate(&self, id: &str) -> Result<()>;

    /// Activate every discovered, enabled plugin in discovery order
    async fn activate_all(&self) -> ActivationReport;

    /// Run a plugin's teardown hook and remove everything it registered
    async fn deactivate(&self, id: &str) -> Result<()>;

    /// Deactivate every active plugin in reverse activation order.
    /// Returns the number of plugins deactivated.
    async fn deactivate_all(&self) -> usize;

    /// Metadata of the currently activated plugins
    async fn list_loaded(&self) -> Vec<PluginInfo>;

    /// Every known plugin with its state
    async fn plugins(&self) -> Vec<PluginStatus>;

    async fn state(&self, id: &str) -> Option<PluginState>;

    async fn get_plugin(&self, id: &str) -> Option<Arc<dyn Plugin>>;

    /// Enable or disable a loaded plugin for [`activate_all`](Self::activate_all)
    async fn set_enabled(&self, id: &str, enabled: bool) -> Result<()>;

    async fn is_enabled(&self, id: &str) -> Result<bool>;
}

struct PluginEntry {
    plugin: Arc<dyn Plugin>,
    info: PluginInfo,
    state: PluginState,
    enabled: bool,
    source: String,
    /// Teardown already ran for a plugin that failed to activate
    cleaned_up: bool,
}

impl PluginEntry {
    fn status(&self) -> PluginStatus {
        PluginStatus {
            info: self.info.clone(),
            state: self.state.clone(),
            enabled: self.enabled,
            source: self.source.clone(),
        }
    }
}

#[derive(Default)]
struct PluginTable {
    entries: IndexMap<String, PluginEntry>,
    activation_order: Vec<String>,
    disabled: HashSet<String>,
}

/// Default implementation of the plugin lifecycle manager.
///
/// Plugin hooks run on tokio's blocking pool; the table lock is never held
/// while a hook runs.
pub struct DefaultPluginManager {
    name: &'static str,
    registries: Arc<RegistrySet>,
    sources: parking_lot::Mutex<Vec<Arc<dyn PluginSource>>>,
    table: Arc<Mutex<PluginTable>>,
}

impl DefaultPluginManager {
    pub fn new(registries: Arc<RegistrySet>) -> Self {
        Self {
            name: "DefaultPluginManager",
            registries,
            sources: parking_lot::Mutex::new(Vec::new()),
            table: Arc::new(Mutex::new(PluginTable::default())),
        }
    }

    /// Plugins with these ids are loaded disabled
    pub fn with_disabled_plugins<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let disabled = ids.into_iter().map(Into::into).collect();
        match Arc::get_mut(&mut self.table) {
            Some(table) => table.get_mut().disabled = disabled,
            None => log::warn!("Plugin table already shared; disabled plugin list ignored"),
        }
        self
    }

    /// Add a source consulted by [`KernelComponent::initialize`]
    pub fn add_source(&self, source: Arc<dyn PluginSource>) {
        self.sources.lock().push(source);
    }

    pub fn registries(&self) -> &Arc<RegistrySet> {
        &self.registries
    }
}

/// Describe why a blocking hook did not return normally
fn join_failure_reason(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {}", msg)
    } else {
        "panicked".to_string()
    }
}

/// Run the activation hook on the blocking pool and record the outcome.
/// A failed activation has its partial registrations rolled back.
async fn run_activation(
    table: Arc<Mutex<PluginTable>>,
    registries: Arc<RegistrySet>,
    plugin: Arc<dyn Plugin>,
    id: String,
) -> Result<()> {
    let mut ctx = PluginContext::new(id.as_str(), registries.clone());
    let outcome = tokio::task::spawn_blocking(move || {
        let result = plugin.activate(&mut ctx);
        (result, ctx.registration_count())
    })
    .await;

    let failure = match outcome {
        Ok((Ok(()), registrations)) => {
            log::info!("Activated plugin '{}' ({} registration(s))", id, registrations);
            None
        }
        Ok((Err(e), _)) => Some(e.to_string()),
        Err(join_err) => Some(join_failure_reason(join_err)),
    };

    let mut table = table.lock().await;
    match failure {
        None => {
            if let Some(entry) = table.entries.get_mut(&id) {
                entry.state = PluginState::Activated;
            }
            table.activation_order.push(id);
            Ok(())
        }
        Some(reason) => {
            let removed = registries.purge_owner(&id);
            log::error!(
                "Plugin '{}' failed to activate: {} ({} partial registration(s) rolled back)",
                id,
                reason,
                removed
            );
            if let Some(entry) = table.entries.get_mut(&id) {
                entry.state = PluginState::FailedToActivate(reason.clone());
            }
            Err(PluginSystemError::ActivationFailed { plugin_id: id, reason }.into())
        }
    }
}

impl Debug for DefaultPluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultPluginManager")
            .field("name", &self.name)
            .field("sources", &self.sources.lock().len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KernelComponent for DefaultPluginManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        let sources = self.sources.lock().clone();
        let report = self.load_all(&sources).await;
        log::info!(
            "Plugin manager initialized: {} plugin(s) loaded from {} source(s), {} error(s)",
            report.loaded.len(),
            sources.len(),
            report.errors.len()
        );
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        let report = self.activate_all().await;
        log::info!(
            "Plugin activation finished: {} activated, {} failed, {} skipped",
            report.activated.len(),
            report.failed.len(),
            report.skipped.len()
        );
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let count = self.deactivate_all().await;
        log::info!("Deactivated {} plugin(s)", count);
        Ok(())
    }
}

#[async_trait]
impl PluginManager for DefaultPluginManager {
    async fn load_all(&self, sources: &[Arc<dyn PluginSource>]) -> LoadReport {
        let mut report = LoadReport::default();

        for source in sources {
            let discovered = match source.discover() {
                Ok(plugins) => plugins,
                Err(e) => {
                    log::error!("Skipping plugin source '{}': {}", source.name(), e);
                    report.errors.push(e);
                    continue;
                }
            };

            let mut table = self.table.lock().await;
            for plugin in discovered {
                let info = plugin.info().clone();
                let id = info.id().to_string();

                // Registrations are owned by the plugin id, so it must not collide with the host
                if id.trim().is_empty() || id == HOST_OWNER {
                    let err = PluginSystemError::ReservedPluginId {
                        plugin_id: id,
                        source_name: source.name().to_string(),
                    };
                    log::error!("{}; plugin rejected", err);
                    report.errors.push(err);
                    continue;
                }

                if let Some(existing) = table.entries.get(&id) {
                    let err = PluginSystemError::DuplicatePlugin {
                        plugin_id: id,
                        source_name: source.name().to_string(),
                    };
                    log::warn!("{}; keeping the one from '{}'", err, existing.source);
                    report.errors.push(err);
                    continue;
                }

                let enabled = !table.disabled.contains(&id);
                log::debug!("Discovered plugin {} from '{}' (enabled: {})", info, source.name(), enabled);
                table.entries.insert(
                    id,
                    PluginEntry {
                        plugin,
                        info: info.clone(),
                        state: PluginState::Discovered,
                        enabled,
                        source: source.name().to_string(),
                        cleaned_up: false,
                    },
                );
                report.loaded.push(info);
            }
        }

        report
    }

    async fn activate(&self, id: &str) -> Result<()> {
        let plugin = {
            let mut table = self.table.lock().await;
            let entry = table.entries.get_mut(id).ok_or_else(|| PluginSystemError::PluginNotFound {
                plugin_id: id.to_string(),
            })?;
            if entry.state != PluginState::Discovered {
                return Err(PluginSystemError::InvalidState {
                    plugin_id: id.to_string(),
                    operation: "activate",
                    state: entry.state.clone(),
                }
                .into());
            }
            entry.state = PluginState::Activating;
            entry.plugin.clone()
        };

        // Finishes on its own task, so a dropped caller cannot leave the plugin in Activating
        let finish = tokio::spawn(run_activation(
            self.table.clone(),
            self.registries.clone(),
            plugin,
            id.to_string(),
        ));
        match finish.await {
            Ok(result) => result,
            Err(join_err) => Err(PluginSystemError::ActivationFailed {
                plugin_id: id.to_string(),
                reason: join_failure_reason(join_err),
            }
            .into()),
        }
    }

    async fn activate_all(&self) -> ActivationReport {
        let mut report = ActivationReport::default();
        let candidates: Vec<String> = {
            let table = self.table.lock().await;
            table
                .entries
                .iter()
                .filter(|(_, entry)| entry.state == PluginState::Discovered)
                .filter_map(|(id, entry)| {
                    if entry.enabled {
                        Some(id.clone())
                    } else {
                        report.skipped.push(id.clone());
                        None
                    }
                })
                .collect()
        };

        for id in candidates {
            match self.activate(&id).await {
                Ok(()) => report.activated.push(id),
                Err(e) => report.failed.push((id, e.to_string())),
            }
        }
        report
    }

    async fn deactivate(&self, id: &str) -> Result<()> {
        let plugin = {
            let mut table = self.table.lock().await;
            let entry = table.entries.get_mut(id).ok_or_else(|| PluginSystemError::PluginNotFound {
                plugin_id: id.to_string(),
            })?;
            match entry.state.clone() {
                PluginState::Activated => entry.state = PluginState::Deactivated,
                // Stays terminal; the teardown hook runs once for cleanup
                PluginState::FailedToActivate(_) if !entry.cleaned_up => entry.cleaned_up = true,
                other => {
                    return Err(PluginSystemError::InvalidState {
                        plugin_id: id.to_string(),
                        operation: "deactivate",
                        state: other,
                    }
                    .into());
                }
            }
            let plugin = entry.plugin.clone();
            table.activation_order.retain(|active| active != id);
            plugin
        };

        let teardown = tokio::task::spawn_blocking(move || plugin.deactivate()).await;
        let failure = match teardown {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(join_err) => Some(join_failure_reason(join_err)),
        };
        if let Some(reason) = failure {
            let err = PluginSystemError::DeactivationFailed {
                plugin_id: id.to_string(),
                reason,
            };
            log::warn!("{}; continuing cleanup", err);
        }

        let removed = self.registries.purge_owner(id);
        log::info!("Deactivated plugin '{}' ({} registration(s) removed)", id, removed);
        Ok(())
    }

    async fn deactivate_all(&self) -> usize {
        let order: Vec<String> = {
            let table = self.table.lock().await;
            table.activation_order.iter().rev().cloned().collect()
        };

        let mut count = 0;
        for id in order {
            match self.deactivate(&id).await {
                Ok(()) => count += 1,
                Err(e) => log::warn!("Failed to deactivate plugin '{}': {}", id, e),
            }
        }
        count
    }

    async fn list_loaded(&self) -> Vec<PluginInfo> {
        let table = self.table.lock().await;
        table
            .entries
            .values()
            .filter(|entry| entry.state.is_active())
            .map(|entry| entry.info.clone())
            .collect()
    }

    async fn plugins(&self) -> Vec<PluginStatus> {
        let table = self.table.lock().await;
        table.entries.values().map(PluginEntry::status).collect()
    }

    async fn state(&self, id: &str) -> Option<PluginState> {
        let table = self.table.lock().await;
        table.entries.get(id).map(|entry| entry.state.clone())
    }

    async fn get_plugin(&self, id: &str) -> Option<Arc<dyn Plugin>> {
        let table = self.table.lock().await;
        table.entries.get(id).map(|entry| entry.plugin.clone())
    }

    async fn set_enabled(&self, id: &str, enabled: bool) -> Result<()> {
        let mut table = self.table.lock().await;
        let entry = table.entries.get_mut(id).ok_or_else(|| PluginSystemError::PluginNotFound {
            plugin_id: id.to_string(),
        })?;
        entry.enabled = enabled;
        if enabled {
            table.disabled.remove(id);
        } else {
            table.disabled.insert(id.to_string());
        }
        Ok(())
    }

    async fn is_enabled(&self, id: &str) -> Result<bool> {
        let table = self.table.lock().await;
        table
            .entries
            .get(id)
            .map(|entry| entry.enabled)
            .ok_or_else(|| {
                PluginSystemError::PluginNotFound {
                    plugin_id: id.to_string(),
                }
                .into()
            })
    }
}
