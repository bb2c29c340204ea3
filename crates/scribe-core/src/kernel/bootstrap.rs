use std::any::TypeId;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::extension::file_type::FileType;
use crate::extension::set::RegistrySet;
use crate::kernel::component::{DependencyRegistry, KernelComponent};
use crate::kernel::config::HostConfig;
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::plugin_system::manager::DefaultPluginManager;
use crate::plugin_system::source::PluginSource;
use crate::storage::local::LocalStorageProvider;
use crate::storage::settings::SettingsStore;
use crate::workspace::manager::WorkspaceManager;

/// Main application struct coordinating components via dependency injection.
///
/// Components are initialized and started in registration order and stopped
/// in reverse: settings, then plugins, then the workspace.
pub struct Application {
    home: PathBuf,
    config: HostConfig,
    initialized: bool,
    registries: Arc<RegistrySet>,
    settings: Arc<SettingsStore>,
    plugin_manager: Arc<DefaultPluginManager>,
    workspace: Arc<WorkspaceManager>,
    dependencies: Arc<Mutex<DependencyRegistry>>,
    component_init_order: Vec<TypeId>,
}

impl Application {
    /// Create an application rooted at `home`
    pub fn new(home: impl Into<PathBuf>, config: HostConfig) -> Result<Self> {
        let home = home.into();
        log::info!("Initializing {} v{} in {}", constants::APP_NAME, constants::APP_VERSION, home.display());

        let registries = RegistrySet::shared();
        registries
            .file_types
            .register(
                Arc::new(FileType::new("Plain Text", ["txt"]).with_description("Plain text")),
                constants::HOST_OWNER,
            )
            .map_err(|e| Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Bootstrap,
                component_name: None,
                message: "Failed to register host file types".to_string(),
                source: Some(Box::new(e.into())),
            })?;

        let mut registry = DependencyRegistry::new();
        let mut init_order = Vec::new();

        let provider = Arc::new(LocalStorageProvider::new(home.clone()));
        let settings = Arc::new(SettingsStore::new(provider, &config.settings_file)?);
        log::info!("Using settings file: {}", settings.location().display());
        registry.register_instance(settings.clone());
        init_order.push(TypeId::of::<SettingsStore>());

        let plugin_manager = Arc::new(
            DefaultPluginManager::new(registries.clone()).with_disabled_plugins(config.disabled_plugins.clone()),
        );
        registry.register_instance(plugin_manager.clone());
        init_order.push(TypeId::of::<DefaultPluginManager>());

        let workspace = Arc::new(WorkspaceManager::new(settings.clone()));
        registry.register_instance(workspace.clone());
        init_order.push(TypeId::of::<WorkspaceManager>());

        Ok(Application {
            home,
            config,
            initialized: false,
            registries,
            settings,
            plugin_manager,
            workspace,
            dependencies: Arc::new(Mutex::new(registry)),
            component_init_order: init_order,
        })
    }

    /// Gets a specific component instance by its concrete type T.
    pub async fn get_component<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        let registry = self.dependencies.lock().await;
        registry.get_concrete::<T>()
    }

    /// Add a plugin source. Must be called before [`Application::run`].
    pub fn add_plugin_source(&self, source: Arc<dyn PluginSource>) {
        self.plugin_manager.add_source(source);
    }

    /// Initialize and start every component
    pub async fn run(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Bootstrap,
                component_name: None,
                message: "Application already initialized".to_string(),
                source: None,
            });
        }

        self.initialize().await?;
        self.start().await?;
        self.initialized = true;
        log::info!("Application initialized and started successfully.");
        Ok(())
    }

    async fn initialize(&mut self) -> Result<()> {
        log::info!("Initializing components...");
        let registry = self.dependencies.lock().await;

        for type_id in &self.component_init_order {
            let component = Self::component_for(&registry, type_id, KernelLifecyclePhase::Initialize)?;
            log::debug!("Initializing component: {}", component.name());
            component.initialize().await.map_err(|e| Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Initialize,
                component_name: Some(component.name().to_string()),
                message: "Component failed to initialize".to_string(),
                source: Some(Box::new(e)),
            })?;
        }
        log::info!("Component initialization complete.");
        Ok(())
    }

    async fn start(&mut self) -> Result<()> {
        log::info!("Starting components...");
        let registry = self.dependencies.lock().await;

        for type_id in &self.component_init_order {
            let component = Self::component_for(&registry, type_id, KernelLifecyclePhase::Start)?;
            log::debug!("Starting component: {}", component.name());
            component.start().await.map_err(|e| Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Start,
                component_name: Some(component.name().to_string()),
                message: "Component failed to start".to_string(),
                source: Some(Box::new(e)),
            })?;
        }
        log::info!("Component start complete.");
        Ok(())
    }

    /// Stop all components in reverse order of initialization.
    ///
    /// Every component is asked to stop; the first failure is returned.
    pub async fn shutdown(&mut self) -> Result<()> {
        log::info!("Shutting down components...");
        let registry = self.dependencies.lock().await;
        let mut first_error = None;

        for type_id in self.component_init_order.iter().rev() {
            let Some(component) = registry.get_component_by_id(type_id) else {
                log::warn!("Component instance not found in registry for TypeId {:?} during stop.", type_id);
                continue;
            };
            log::debug!("Stopping component: {}", component.name());
            if let Err(e) = component.stop().await {
                log::error!("Error stopping component {}: {}", component.name(), e);
                first_error.get_or_insert(Error::KernelLifecycleError {
                    phase: KernelLifecyclePhase::Shutdown,
                    component_name: Some(component.name().to_string()),
                    message: "Component failed to stop".to_string(),
                    source: Some(Box::new(e)),
                });
            }
        }
        self.initialized = false;
        log::info!("Component shutdown complete.");
        first_error.map_or(Ok(()), Err)
    }

    fn component_for(
        registry: &DependencyRegistry,
        type_id: &TypeId,
        phase: KernelLifecyclePhase,
    ) -> Result<Arc<dyn KernelComponent>> {
        registry.get_component_by_id(type_id).ok_or_else(|| {
            log::error!("Component instance not found in registry for TypeId {:?} during {}.", type_id, phase);
            Error::KernelLifecycleError {
                phase,
                component_name: None,
                message: "Instance missing from registry".to_string(),
                source: None,
            }
        })
    }

    /// Returns whether the application has been started.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn registries(&self) -> &Arc<RegistrySet> {
        &self.registries
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    pub fn plugin_manager(&self) -> &Arc<DefaultPluginManager> {
        &self.plugin_manager
    }

    pub fn workspace(&self) -> &Arc<WorkspaceManager> {
        &self.workspace
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("home", &self.home)
            .field("initialized", &self.initialized)
            .field("components", &self.component_init_order.len())
            .finish_non_exhaustive()
    }
}
