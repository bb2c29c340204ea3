use std::sync::Arc;

use crate::extension::language::Language;
use crate::kernel::bootstrap::*;
use crate::kernel::config::HostConfig;
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase};
use crate::plugin_system::context::PluginContext;
use crate::plugin_system::error::PluginError;
use crate::plugin_system::manager::{DefaultPluginManager, PluginManager};
use crate::plugin_system::source::StaticPluginSource;
use crate::plugin_system::state::PluginState;
use crate::plugin_system::traits::{Plugin, PluginInfo};
use crate::storage::error::StorageSystemError;
use crate::storage::settings::SettingsStore;
use crate::workspace::manager::WorkspaceManager;

use tempfile::tempdir;

struct LanguagePlugin {
    info: PluginInfo,
    language: &'static str,
}

impl LanguagePlugin {
    fn new(id: &str, language: &'static str) -> Arc<Self> {
        Arc::new(Self {
            info: PluginInfo::parse(id, id, "0.1.0").unwrap(),
            language,
        })
    }
}

impl Plugin for LanguagePlugin {
    fn info(&self) -> &PluginInfo {
        &self.info
    }

    fn activate(&self, ctx: &mut PluginContext) -> Result<(), PluginError> {
        ctx.register_language(Language::new(self.language))?;
        Ok(())
    }
}

// Helper function to set up a temporary home directory for testing
fn setup_test_env() -> tempfile::TempDir {
    tempdir().expect("Failed to create temporary directory")
}

#[tokio::test]
async fn test_application_new_registers_components() {
    let temp_dir = setup_test_env();
    let app = Application::new(temp_dir.path(), HostConfig::default()).expect("Application::new failed");

    assert!(app.get_component::<SettingsStore>().await.is_some(), "SettingsStore should be registered");
    assert!(app.get_component::<DefaultPluginManager>().await.is_some(), "DefaultPluginManager should be registered");
    assert!(app.get_component::<WorkspaceManager>().await.is_some(), "WorkspaceManager should be registered");
    assert!(!app.is_initialized());
    assert_eq!(app.home(), temp_dir.path());
    assert_eq!(app.settings().location(), temp_dir.path().join("settings.properties"));
}

#[tokio::test]
async fn test_host_file_types_are_owned_by_host() {
    let temp_dir = setup_test_env();
    let app = Application::new(temp_dir.path(), HostConfig::default()).unwrap();

    let text = app.registries().file_types.file_type_for_extension("TXT").expect("plain text registered");
    assert_eq!(text.name(), "Plain Text");
    assert_eq!(
        app.registries().file_types.owner_of("Plain Text").as_deref(),
        Some(constants::HOST_OWNER)
    );
}

#[tokio::test]
async fn test_application_run_lifecycle() {
    let temp_dir = setup_test_env();
    let mut app = Application::new(temp_dir.path(), HostConfig::default()).unwrap();
    app.add_plugin_source(Arc::new(
        StaticPluginSource::new("builtin").with_plugin(LanguagePlugin::new("xml-support", "xml")),
    ));

    app.run().await.expect("First run should succeed");
    assert!(app.is_initialized());
    assert!(app.registries().languages.get("xml").is_some());
    assert_eq!(app.plugin_manager().list_loaded().await.len(), 1);

    let second = app.run().await;
    assert!(matches!(
        second,
        Err(Error::KernelLifecycleError { phase: KernelLifecyclePhase::Bootstrap, .. })
    ));

    app.settings().put("editor.theme", "dark");
    app.shutdown().await.expect("Shutdown should succeed");
    assert!(!app.is_initialized());
    assert!(app.registries().languages.get("xml").is_none());
    assert_eq!(
        app.plugin_manager().state("xml-support").await,
        Some(PluginState::Deactivated)
    );

    // The settings store flushes on stop
    let fresh = SettingsStore::new(
        Arc::new(crate::storage::local::LocalStorageProvider::new(temp_dir.path().to_path_buf())),
        "settings.properties",
    )
    .unwrap();
    assert_eq!(fresh.get("editor.theme").as_deref(), Some("dark"));
}

#[tokio::test]
async fn test_disabled_plugins_from_config() {
    let temp_dir = setup_test_env();
    let config = HostConfig {
        disabled_plugins: vec!["json-support".to_string()],
        ..HostConfig::default()
    };
    let mut app = Application::new(temp_dir.path(), config).unwrap();
    app.add_plugin_source(Arc::new(
        StaticPluginSource::new("builtin")
            .with_plugin(LanguagePlugin::new("xml-support", "xml"))
            .with_plugin(LanguagePlugin::new("json-support", "json")),
    ));

    app.run().await.unwrap();
    assert!(app.registries().languages.get("xml").is_some());
    assert!(app.registries().languages.get("json").is_none());
    assert_eq!(
        app.plugin_manager().state("json-support").await,
        Some(PluginState::Discovered)
    );
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failing_plugin_does_not_fail_startup() {
    struct Broken(PluginInfo);
    impl Plugin for Broken {
        fn info(&self) -> &PluginInfo {
            &self.0
        }
        fn activate(&self, _ctx: &mut PluginContext) -> Result<(), PluginError> {
            Err(PluginError::Activation("missing grammar".to_string()))
        }
    }

    let temp_dir = setup_test_env();
    let mut app = Application::new(temp_dir.path(), HostConfig::default()).unwrap();
    app.add_plugin_source(Arc::new(
        StaticPluginSource::new("builtin")
            .with_plugin(Arc::new(Broken(PluginInfo::parse("broken", "Broken", "1.0.0").unwrap())))
            .with_plugin(LanguagePlugin::new("rust-support", "rust")),
    ));

    app.run().await.expect("a broken plugin must not abort startup");
    assert!(app.plugin_manager().state("broken").await.unwrap().is_failed());
    assert!(app.registries().languages.get("rust").is_some());
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_run_restores_workspace() {
    let temp_dir = setup_test_env();
    let project = setup_test_env();
    {
        let mut app = Application::new(temp_dir.path(), HostConfig::default()).unwrap();
        app.run().await.unwrap();
        app.workspace().open_workspace(project.path()).unwrap();
        app.shutdown().await.unwrap();
    }

    let mut app = Application::new(temp_dir.path(), HostConfig::default()).unwrap();
    app.run().await.unwrap();
    assert_eq!(app.workspace().workspace_root().as_deref(), Some(project.path()));
    app.shutdown().await.unwrap();
}

#[test]
fn test_unsupported_settings_format_fails_bootstrap() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = HostConfig {
        settings_file: "settings.ini".to_string(),
        ..HostConfig::default()
    };

    match Application::new(temp_dir.path(), config) {
        Err(Error::StorageSystem(StorageSystemError::UnsupportedFormat(file))) => assert_eq!(file, "settings.ini"),
        other => panic!("Expected UnsupportedFormat error, got {:?}", other),
    }
}
