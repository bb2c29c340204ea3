pub mod extension;
pub mod kernel;
pub mod plugin_system;
pub mod storage;
pub mod vfs;
pub mod workspace;

// Re-export key public types/traits for easier use by the binary and plugins
pub use kernel::Application;
pub use kernel::error::Error as KernelError;
pub use extension::{FileType, Language, NavigationProvider, NavigationTarget, RegistrySet};
pub use plugin_system::{DefaultPluginManager, Plugin, PluginContext, PluginInfo, PluginManager, PluginSource};
pub use storage::{SettingsStore, StorageProvider};
pub use vfs::{LocalVirtualFile, VirtualFile};
pub use workspace::WorkspaceManager;

// Plugins build their metadata versions with it
pub use semver;
