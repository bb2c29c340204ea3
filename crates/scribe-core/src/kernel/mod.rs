//! # Scribe Core Kernel
//!
//! Bootstraps the host and coordinates its components.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Bootstrapping**: [`Application`](bootstrap::Application)
//!   builds the shared [`RegistrySet`](crate::extension::RegistrySet), the
//!   settings store, the plugin manager and the workspace manager, then drives
//!   their lifecycle.
//! - **Component Lifecycle**: the [`KernelComponent`](component::KernelComponent)
//!   trait and the [`DependencyRegistry`](component::DependencyRegistry) that
//!   holds components by concrete type.
//! - **Configuration**: [`HostConfig`](config::HostConfig) and home directory
//!   resolution.
//! - **Core Constants**: the `constants` submodule.
//! - **Error Handling**: the aggregate [`Error`](error::Error) and `Result`
//!   alias.
pub mod bootstrap;
pub mod component;
pub mod config;
pub mod constants;
pub mod error;

pub use bootstrap::Application;
pub use component::{DependencyRegistry, KernelComponent};
pub use config::{resolve_home, HostConfig};
pub use error::{Error, Result};

// Test module declaration
#[cfg(test)]
mod tests;
