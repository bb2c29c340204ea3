//! # Scribe Core Plugin System
//!
//! Loads plugin units, activates them so they can contribute extensions, and
//! tears them down again.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`traits`]**: the [`Plugin`] trait and its [`PluginInfo`] metadata.
//! - **[`context`]**: [`PluginContext`], the capability object a plugin
//!   registers through. Every registration carries the plugin's id so it can
//!   be removed on deactivation.
//! - **[`source`]**: [`PluginSource`], the discovery collaborator, and
//!   [`StaticPluginSource`] for plugins linked into the host.
//! - **[`state`]**: [`PluginState`] and [`PluginStatus`].
//! - **[`manager`]**: the [`PluginManager`] interface and
//!   [`DefaultPluginManager`], which runs plugin hooks on blocking workers and
//!   isolates one plugin's failure from the rest.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError) and
//!   [`PluginError`](error::PluginError).
pub mod context;
pub mod error;
pub mod manager;
pub mod source;
pub mod state;
pub mod traits;

pub use context::PluginContext;
pub use error::{PluginError, PluginSystemError};
pub use manager::{ActivationReport, DefaultPluginManager, LoadReport, PluginManager};
pub use source::{PluginSource, StaticPluginSource};
pub use state::{PluginState, PluginStatus};
pub use traits::{Plugin, PluginInfo};
