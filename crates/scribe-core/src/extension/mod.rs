//! # Scribe Core Extension Points
//!
//! The registries plugins populate and the host queries:
//!
//! - **[`registry`]**: the generic [`ExtensionRegistry`], a lock-protected,
//!   registration-ordered map with per-entry provenance and a duplicate
//!   policy ([`DuplicatePolicy`]).
//! - **[`language`]**, **[`file_type`]**, **[`navigation`]**, **[`view`]**:
//!   the typed extension points built on it.
//! - **[`set`]**: [`RegistrySet`], the single object holding every registry.
//!   It is created by the host and passed around explicitly; there is no
//!   global registry state.
//!
//! Languages, file types and navigation providers reject duplicate
//! identifiers. View registries ignore duplicates.
pub mod error;
pub mod file_type;
pub mod language;
pub mod navigation;
pub mod registry;
pub mod set;
pub mod view;

pub use error::ExtensionError;
pub use file_type::{FileType, FileTypeRegistry};
pub use language::{Language, LanguageRegistry};
pub use navigation::{NavigationProvider, NavigationRegistry, NavigationTarget};
pub use registry::{DuplicatePolicy, ExtensionRegistry, Identified};
pub use set::RegistrySet;
pub use view::{CachedViewProvider, View, ViewContribution, ViewProvider, ViewRegistry};

// Test module declaration
#[cfg(test)]
mod tests;
