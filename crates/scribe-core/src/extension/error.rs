//! # Scribe Core Extension Errors
//!
//! Errors raised by the extension registries. Lookup misses are not errors:
//! registries return `Option` for advisory lookups and only use
//! [`ExtensionError::NotFound`] where the caller asserted presence, such as
//! unregistering.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    #[error("Duplicate {kind} registration '{id}' by '{owner}': already registered by '{existing_owner}'")]
    DuplicateRegistration {
        kind: &'static str,
        id: String,
        owner: String,
        existing_owner: String,
    },

    #[error("'{owner}' cannot unregister {kind} '{id}' owned by '{actual_owner}'")]
    NotOwner {
        kind: &'static str,
        id: String,
        owner: String,
        actual_owner: String,
    },

    #[error("No {kind} registered with id '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("Failed to construct view '{label}': {message}")]
    ViewConstruction { label: String, message: String },
}
