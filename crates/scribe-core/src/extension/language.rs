use std::ops::Deref;
use std::sync::Arc;

use crate::extension::error::ExtensionError;
use crate::extension::registry::{DuplicatePolicy, ExtensionRegistry, Identified};

/// A language known to the editor, identified by a process-wide unique id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    id: String,
    display_name: Option<String>,
}

impl Language {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    /// Override the display name, which otherwise is the id
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

impl Identified for Language {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Registry of languages. Language ids are a contract other extensions
/// depend on, so duplicates are rejected.
#[derive(Debug)]
pub struct LanguageRegistry {
    inner: ExtensionRegistry<Language>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            inner: ExtensionRegistry::new("language", DuplicatePolicy::Reject),
        }
    }

    /// Register a language and return the shared handle file types should reference
    pub fn register_language(&self, language: Language, owner: &str) -> Result<Arc<Language>, ExtensionError> {
        let language = Arc::new(language);
        self.inner.register(language.clone(), owner)?;
        Ok(language)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for LanguageRegistry {
    type Target = ExtensionRegistry<Language>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
