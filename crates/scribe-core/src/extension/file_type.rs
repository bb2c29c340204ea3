use std::ops::Deref;
use std::sync::Arc;

use crate::extension::language::Language;
use crate::extension::registry::{DuplicatePolicy, ExtensionRegistry, Identified};
use crate::vfs::VirtualFile;

/// Normalize an extension for matching: no leading dot, lowercase
fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// A file type recognized by extension.
///
/// A file type with an owning [`Language`] is a language file type; a
/// language's associated file type is the first registered one that
/// references it.
#[derive(Debug, Clone)]
pub struct FileType {
    name: String,
    description: String,
    binary: bool,
    extensions: Vec<String>,
    icon: Option<String>,
    language: Option<Arc<Language>>,
}

impl FileType {
    /// A text file type without a language
    pub fn new<I, S>(name: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        Self {
            description: name.clone(),
            name,
            binary: false,
            extensions: extensions.into_iter().map(|ext| normalize_extension(ext.as_ref())).collect(),
            icon: None,
            language: None,
        }
    }

    /// A text file type owned by `language`, named after the language's display name
    pub fn for_language<I, S>(language: Arc<Language>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut file_type = Self::new(language.display_name().to_string(), extensions);
        file_type.language = Some(language);
        file_type
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark the type as binary content
    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn language(&self) -> Option<&Arc<Language>> {
        self.language.as_ref()
    }

    pub fn is_language_file_type(&self) -> bool {
        self.language.is_some()
    }

    /// Case-insensitive extension match; a leading dot is ignored
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = normalize_extension(ext);
        self.extensions.iter().any(|known| *known == ext)
    }
}

impl Identified for FileType {
    fn id(&self) -> &str {
        &self.name
    }
}

/// Registry of file types, keyed by name. Duplicate names are rejected.
#[derive(Debug)]
pub struct FileTypeRegistry {
    inner: ExtensionRegistry<FileType>,
}

impl FileTypeRegistry {
    pub fn new() -> Self {
        Self {
            inner: ExtensionRegistry::new("file type", DuplicatePolicy::Reject),
        }
    }

    /// The first registered file type owned by the language `language_id`
    pub fn associated_file_type(&self, language_id: &str) -> Option<Arc<FileType>> {
        self.inner
            .find_first(|file_type| file_type.language().is_some_and(|lang| lang.id() == language_id))
    }

    /// The first registered file type recognizing `ext`
    pub fn file_type_for_extension(&self, ext: &str) -> Option<Arc<FileType>> {
        if ext.trim_start_matches('.').is_empty() {
            return None;
        }
        self.inner.find_first(|file_type| file_type.matches_extension(ext))
    }

    /// Resolve the file type of `file` from its extension. Directories have none.
    pub fn file_type_for(&self, file: &dyn VirtualFile) -> Option<Arc<FileType>> {
        if file.is_directory() {
            return None;
        }
        file.extension()
            .and_then(|ext| self.file_type_for_extension(&ext))
    }
}

impl Default for FileTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for FileTypeRegistry {
    type Target = ExtensionRegistry<FileType>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
