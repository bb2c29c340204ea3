use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::kernel::component::KernelComponent;
use crate::kernel::error::Result as KernelResult;
use crate::storage::error::StorageSystemError;
use crate::storage::provider::{StorageProvider, StorageResult};

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// Flat `key=value` lines (.properties)
    Properties,
    /// A single JSON object of string values (.json)
    Json,
}

impl SettingsFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SettingsFormat::Properties => "properties",
            SettingsFormat::Json => "json",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "properties" => Some(SettingsFormat::Properties),
                "json" => Some(SettingsFormat::Json),
                _ => None,
            })
    }

    pub fn serialize(&self, values: &BTreeMap<String, String>) -> StorageResult<String> {
        match self {
            SettingsFormat::Properties => Ok(write_properties(values)),
            SettingsFormat::Json => serde_json::to_string_pretty(values).map_err(|e| {
                StorageSystemError::SerializationError {
                    format: "json".to_string(),
                    source: Box::new(e),
                }
            }),
        }
    }

    pub fn deserialize(&self, data: &str, path: &Path) -> StorageResult<BTreeMap<String, String>> {
        match self {
            SettingsFormat::Properties => parse_properties(data, path),
            SettingsFormat::Json => serde_json::from_str(data).map_err(|e| {
                StorageSystemError::DeserializationError {
                    format: "json".to_string(),
                    source: Box::new(e),
                }
            }),
        }
    }
}

/// Whitespace the properties format treats as insignificant around keys
const BLANKS: [char; 3] = [' ', '\t', '\x0c'];

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '#' | '!' if is_key && i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c if i == 0 && c.is_whitespace() => out.push_str(&format!("\\u{:04X}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

fn write_properties(values: &BTreeMap<String, String>) -> String {
    let mut out = String::from("# Scribe settings\n");
    for (key, value) in values {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

/// Parse `key=value` lines. A line that cannot be read is skipped with a
/// warning; the rest of the file is kept.
fn parse_properties(data: &str, path: &Path) -> StorageResult<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();

    for (index, raw_line) in data.lines().enumerate() {
        let line = raw_line.trim_start_matches(BLANKS);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        match parse_entry(line) {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(message) => {
                let error = StorageSystemError::Parse {
                    path: path.to_path_buf(),
                    line: index + 1,
                    message,
                };
                log::warn!("{}; line skipped", error);
            }
        }
    }

    Ok(values)
}

/// Split one logical line. The key ends at the first unescaped `=`, `:` or
/// blank; a line with no separator is a key with an empty value.
fn parse_entry(line: &str) -> std::result::Result<(String, String), String> {
    let mut key = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => key.push(read_escape(&mut chars)?),
            '=' | ':' => break,
            c if BLANKS.contains(&c) => {
                let rest = chars.as_str().trim_start_matches(BLANKS);
                chars = match rest.strip_prefix(['=', ':']) {
                    Some(after) => after.chars(),
                    None => rest.chars(),
                };
                break;
            }
            _ => key.push(c),
        }
    }

    let mut value = String::new();
    let mut chars = chars.as_str().trim_start_matches(BLANKS).chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => value.push(read_escape(&mut chars)?),
            _ => value.push(c),
        }
    }

    Ok((key, value))
}

/// Decode the character after a backslash
fn read_escape(chars: &mut std::str::Chars<'_>) -> std::result::Result<char, String> {
    match chars.next() {
        None => Err("dangling escape at end of line".to_string()),
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('f') => Ok('\x0c'),
        Some('u') => {
            let hex: String = chars.by_ref().take(4).collect();
            Some(hex.as_str())
                .filter(|hex| hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .and_then(char::from_u32)
                .ok_or_else(|| format!("invalid unicode escape '\\u{}'", hex))
        }
        Some(other) => Ok(other),
    }
}

/// Flat string key/value settings persisted through a [`StorageProvider`].
///
/// The backing file is loaded lazily on the first access of any kind and kept
/// in memory until [`SettingsStore::sync`]. Keys are dot-separated paths such
/// as `files.recent.0`, but the store treats them as opaque strings.
pub struct SettingsStore {
    provider: Arc<dyn StorageProvider>,
    file: PathBuf,
    format: SettingsFormat,
    state: Mutex<Option<LoadedSettings>>,
}

struct LoadedSettings {
    values: BTreeMap<String, String>,
    /// Set when an existing file could not be read; blocks `sync` so the
    /// file is never replaced by a partial map
    load_error: Option<String>,
}

impl SettingsStore {
    /// Create a store over `file`, resolved by the provider. The format is
    /// taken from the extension: `.properties` or `.json`.
    pub fn new(provider: Arc<dyn StorageProvider>, file: impl Into<PathBuf>) -> StorageResult<Self> {
        let file = file.into();
        let format = SettingsFormat::from_path(&file)
            .ok_or_else(|| StorageSystemError::UnsupportedFormat(file.display().to_string()))?;
        Ok(Self {
            provider,
            file,
            format,
            state: Mutex::new(None),
        })
    }

    pub fn format(&self) -> SettingsFormat {
        self.format
    }

    /// Location of the backing file
    pub fn location(&self) -> PathBuf {
        self.provider.resolve(&self.file)
    }

    /// Whether the backing file has been read yet
    pub fn is_loaded(&self) -> bool {
        self.state.lock().is_some()
    }

    fn load(&self) -> LoadedSettings {
        if !self.provider.exists(&self.file) {
            log::debug!("Settings file {} not found, starting empty", self.location().display());
            return LoadedSettings {
                values: BTreeMap::new(),
                load_error: None,
            };
        }

        let result = self
            .provider
            .read_to_string(&self.file)
            .and_then(|content| self.format.deserialize(&content, &self.location()));

        match result {
            Ok(values) => {
                log::debug!("Loaded {} settings from {}", values.len(), self.location().display());
                LoadedSettings {
                    values,
                    load_error: None,
                }
            }
            Err(e) => {
                let message = e.to_string();
                let error = StorageSystemError::persistence(e, "load", self.location());
                log::error!("{}; continuing with empty settings, the file will not be overwritten", error);
                LoadedSettings {
                    values: BTreeMap::new(),
                    load_error: Some(message),
                }
            }
        }
    }

    fn with_loaded<R>(&self, f: impl FnOnce(&mut LoadedSettings) -> R) -> R {
        let mut guard = self.state.lock();
        let loaded = guard.get_or_insert_with(|| self.load());
        f(loaded)
    }

    fn with_values<R>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> R) -> R {
        self.with_loaded(|loaded| f(&mut loaded.values))
    }

    /// Get a value, `None` when the key is absent
    pub fn get(&self, key: &str) -> Option<String> {
        self.with_values(|values| values.get(key).cloned())
    }

    /// Get a value with default
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.with_values(|values| values.contains_key(key))
    }

    /// Set a value in memory. Not durable until [`SettingsStore::sync`].
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        self.with_values(|values| {
            values.insert(key, value);
        });
    }

    /// Remove a value, returning the previous one
    pub fn remove(&self, key: &str) -> Option<String> {
        self.with_values(|values| values.remove(key))
    }

    /// All keys starting with `prefix`, sorted.
    ///
    /// This is a plain string prefix: `"a.b"` also matches `"a.bc"`.
    pub fn keys(&self, prefix: &str) -> Vec<String> {
        self.with_values(|values| {
            values
                .keys()
                .filter(|key| key.starts_with(prefix))
                .cloned()
                .collect()
        })
    }

    /// Write the whole in-memory map to the backing file.
    ///
    /// On failure the in-memory state is left untouched and remains usable.
    /// A file that existed but could not be read is never overwritten.
    pub fn sync(&self) -> StorageResult<()> {
        let content = self.with_loaded(|loaded| match &loaded.load_error {
            Some(message) => Err(StorageSystemError::DeserializationError {
                format: self.format.extension().to_string(),
                source: message.clone().into(),
            }),
            None => self.format.serialize(&loaded.values),
        });
        let content = content.map_err(|e| StorageSystemError::persistence(e, "sync", self.location()))?;

        self.provider
            .write_string(&self.file, &content)
            .map_err(|e| StorageSystemError::persistence(e, "sync", self.location()))?;
        log::debug!("Settings synced to {}", self.location().display());
        Ok(())
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("provider", &self.provider)
            .field("file", &self.file)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl KernelComponent for SettingsStore {
    fn name(&self) -> &'static str {
        "SettingsStore"
    }

    async fn initialize(&self) -> KernelResult<()> {
        Ok(())
    }

    async fn start(&self) -> KernelResult<()> {
        Ok(())
    }

    async fn stop(&self) -> KernelResult<()> {
        // Only flush what was actually read, an untouched store has nothing new
        if self.is_loaded() {
            if let Err(e) = self.sync() {
                log::error!("Settings were not saved on shutdown: {}", e);
            }
        }
        Ok(())
    }
}
