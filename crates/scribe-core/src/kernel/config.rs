use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::kernel::constants;
use crate::kernel::error::{Error, Result};

/// Host configuration, read once at startup.
///
/// Every field has a default, so a missing file or a partial one is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Settings file, relative to the home directory
    pub settings_file: String,
    /// Plugin ids that are loaded but not activated
    pub disabled_plugins: Vec<String>,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            settings_file: constants::DEFAULT_SETTINGS_FILE.to_string(),
            disabled_plugins: Vec::new(),
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl HostConfig {
    /// Load the configuration at `path`; a missing file yields the defaults.
    ///
    /// The format follows the extension: `.toml` (with the `toml-config`
    /// feature) or `.json`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No host configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&data, path)
    }

    fn parse(data: &str, path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            #[cfg(feature = "toml-config")]
            Some("toml") => toml::from_str(data)
                .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e))),
            Some("json") => serde_json::from_str(data)
                .map_err(|e| Error::Config(format!("Invalid JSON in {}: {}", path.display(), e))),
            _ => Err(Error::Config(format!(
                "Unsupported configuration format for {}",
                path.display()
            ))),
        }
    }

    /// Absolute location of the settings file under `home`
    pub fn settings_path(&self, home: &Path) -> PathBuf {
        home.join(&self.settings_file)
    }
}

/// Resolve the home directory: an explicit path, else `SCRIBE_HOME`, else the
/// platform config directory.
pub fn resolve_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = explicit {
        return Ok(home);
    }
    if let Some(home) = env::var_os(constants::HOME_ENV_VAR).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::config_dir()
        .map(|dir| dir.join(constants::CONFIG_DIR_NAME))
        .ok_or_else(|| Error::Config("Could not determine a configuration directory".to_string()))
}
