/// Application name
pub const APP_NAME: &str = "Scribe";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owner recorded for extensions the host registers itself
pub const HOST_OWNER: &str = "host";

/// Environment variable overriding the home directory
pub const HOME_ENV_VAR: &str = "SCRIBE_HOME";

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "scribe";

/// Host configuration file inside the home directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings file inside the home directory
pub const DEFAULT_SETTINGS_FILE: &str = "settings.properties";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum number of recent files kept
pub const RECENT_FILES_LIMIT: usize = 10;

/// Settings key prefix of the recent file entries
pub const RECENT_FILES_PREFIX: &str = "files.recent.";

/// Settings key of the last opened workspace root
pub const WORKSPACE_ROOT_KEY: &str = "workspace.root";
