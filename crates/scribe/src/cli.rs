use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use scribe_core::kernel::constants::{APP_NAME, APP_VERSION};
use scribe_core::kernel::error::{Error, Result};
use scribe_core::plugin_system::PluginManager;
use scribe_core::vfs::{LocalVirtualFile, TextEncoding, VirtualFile};
use scribe_core::Application;

/// Scribe: the extension and workspace core of a pluggable editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Simple ping command for testing
    #[arg(long)]
    pub ping: bool,

    /// Home directory holding settings and configuration
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Host configuration file (defaults to config.toml in the home directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect plugins
    Plugins {
        #[command(subcommand)]
        command: PluginCommand,
    },
    /// List registered languages
    Languages,
    /// List registered file types
    FileTypes,
    /// Show the file type of a file
    FileType {
        path: PathBuf,
    },
    /// Find the definition of the symbol at a character offset
    Goto {
        path: PathBuf,
        offset: usize,
    },
    /// Open a workspace root
    Open {
        dir: PathBuf,
    },
    /// Manage recently used files
    Recent {
        #[command(subcommand)]
        command: RecentCommand,
    },
    /// Read and write settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum PluginCommand {
    /// List loaded plugins with their state
    List,
}

#[derive(Subcommand, Debug)]
pub enum RecentCommand {
    /// Print recent files, most recent first
    List,
    /// Record a file as most recently used
    Add { path: PathBuf },
    /// Forget all recent files
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print a setting
    Get { key: String },
    /// Set a setting and save it
    Set { key: String, value: String },
    /// List setting keys starting with a prefix
    Keys { prefix: Option<String> },
}

/// Print a short status summary when no command is given
pub async fn print_status(app: &Application) {
    let plugins = app.plugin_manager().plugins().await;
    let active = plugins.iter().filter(|status| status.state.is_active()).count();
    println!("{} v{}", APP_NAME, APP_VERSION);
    println!("Home: {}", app.home().display());
    println!("Plugins: {} loaded, {} active", plugins.len(), active);
    println!("Languages: {}", app.registries().languages.len());
    match app.workspace().workspace_root() {
        Some(root) => println!("Workspace: {}", root.display()),
        None => println!("Workspace: none"),
    }
}

pub async fn execute(app: &Application, command: Commands) -> Result<()> {
    match command {
        Commands::Plugins {
            command: PluginCommand::List,
        } => {
            for status in app.plugin_manager().plugins().await {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    status.info.id(),
                    status.info.name(),
                    status.info.version(),
                    status.state,
                    if status.enabled { "enabled" } else { "disabled" }
                );
            }
        }
        Commands::Languages => {
            let languages = &app.registries().languages;
            for language in languages.all() {
                let owner = languages.owner_of(language.id()).unwrap_or_default();
                println!("{}\t{}\t{}", language.id(), language.display_name(), owner);
            }
        }
        Commands::FileTypes => {
            for file_type in app.registries().file_types.all() {
                println!(
                    "{}\t{}\t{}\t{}",
                    file_type.name(),
                    file_type.extensions().join(","),
                    file_type.language().map(|lang| lang.id()).unwrap_or("-"),
                    if file_type.is_binary() { "binary" } else { "text" }
                );
            }
        }
        Commands::FileType { path } => {
            let file = LocalVirtualFile::new(path);
            match app.registries().file_types.file_type_for(&file) {
                Some(file_type) => println!("{}", file_type.name()),
                None => println!("unknown"),
            }
        }
        Commands::Goto { path, offset } => {
            let file: Arc<dyn VirtualFile> = LocalVirtualFile::shared(path);
            let contents = file.read_text(TextEncoding::Utf8)?;
            match app.registries().navigation.goto_definition(&file, offset, &contents) {
                Some(target) => println!("{}:{}", target.file().path(), target.offset()),
                None => println!("no definition found"),
            }
        }
        Commands::Open { dir } => {
            app.workspace().open_workspace(&dir)?;
            println!("Opened workspace {}", dir.display());
        }
        Commands::Recent { command } => match command {
            RecentCommand::List => {
                for path in app.workspace().recent_files() {
                    println!("{}", path.display());
                }
            }
            RecentCommand::Add { path } => {
                let path = path
                    .canonicalize()
                    .map_err(|e| Error::Other(format!("Cannot add {}: {}", path.display(), e)))?;
                app.workspace().add_recent_file(&path)?;
                println!("Added {}", path.display());
            }
            RecentCommand::Clear => {
                app.workspace().clear_recent_files()?;
                println!("Cleared recent files");
            }
        },
        Commands::Settings { command } => match command {
            SettingsCommand::Get { key } => match app.settings().get(&key) {
                Some(value) => println!("{}", value),
                None => return Err(Error::Other(format!("Setting '{}' is not set", key))),
            },
            SettingsCommand::Set { key, value } => {
                app.settings().put(key.as_str(), value);
                app.settings().sync()?;
                println!("Saved {}", key);
            }
            SettingsCommand::Keys { prefix } => {
                for key in app.settings().keys(prefix.as_deref().unwrap_or("")) {
                    println!("{}", key);
                }
            }
        },
    }
    Ok(())
}
