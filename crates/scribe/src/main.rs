mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use scribe_core::kernel::config::{resolve_home, HostConfig};
use scribe_core::kernel::constants;
use scribe_core::plugin_system::StaticPluginSource;
use scribe_core::Application;
use tracing_subscriber::EnvFilter;

// --- Import Core Plugins for Static Registration ---
use core_languages::CoreLanguagesPlugin;

use crate::cli::CliArgs;

/// Route `log` records into a tracing fmt subscriber on stderr.
/// `RUST_LOG` overrides the configured level.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
        return;
    }
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to bridge log records to tracing: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let home = match resolve_home(args.home.clone()) {
        Ok(home) => home,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| home.join(constants::CONFIG_FILE_NAME));
    let config = match HostConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.log_level);
    info!("Using home directory {}", home.display());

    let mut app = match Application::new(home, config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to create application: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // --- Statically Register Core Plugins ---
    app.add_plugin_source(Arc::new(
        StaticPluginSource::new("builtin").with_plugin(Arc::new(CoreLanguagesPlugin::new())),
    ));

    if let Err(e) = app.run().await {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let outcome = match args.command {
        Some(command) => cli::execute(&app, command).await,
        None => {
            cli::print_status(&app).await;
            Ok(())
        }
    };

    if let Err(e) = app.shutdown().await {
        error!("Shutdown failed: {}", e);
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
