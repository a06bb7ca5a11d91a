//! DocVault Server: versioned multi-user file storage.
//!
//! Main entry point: loads configuration, initialises logging, and hands
//! off to the API crate's server runner.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use docvault_core::config::AppConfig;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "docvault-server", version, about = "Versioned file storage server")]
struct Args {
    /// Environment name; selects `<config-dir>/<env>.toml` on top of the defaults.
    #[arg(long, env = "DOCVAULT_ENV", default_value = "development")]
    env: String,

    /// Directory holding `default.toml` and the per-environment files.
    #[arg(long, env = "DOCVAULT_CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Override `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        env = %args.env,
        version = env!("CARGO_PKG_VERSION"),
        "Configuration loaded"
    );

    if let Err(e) = docvault_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment, then apply CLI overrides.
fn load_configuration(args: &Args) -> Result<AppConfig, docvault_core::AppError> {
    let mut config = AppConfig::load_from(&args.config_dir, &args.env)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    Ok(config)
}

/// Initialize tracing. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
