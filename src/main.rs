//! Basic template service: CLI entry point
//!
//! ```sh
//! # Run with default config (~/.config/basic-template/config.toml)
//! basic-template-service
//!
//! # Custom config path
//! basic-template-service --config /etc/basic-template/config.toml
//!
//! # Override the port
//! basic-template-service --port 8081
//!
//! # Validate config without starting
//! basic-template-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use basic_template::config::{default_config_path, AppConfig};
use basic_template::server::{init_tracing, ServerHandle, ServerOptions};

/// User and role management REST service.
#[derive(Parser, Debug)]
#[command(
    name = "basic-template-service",
    version,
    about = "User and role management REST service",
    long_about = "REST API for users and roles with JWT authentication \
                  and Swagger documentation.\n\n\
                  Default config: ~/.config/basic-template/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "APP_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding the system roles and the admin user.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path)?;

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_defaults: !cli.no_seed,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
