//! Front-end development server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser ──▶ request id ──▶ trace ──▶ timeout ──▶ body limit ──▶ hook
//!                                                                    │
//!                                           path starts with a proxy prefix?
//!                                              │ yes                 │ no
//!                                              ▼                     ▼
//!                                       upstream backend       static assets
//!                                     (VITE_API_PROXY or       (build/, SPA
//!                                    http://127.0.0.1:8080)      fallback)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use frontend_dev_server::config::ProcessEnv;
use frontend_dev_server::lifecycle::{prepare_config, spawn_signal_listener, StartupOptions};
use frontend_dev_server::observability::init_logging;
use frontend_dev_server::{DevServer, Shutdown};

#[derive(Parser)]
#[command(name = "frontend-dev-server")]
#[command(about = "Development server for the web front-end", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory of built assets, overrides the config file
    #[arg(short, long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = StartupOptions {
        config_path: cli.config,
        bind_address: cli.bind,
        static_dir: cli.static_dir,
    };

    let config = prepare_config(&options, &ProcessEnv)?;
    init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.server.bind_address,
        static_dir = %config.server.static_dir,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let bind_address = config.server.bind_address.clone();
    let server = DevServer::new(config)?;

    let listener = TcpListener::bind(&bind_address).await?;

    let shutdown = Shutdown::new();
    let _signals = spawn_signal_listener(&shutdown);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
