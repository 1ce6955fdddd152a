//! http-front server binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ net::listener ──▶ http::server ──▶ http::parser ──▶ Request
//!                (bounded accept)   (blocking pool)   (line grammar)
//!                                        │
//!     Client ◀── http::response ◀────────┘  status-only reply, then close
//!
//!     config::store ── ServerConfig ──▶ listener, parser limits, timeouts
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use http_front::config::{ConfigStore, ServerConfig};
use http_front::http::HttpServer;
use http_front::lifecycle::shutdown::{on_ctrl_c, Shutdown};
use http_front::net::Listener;
use http_front::observability::logging;

#[derive(Parser)]
#[command(name = "http-front")]
#[command(about = "Minimal HTTP/1.x front end that validates request heads", long_about = None)]
struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let store = ConfigStore::new();
    match &cli.config {
        Some(path) => store.load(path)?,
        None => store.set(ServerConfig::default())?,
    };
    let config = store.current()?;

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init(level)?;

    tracing::info!("http-front v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        max_line_length = config.parser.max_line_length,
        read_timeout_secs = config.timeouts.read_secs,
        "Configuration loaded"
    );

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = Arc::clone(&shutdown);
    tokio::spawn(async move {
        on_ctrl_c(&signal_shutdown).await;
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
