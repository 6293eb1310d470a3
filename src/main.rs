//! Student roster and messaging relay (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                ROSTER RELAY                  │
//!   Client Request     │  ┌────────┐   ┌─────────────┐   ┌─────────┐  │
//!   ───────────────────┼─▶│  http  │──▶│  students   │──▶│  store  │──┼──▶ Hosted table API
//!                      │  │ server │   │  whatsapp   │──▶│messaging│──┼──▶ Messaging API
//!                      │  └────────┘   └─────────────┘   └─────────┘  │
//!   Client Response    │       ▲                                      │
//!   ◀──────────────────┼───────┘ {success, message, data}             │
//!                      │                                              │
//!                      │  config · observability · lifecycle          │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use roster_relay::config;
use roster_relay::http::HttpServer;
use roster_relay::lifecycle::Shutdown;
use roster_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "roster-relay")]
#[command(about = "Student roster and messaging relay", long_about = None)]
struct Args {
    /// Optional TOML config file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!("roster-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        path_prefix = %config.listener.path_prefix,
        store_configured = !config.store.url.is_empty(),
        messaging_configured = !config.messaging.api_url.is_empty(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
