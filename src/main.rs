//! E-commerce API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                   API GATEWAY                     │
//!   Client Request      │  ┌────────┐   ┌────────────┐   ┌──────────────┐  │
//!   ────────────────────┼─▶│  http  │──▶│  routing   │──▶│     auth     │  │
//!                       │  │ server │   │  (public?) │   │  (verifier)  │  │
//!                       │  └────────┘   └────────────┘   └──────┬───────┘  │
//!                       │                                       ▼          │
//!                       │                               ┌──────────────┐   │
//!                       │                               │ route table  │   │
//!                       │                               └──────┬───────┘   │
//!                       │                                      ▼           │
//!   Client Response     │  ┌──────────┐                ┌──────────────┐    │
//!   ◀───────────────────┼──│ response │◀───────────────│  forwarder   │◀───┼──── auth / product /
//!                       │  └──────────┘                └──────────────┘    │     order / payment
//!                       └──────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_gateway::config::load_config;
use api_gateway::lifecycle::{spawn_signal_handler, Shutdown};
use api_gateway::observability::{logging, metrics};
use api_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "API gateway for the e-commerce services", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load and validate the configuration, print the route table, and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if cli.check {
        for route in &config.routes {
            let public = config.public_routes.iter().any(|p| route.path_prefix.starts_with(p.as_str()));
            println!(
                "{:<28} -> {:<8} {}{}",
                route.path_prefix,
                route.service,
                config.service_url(&route.service).unwrap_or("?"),
                if public { "  (public)" } else { "" }
            );
        }
        return Ok(());
    }

    logging::init_logging(&config.observability);
    tracing::info!("api-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        services = config.services.len(),
        routes = config.routes.len(),
        forward_timeout_secs = config.timeouts.forward_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    spawn_signal_handler(&shutdown);

    let server = GatewayServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
