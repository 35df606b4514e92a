//! FPL Scout HTTP server
//!
//! Loads configuration, wires fetcher → cache → scout service and serves the
//! REST and HTML routes until Ctrl-C.

use anyhow::{Context, Result};
use clap::Parser;
use fpl_fetcher::{FplFetcher, PayloadCache};
use player_scout::ScoutService;
use scout_gateway::{create_routes, initialize_logging, load_config};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "scout-server")]
#[command(about = "Rank Fantasy Premier League players by value")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (overrides configuration)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    scout_gateway::config::validate_config(&config)?;

    initialize_logging(&config.logging)?;
    info!("Starting FPL Scout v{}", env!("CARGO_PKG_VERSION"));

    let mut fetcher = FplFetcher::new(config.fetcher.clone()).context("Failed to create FPL fetcher")?;
    if config.cache.enabled {
        info!("Payload cache enabled (ttl {}s)", config.cache.ttl_secs);
        fetcher = fetcher.with_cache(Arc::new(PayloadCache::from_config(&config.cache)));
    } else {
        warn!("Payload cache disabled; every request goes upstream");
    }

    let service = ScoutService::new(Arc::new(fetcher)).with_fixtures(config.fetcher.include_fixtures);
    let routes = create_routes(Arc::new(service));

    let addr = config.server.socket_addr()?;
    let (bound, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    })?;

    info!("Listening on http://{}", bound);
    server.await;
    info!("Server stopped");

    Ok(())
}
