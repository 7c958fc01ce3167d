//! Hydrosense daemon - sensor allocation over HTTP.
//!
//! A single Rust binary that provides:
//! - `POST /sensor-allocation` taking a multipart `.inp` upload
//! - `POST /network/summary` for quick network statistics
//! - `GET /health`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use hydrosense_daemon::config::{HydrosenseConfig, CONFIG_FILE};
use hydrosense_daemon::{create_router, AppState};

/// Hydrosense sensor allocation daemon
#[derive(Parser, Debug)]
#[command(name = "hydrosense-daemon")]
#[command(about = "HTTP sensor allocation service for hydraulic network models")]
#[command(version)]
struct Cli {
    /// HTTP port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Elevation threshold (overrides config)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Fail on configuration errors instead of using defaults
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let mut config = if cli.strict {
        HydrosenseConfig::try_load(&cli.config)?
    } else {
        HydrosenseConfig::load(&cli.config)
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(threshold) = cli.threshold {
        config.network.elevation_threshold = threshold;
    }

    info!(
        "Elevation threshold: {}, sections: [{}] / [{}]",
        config.network.elevation_threshold,
        config.network.junction_section,
        config.network.pipe_section
    );

    let addr = format!("{}:{}", cli.host, config.server.port);
    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Hydrosense daemon listening on http://{}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
