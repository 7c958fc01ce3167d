//! Hydrosense CLI - Sensor placement for hydraulic network models
//!
//! Reads EPANET-style `.inp` files and selects the junctions to instrument so
//! that every other junction is adjacent to a sensor.

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod output;

use commands::*;
use hydrosense_daemon::config::{HydrosenseConfig, CONFIG_FILE};
use output::{OutputConfig, OutputFormat};

/// Sensor placement for hydraulic network models.
///
/// Hydrosense builds a pipe graph from an `.inp` network file, drops
/// junctions above an elevation cutoff and picks sensor nodes with a
/// nearest-neighbor heuristic.
#[derive(Parser)]
#[command(name = "hydrosense")]
#[command(author, version)]
#[command(about = "Sensor placement for hydraulic network models")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  hydrosense allocate net.inp              Select sensors locally
  hydrosense allocate net.inp -t 80        Use an 80 m elevation cutoff
  hydrosense inspect net.inp               Show network statistics
  hydrosense submit net.inp --url URL      Run on a hydrosense daemon")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Fail on configuration errors instead of silently using defaults
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Select sensor nodes for a network file
    #[command(visible_alias = "a")]
    Allocate {
        /// Network file (.inp)
        file: String,

        /// Elevation threshold (overrides config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Show network statistics and excluded junctions
    #[command(visible_alias = "i")]
    Inspect {
        /// Network file (.inp)
        file: String,

        /// Elevation threshold (overrides config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Upload a network file to a running hydrosense daemon
    Submit {
        /// Network file (.inp)
        file: String,

        /// Daemon base URL
        #[arg(short, long, env = "HYDROSENSE_URL", default_value = submit::DEFAULT_URL)]
        url: String,

        /// Elevation threshold (overrides the daemon's config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Handle case where no command is provided
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    let config = if cli.strict {
        HydrosenseConfig::try_load(&cli.config)?
    } else {
        HydrosenseConfig::load(&cli.config)
    };
    let output = OutputConfig::auto_detect(cli.format, cli.compact);

    match command {
        Commands::Allocate { file, threshold } => allocate::run(&file, threshold, &config, &output),
        Commands::Inspect { file, threshold } => inspect::run(&file, threshold, &config, &output),
        Commands::Submit {
            file,
            url,
            threshold,
        } => submit::run(&file, &url, threshold, &output).await,
        Commands::Init { force } => init::run(&cli.config, force, &output),
    }
}
