//! Lux CLI - find image files that fail to decode.
//!
//! Lux scans a directory tree, probes every candidate image with a real
//! decode, and writes the unreadable ones to a CSV so they can be removed
//! before a batch job trips over them.
//!
//! # Usage
//!
//! ```bash
//! # Scan the current directory
//! lux scan
//!
//! # Scan a photo library with an explicit worker count
//! lux scan ~/photos --workers 8
//!
//! # View configuration
//! lux config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Lux - find image files that fail to decode.
#[derive(Parser, Debug)]
#[command(name = "lux")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a directory tree for unreadable images
    Scan(cli::scan::ScanArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match lux_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `lux config path`."
            );
            lux_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Lux v{}", lux_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Scan(args) => cli::scan::execute(args).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
