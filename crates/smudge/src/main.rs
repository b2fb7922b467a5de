//! Smudge CLI - batch box-blur pipeline with bounded-queue backpressure.
//!
//! Smudge reads every image directly under an input directory, applies a
//! square averaging blur to each color channel, and writes the results
//! under an output directory with the same file names.
//!
//! # Usage
//!
//! ```bash
//! # Blur a directory of images
//! smudge run ./input ./output
//!
//! # Tune the pool and filter
//! smudge run ./input ./output --consumers 4 --window-size 7
//!
//! # View configuration
//! smudge config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Smudge - batch box-blur pipeline with bounded-queue backpressure.
#[derive(Parser, Debug)]
#[command(name = "smudge")]
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
    /// Blur every image under the input root into the output root
    Run(cli::run::RunArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI overrides.
    // Logging isn't up yet, so config warnings go through eprintln.
    let config = match smudge_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `smudge config path`."
            );
            smudge_core::Config::default()
        }
    };
    logging::init(&config.logging, cli.verbose, cli.json_logs);

    tracing::debug!("Smudge v{}", smudge_core::VERSION);

    match cli.command {
        Commands::Run(args) => cli::run::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config),
    }
}
