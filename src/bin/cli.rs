//! Spacecraft Missions CLI
//!
//! Scrapes the mission catalog into a JSON directory.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use spacecraft_missions::{error::Result, models::Config, pipeline, utils::log};

/// Spacecraft mission directory scraper
#[derive(Parser, Debug)]
#[command(
    name = "spacecraft-missions",
    version,
    about = "Scrapes the spacecraft mission catalog into a JSON directory"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape every mission and write the directory
    Scrape {
        /// Output file (default: output.path from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the missions on the index without visiting them
    List,

    /// Validate the configuration file
    Validate,

    /// Show the saved mission directory
    Info {
        /// Directory file to read (default: output.path from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    let level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    log::init(level);

    match cli.command {
        Command::Scrape { output } => {
            if let Some(path) = output {
                config.output.path = path;
            }
            let outcome = pipeline::run_scrape(Arc::new(config)).await?;
            println!(
                "Saved {} of {} listed missions ({} skipped)",
                outcome.records.len(),
                outcome.stub_count,
                outcome.skipped.len()
            );
        }

        Command::List => {
            pipeline::run_list(Arc::new(config)).await?;
        }

        Command::Validate => pipeline::run_validate(&config)?,

        Command::Info { output } => {
            if let Some(path) = output {
                config.output.path = path;
            }
            pipeline::run_info(&config).await?;
        }
    }

    Ok(())
}
