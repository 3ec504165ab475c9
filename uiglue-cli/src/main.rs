//! uiglue CLI - headless host for the uiglue widget library
//!
//! - `search`: drive a debounced search controller from stdin lines against
//!   a JSON catalog and print what the controller does
//! - `config`: manage ~/.uiglue/config.toml

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "uiglue",
    author,
    version,
    about = "Headless driver for uiglue widgets",
    long_about = "Pipe keystrokes into a debounced, race-safe search controller and watch \
                  which lookups are issued, resolved or discarded."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (defaults to ~/.uiglue/config.toml)
    #[arg(long, global = true, env = "UIGLUE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a search controller over stdin (one input value per line)
    Search(commands::search::SearchArgs),
    /// Manage uiglue configuration (init, show, path)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Search(args) => commands::run_search(args, cli.config.as_deref()).await?,
        Commands::Config(args) => commands::run_config(args, cli.config.as_deref())?,
    }

    Ok(())
}
