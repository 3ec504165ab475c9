use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use uiglue_core::WidgetsConfig;

use super::load_config;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init(InitArgs),
    /// Print the effective config as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, path: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, path),
        ConfigCommands::Show => run_show(path),
        ConfigCommands::Path => run_path(path),
    }
}

fn run_init(args: InitArgs, path: Option<&Path>) -> Result<()> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(WidgetsConfig::config_path);

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    WidgetsConfig::default()
        .save_to(&config_path)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("✅ Config written to {}", config_path.display());
    Ok(())
}

fn run_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

fn run_path(path: Option<&Path>) -> Result<()> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(WidgetsConfig::config_path);
    println!("{}", config_path.display());
    Ok(())
}
