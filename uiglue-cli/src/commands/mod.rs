//! Command implementations for the uiglue CLI

pub mod config;
pub mod search;

use std::path::Path;

use anyhow::{Context, Result};
use uiglue_core::WidgetsConfig;

pub use config::run_config;
pub use search::run_search;

/// Load config from an explicit path, or the default location
pub(crate) fn load_config(path: Option<&Path>) -> Result<WidgetsConfig> {
    match path {
        Some(path) => WidgetsConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => WidgetsConfig::load().context("Failed to load config"),
    }
}
