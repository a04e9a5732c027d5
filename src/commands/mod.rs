//! Command handlers for the imgnav CLI.
//!
//! Each submodule handles one subcommand. Dispatch lives in main.rs.

pub mod browse;
pub mod completions;
pub mod config;
pub mod groups;

use anyhow::{bail, Result};
use std::path::PathBuf;

use imgnav::index::SortOrder;

/// Parse a `--sort` value.
pub fn parse_sort_order(value: &str) -> Result<SortOrder> {
    match value {
        "name" => Ok(SortOrder::Name),
        "date" => Ok(SortOrder::Date),
        other => bail!("Unknown sort order '{}' (expected name or date)", other),
    }
}

/// Config file to use: `--config` when given, else the default location.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => imgnav::Config::config_path(),
    }
}
