//! Config subcommands handler

use anyhow::{Context, Result};
use std::path::Path;

use imgnav::theme::Painter;
use imgnav::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    let painter = Painter::stdout();
    println!("{}", painter.secondary(&format!("# {}", config_path.display())));
    println!("{}", painter.primary(&toml_str));
    Ok(())
}

/// Open the configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
#[cfg(not(tarpaulin_include))]
pub fn handle_edit(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        Config::default().save_to(config_path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let painter = Painter::stdout();
    println!(
        "{}",
        painter.primary(&format!("Opening {} with {}", config_path.display(), editor))
    );

    std::process::Command::new(&editor)
        .arg(config_path)
        .status()
        .with_context(|| format!("Failed to open editor '{}'", editor))?;

    // Surface syntax errors right away instead of on the next launch.
    Config::load_from(config_path)?;
    Ok(())
}

/// Print the configuration file path.
pub fn handle_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}
