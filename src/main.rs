//! Image Group Navigator (imgnav) - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use imgnav::cli::{Cli, Commands, ConfigCommands};
use imgnav::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = commands::resolve_config_path(cli.config)?;

    match cli.command {
        None => commands::browse::handle(cli.folder, &config_path),
        Some(Commands::Browse { folder }) => commands::browse::handle(folder, &config_path),
        Some(Commands::Groups { folder, json, sort }) => {
            logging::init_stderr()?;
            commands::groups::handle(&folder, json, sort.as_deref(), &config_path)
        }
        Some(Commands::Config(cmd)) => {
            logging::init_stderr()?;
            match cmd {
                ConfigCommands::Show => commands::config::handle_show(&config_path),
                ConfigCommands::Edit => commands::config::handle_edit(&config_path),
                ConfigCommands::Path => commands::config::handle_path(&config_path),
            }
        }
        Some(Commands::Completions { shell }) => commands::completions::handle::<Cli>(shell),
    }
}
