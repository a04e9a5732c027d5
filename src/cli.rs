//! CLI definitions for imgnav
//!
//! The clap structure lives in the library so tests can build the command
//! without going through `main`.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles matching the gallery theme.
///
/// - Cyan: headers, usage, literals (accent color)
/// - White: placeholders and valid values
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "imgnav")]
#[command(about = "[ Image Group Navigator ] - browse image folders grouped by file name")]
#[command(
    long_about = "Image Group Navigator (imgnav) - browse a flat folder of images in the terminal.

Files named <group>_<set>_<name>.<ext> are grouped twice: by the part before
the first underscore, then by the second part. Neighbouring files are decoded
in the background so stepping through a set is instant. Animated GIF, APNG
and WebP files play in place.

QUICK START:
    imgnav ~/Pictures/renders       Browse a folder
    imgnav                          Reopen the last folder
    imgnav groups ~/Pictures        Print the group tree

KEYS (defaults; rebind them in the [keys] table of the config):
    Tab / Shift-Tab     Move focus between columns
    Up / Down           Step within the focused column
    Left / Right        Previous / next file
    n / p, N / P        Next / previous set, group
    f, Enter            Toggle fullscreen
    s                   Toggle name / date order
    [ ] { }             Shrink / grow the preload window
    q, Esc              Quit"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/imgnav/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Folder to browse (same as `imgnav browse <FOLDER>`)
    #[arg(value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse a folder interactively
    #[command(long_about = "Open the interactive browser on a folder.

Without a folder the last browsed folder from the config is reopened.
The folder, sort order and preload window are saved on exit.

EXAMPLES:
    imgnav browse ~/Pictures/renders
    imgnav browse")]
    Browse {
        /// Folder containing the images
        #[arg(value_name = "FOLDER")]
        folder: Option<PathBuf>,
    },

    /// Print the grouping of a folder
    #[command(long_about = "Scan a folder and print its groups, sets and files.

EXAMPLES:
    imgnav groups ~/Pictures/renders
    imgnav groups ~/Pictures/renders --json
    imgnav groups . --sort date")]
    Groups {
        /// Folder containing the images
        #[arg(value_name = "FOLDER")]
        folder: PathBuf,

        /// Emit JSON instead of a tree
        #[arg(long)]
        json: bool,

        /// Order of the top groups (defaults to the configured order)
        #[arg(long, value_parser = ["name", "date"])]
        sort: Option<String>,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and edit the imgnav configuration file.

Configuration is stored in ~/.config/imgnav/config.toml and holds the last
folder, sort order, preload window sizes, cache capacity, worker timing
and key bindings.

EXAMPLES:
    imgnav config show          Display current configuration
    imgnav config edit          Open config in $EDITOR
    imgnav config path          Print the config file location"
    )]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Print a completion script for the given shell.

EXAMPLE:
    imgnav completions zsh > ~/.zfunc/_imgnav")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Open configuration file in your default editor
    #[command(long_about = "Open the configuration file in your default editor.

Uses the $EDITOR environment variable (defaults to 'vi').
The file is created with defaults first if it does not exist.

EXAMPLE:
    EDITOR=nano imgnav config edit")]
    Edit,
    /// Print the configuration file path
    Path,
}
