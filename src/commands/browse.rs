//! Browse command handler

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use imgnav::logging;
use imgnav::tui::app::install_panic_hook;
use imgnav::tui::{BrowserApp, BrowserState};
use imgnav::{scan_folder, Config, Viewer};

/// Folder to open: the argument, else the remembered library folder.
pub fn resolve_folder(arg: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    let Some(folder) = arg.or_else(|| config.library_folder()) else {
        bail!("No folder given and none remembered yet.\nRun: imgnav <FOLDER>");
    };
    folder
        .canonicalize()
        .with_context(|| format!("Folder not found: {}", folder.display()))
}

/// Open the interactive browser.
#[cfg(not(tarpaulin_include))]
pub fn handle(folder: Option<PathBuf>, config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let folder = resolve_folder(folder, &config)?;

    // The TUI owns the terminal; log to a file instead of stderr.
    let _log_guard = match logging::init_file(&logging::log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {}", e);
            None
        }
    };

    let entries = scan_folder(&folder)?;
    let viewer = Viewer::new(folder, entries, config.viewer_settings());
    let state = BrowserState::new(viewer, config, config_path.to_path_buf());

    install_panic_hook();
    let mut app = BrowserApp::new(state)?;
    app.run()
}
