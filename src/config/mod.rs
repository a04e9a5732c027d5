//! Configuration management for imgnav

mod io;
pub mod keys;
mod types;

pub use keys::{KeyAction, KeyConfigError, KeyMap, KeysConfig};
pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::preload::PreloaderOptions;
use crate::viewer::ViewerSettings;

impl Config {
    /// Get the config file path (~/.config/imgnav/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Remembered library folder, with `~` expanded. `None` when unset.
    pub fn library_folder(&self) -> Option<PathBuf> {
        let dir = self.library.folder.trim();
        if dir.is_empty() {
            return None;
        }
        if let Some(stripped) = dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return Some(home.join(stripped));
            }
        }
        Some(PathBuf::from(dir))
    }

    /// Remember `folder` as the library folder.
    pub fn set_library_folder(&mut self, folder: &Path) {
        self.library.folder = folder.to_string_lossy().into_owned();
    }

    /// Set both preload window sizes, clamped to `0..=MAX_PRELOAD_WINDOW`.
    pub fn set_preload_window(&mut self, backward: usize, forward: usize) {
        self.preload.backward = backward.min(MAX_PRELOAD_WINDOW);
        self.preload.forward = forward.min(MAX_PRELOAD_WINDOW);
    }

    /// Viewer tunables derived from this configuration.
    pub fn viewer_settings(&self) -> ViewerSettings {
        ViewerSettings {
            backward: self.preload.backward,
            forward: self.preload.forward,
            cache_capacity: self.cache.capacity.max(1),
            sort_order: self.library.sort_order,
            preloader: PreloaderOptions {
                poll_interval: Duration::from_millis(self.worker.poll_interval_ms),
                shutdown_timeout: self.shutdown_timeout(),
            },
        }
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.worker.shutdown_timeout_ms)
    }
}
