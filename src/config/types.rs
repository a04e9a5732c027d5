//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

use super::keys::KeysConfig;
use crate::index::SortOrder;

/// Largest preload window the TUI adjusters allow on either side.
pub const MAX_PRELOAD_WINDOW: usize = 10;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub preload: PreloadConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

/// Folder restored by `browse` and its display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Last scanned folder; empty means none yet
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// Preload window sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreloadConfig {
    #[serde(default = "default_backward")]
    pub backward: usize,
    #[serde(default = "default_forward")]
    pub forward: usize,
}

pub fn default_backward() -> usize {
    3
}

pub fn default_forward() -> usize {
    7
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            backward: default_backward(),
            forward: default_forward(),
        }
    }
}

/// Decoded-image cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of decoded images kept in memory (at least 1)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

pub fn default_capacity() -> usize {
    5
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Background worker timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
}

pub fn default_poll_interval_ms() -> u64 {
    1000
}

pub fn default_shutdown_timeout_ms() -> u64 {
    1000
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
        }
    }
}
