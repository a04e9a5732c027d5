//! Image Group Navigator (imgnav) Library
//!
//! Browses a flat folder of images grouped by file name, decoding nearby
//! files in the background so stepping through a group stays instant.

pub mod animation;
pub mod cache;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod decode;
pub mod index;
pub mod logging;
pub mod opener;
pub mod preload;
pub mod theme;
pub mod tui;
pub mod viewer;

pub use animation::AnimationPlayer;
pub use cache::{DecodedCache, LruStore};
pub use config::Config;
pub use cursor::{Direction, Level, NavigationCursor};
pub use decode::{decode_file, Decoded, DecodeError};
pub use index::{scan_folder, FileEntry, GroupIndex, SortOrder};
pub use preload::Preloader;
pub use viewer::{CacheStatus, Viewer, ViewerSettings};
