//! Decoded-image cache
//!
//! Re-exports the generic `LruStore<K, V>` and provides a `DecodedCache`
//! type alias keyed by file path.

pub mod store;

pub use store::LruStore;

use std::path::PathBuf;

use crate::decode::Decoded;

/// Default number of decoded images kept in memory.
pub const DEFAULT_CAPACITY: usize = 5;

/// Cache of decoded images, shared between the UI and the preloader.
pub type DecodedCache = LruStore<PathBuf, Decoded>;

/// Create a `DecodedCache` holding at most `capacity` images.
pub fn new_decoded_cache(capacity: usize) -> DecodedCache {
    LruStore::new(capacity)
}
