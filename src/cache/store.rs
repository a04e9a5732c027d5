//! Generic shared LRU store
//!
//! A bounded, recency-ordered map behind one mutex. Both `get` hits and
//! `put` promote a key; inserting past capacity evicts exactly the least
//! recently used entry. Values are handed out as `Arc` clones so eviction
//! never invalidates a value a caller still holds.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

/// Thread-safe LRU store, cheap to clone (clones share the same entries).
pub struct LruStore<K: Hash + Eq, V> {
    inner: Arc<Mutex<LruCache<K, Arc<V>>>>,
    capacity: NonZeroUsize,
}

impl<K: Hash + Eq, V> Clone for LruStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
{
    /// Create a store holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
            capacity,
        }
    }

    /// Look up `key`, promoting it to most recently used.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.lock().get(key).cloned()
    }

    /// Check for `key` without touching recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Insert or replace `key`, promoting it. Evicts the LRU entry when full.
    pub fn put(&self, key: K, value: Arc<V>) {
        let mut cache = self.inner.lock();
        if let Some((evicted, _)) = cache.push(key.clone(), value) {
            if evicted != key {
                debug!(key = ?evicted, "evicted least recently used entry");
            }
        }
        debug_assert!(
            cache.len() <= self.capacity.get(),
            "cache holds {} entries, capacity {}",
            cache.len(),
            self.capacity
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.inner.lock().iter().map(|(k, _)| k.clone()).collect()
    }
}
