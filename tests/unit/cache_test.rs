//! Unit tests for the decoded-image cache

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use imgnav::cache::{new_decoded_cache, LruStore};

use crate::helpers::still;

fn path(i: usize) -> PathBuf {
    PathBuf::from(format!("/pics/img{i}.png"))
}

#[test]
fn overflow_by_one_evicts_least_recently_touched() {
    let capacity = 4;
    let cache = new_decoded_cache(capacity);
    for i in 0..=capacity {
        cache.put(path(i), still());
    }

    assert_eq!(cache.len(), capacity);
    assert!(!cache.contains(&path(0)));
    for i in 1..=capacity {
        assert!(cache.contains(&path(i)));
    }
}

#[test]
fn promoted_key_survives_capacity_minus_one_inserts() {
    let capacity = 4;
    let cache = new_decoded_cache(capacity);
    for i in 0..capacity {
        cache.put(path(i), still());
    }

    assert!(cache.get(&path(0)).is_some());
    for i in capacity..(2 * capacity - 1) {
        cache.put(path(i), still());
    }

    assert!(cache.contains(&path(0)));
    assert!(!cache.contains(&path(1)));
    assert_eq!(cache.len(), capacity);
}

#[test]
fn put_of_existing_key_replaces_and_promotes() {
    let cache = LruStore::new(2);
    cache.put("a", Arc::new(1));
    cache.put("b", Arc::new(2));
    cache.put("a", Arc::new(3));
    cache.put("c", Arc::new(4));

    assert_eq!(cache.get(&"a").as_deref(), Some(&3));
    assert!(!cache.contains(&"b"));
}

#[test]
fn clear_drops_everything() {
    let cache = new_decoded_cache(3);
    cache.put(path(1), still());
    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.get(&path(1)).is_none());
}

#[test]
fn value_outlives_eviction() {
    let cache = new_decoded_cache(1);
    cache.put(path(1), still());
    let held = cache.get(&path(1)).unwrap();
    cache.put(path(2), still());
    assert!(!cache.contains(&path(1)));
    assert_eq!(held.frame_count(), 1);
}

#[test]
fn concurrent_puts_respect_capacity() {
    let cache = new_decoded_cache(8);
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    cache.put(path(t * 1000 + i), still());
                    let _ = cache.get(&path(t * 1000 + i / 2));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 8);
    assert_eq!(cache.keys_by_recency().len(), 8);
}
