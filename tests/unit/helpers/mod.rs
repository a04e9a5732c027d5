//! Test helper utilities

#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use image::{Rgba, RgbaImage};
use imgnav::decode::{AnimationFrame, Decoded};
use imgnav::{FileEntry, GroupIndex};

/// A 1x1 still image.
pub fn still() -> Arc<Decoded> {
    Arc::new(Decoded::Still(RgbaImage::new(1, 1)))
}

/// An animated image whose frames last `ms` milliseconds each.
pub fn animated(ms: &[u64]) -> Arc<Decoded> {
    let frames = ms
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            AnimationFrame::new(
                RgbaImage::from_pixel(1, 1, Rgba([i as u8, 0, 0, 255])),
                Duration::from_millis(d),
            )
        })
        .collect();
    Arc::new(Decoded::Animated(frames))
}

/// Index over bare names.
pub fn index_of(names: &[&str]) -> GroupIndex {
    GroupIndex::from_names(names.iter().copied())
}

/// Entry created `secs` seconds after the epoch.
pub fn entry_at(name: &str, secs: u64) -> FileEntry {
    FileEntry::parse(name).with_created(Some(epoch_plus(secs)))
}

pub fn epoch_plus(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}
