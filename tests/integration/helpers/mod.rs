//! Test helper utilities

#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage};
use tempfile::TempDir;

/// Write a solid-color PNG of `w x h` pixels.
pub fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(w, h, Rgba([10, 200, 30, 255]))
        .save(&path)
        .expect("Failed to write png");
    path
}

/// Write an animated GIF with one frame per entry of `delays_ms`.
pub fn write_gif(dir: &Path, name: &str, delays_ms: &[u32]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("Failed to create gif");
    let mut encoder = GifEncoder::new(file);
    let frames = delays_ms.iter().enumerate().map(|(i, &ms)| {
        let shade = (i as u8).wrapping_mul(60);
        Frame::from_parts(
            RgbaImage::from_pixel(4, 4, Rgba([shade, 0, 255 - shade, 255])),
            0,
            0,
            Delay::from_numer_denom_ms(ms, 1),
        )
    });
    encoder.encode_frames(frames).expect("Failed to encode gif");
    path
}

/// Write bytes that carry an image extension but no image.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"definitely not an image").expect("Failed to write file");
    path
}

/// Temp folder holding small PNGs with the given names.
pub fn png_folder(names: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for name in names {
        write_png(dir.path(), name, 8, 6);
    }
    dir
}

/// Poll `condition` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    condition()
}
