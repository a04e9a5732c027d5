//! Integration tests for decoding real files

use std::time::Duration;

use imgnav::decode::DEFAULT_FRAME_DURATION;
use imgnav::{decode_file, Decoded, DecodeError};
use tempfile::TempDir;

use crate::helpers::{write_garbage, write_gif, write_png};

#[test]
fn png_decodes_as_still_with_dimensions() {
    let dir = TempDir::new().unwrap();
    let path = write_png(dir.path(), "a_1_x.png", 12, 7);

    let decoded = decode_file(&path).unwrap();
    assert!(matches!(decoded, Decoded::Still(_)));
    assert_eq!(decoded.dimensions(), (12, 7));
    assert_eq!(decoded.frame_duration(0), None);
}

#[test]
fn gif_decodes_every_frame_with_durations() {
    let dir = TempDir::new().unwrap();
    let path = write_gif(dir.path(), "a_1_anim.gif", &[50, 100, 150]);

    let decoded = decode_file(&path).unwrap();
    assert!(decoded.is_animated());
    assert_eq!(decoded.frame_count(), 3);
    assert_eq!(decoded.frame_duration(0), Some(Duration::from_millis(50)));
    assert_eq!(decoded.frame_duration(2), Some(Duration::from_millis(150)));
}

#[test]
fn gif_without_delay_uses_default_duration() {
    let dir = TempDir::new().unwrap();
    let path = write_gif(dir.path(), "a_1_fast.gif", &[0, 0]);

    let decoded = decode_file(&path).unwrap();
    assert_eq!(decoded.frame_duration(1), Some(DEFAULT_FRAME_DURATION));
}

#[test]
fn single_frame_gif_is_still() {
    let dir = TempDir::new().unwrap();
    let path = write_gif(dir.path(), "a_1_one.gif", &[40]);

    let decoded = decode_file(&path).unwrap();
    assert!(!decoded.is_animated());
    assert_eq!(decoded.frame_count(), 1);
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = decode_file(&dir.path().join("gone.png")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn corrupt_file_is_a_decode_failure() {
    let dir = TempDir::new().unwrap();
    let path = write_garbage(dir.path(), "a_1_bad.png");

    let err = decode_file(&path).unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(
        err,
        DecodeError::Image { .. } | DecodeError::Io { .. }
    ));
    assert!(err.to_string().contains("a_1_bad.png"));
}

#[test]
fn wrong_extension_falls_back_to_sniffing() {
    let dir = TempDir::new().unwrap();
    let png = write_png(dir.path(), "real.png", 3, 3);
    let renamed = dir.path().join("a_1_x.bmp");
    std::fs::rename(&png, &renamed).unwrap();

    let decoded = decode_file(&renamed).unwrap();
    assert_eq!(decoded.dimensions(), (3, 3));
}
