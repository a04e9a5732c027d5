//! Integration tests for the viewer session over a real folder

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use imgnav::preload::{PreloaderOptions, PreloaderState};
use imgnav::{decode_file, scan_folder, Direction, Level, Viewer, ViewerSettings};

use crate::helpers::{png_folder, wait_until, write_garbage, write_gif};

fn settings(backward: usize, forward: usize) -> ViewerSettings {
    ViewerSettings {
        backward,
        forward,
        cache_capacity: 8,
        preloader: PreloaderOptions {
            poll_interval: Duration::from_millis(20),
            shutdown_timeout: Duration::from_secs(2),
        },
        ..ViewerSettings::default()
    }
}

fn open(dir: &Path, backward: usize, forward: usize) -> Viewer {
    Viewer::new(dir, scan_folder(dir).unwrap(), settings(backward, forward))
}

fn wait_for_window(viewer: &mut Viewer) -> bool {
    wait_until(Duration::from_secs(5), || {
        viewer.poll_loaded();
        let status = viewer.cache_status();
        status.backward_cached == status.backward_total
            && status.forward_cached == status.forward_total
    })
}

#[test]
fn showing_a_file_preloads_its_window() {
    let dir = png_folder(&["a_1_1.png", "a_1_2.png", "a_1_3.png", "a_1_4.png"]);
    let mut viewer = open(dir.path(), 1, 2);

    let shown = viewer.show_current().unwrap().unwrap();
    assert_eq!(shown.dimensions(), (8, 6));

    assert!(wait_for_window(&mut viewer));
    let status = viewer.cache_status();
    assert_eq!((status.backward_total, status.forward_total), (0, 2));
    assert_eq!(status.to_string(), "cache: back 0/0  next 2/2");
    assert!(viewer.cache().contains(&dir.path().join("a_1_3.png")));
    assert!(!viewer.cache().contains(&dir.path().join("a_1_4.png")));
}

#[test]
fn stepping_into_preloaded_file_skips_decoding() {
    let dir = png_folder(&["a_1_1.png", "a_1_2.png", "a_1_3.png"]);
    let decodes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&decodes);
    let mut viewer = Viewer::with_decoder(
        dir.path(),
        scan_folder(dir.path()).unwrap(),
        settings(0, 2),
        move |p: &Path| {
            counter.fetch_add(1, Ordering::SeqCst);
            decode_file(p)
        },
    );

    viewer.show_current().unwrap();
    assert!(wait_for_window(&mut viewer));
    let after_preload = decodes.load(Ordering::SeqCst);
    assert_eq!(after_preload, 3);

    assert!(viewer.navigate(Level::File, Direction::Forward));
    viewer.show_current().unwrap();
    assert_eq!(decodes.load(Ordering::SeqCst), after_preload);
    assert_eq!(viewer.shown_path(), Some(dir.path().join("a_1_2.png").as_path()));
}

#[test]
fn corrupt_file_reports_error_and_navigation_continues() {
    let dir = png_folder(&["a_1_2.png"]);
    write_garbage(dir.path(), "a_1_1.png");
    let mut viewer = open(dir.path(), 0, 1);

    assert!(viewer.show_current().is_err());
    assert!(viewer.current_image().is_none());

    viewer.navigate(Level::File, Direction::Forward);
    assert!(viewer.show_current().unwrap().is_some());
    assert!(viewer.current_image().is_some());
}

#[test]
fn animated_file_plays_after_show() {
    let dir = tempfile::TempDir::new().unwrap();
    write_gif(dir.path(), "a_1_anim.gif", &[30, 60]);
    let mut viewer = open(dir.path(), 0, 0);

    viewer.show_current().unwrap();
    assert!(viewer.player().is_armed());
    assert_eq!(viewer.player().frame_index(), 0);

    assert!(viewer.tick(Instant::now() + Duration::from_millis(40)));
    assert_eq!(viewer.player().frame_index(), 1);
}

#[test]
fn navigating_away_from_animation_disarms_player() {
    let dir = png_folder(&["b_1_still.png"]);
    write_gif(dir.path(), "a_1_anim.gif", &[30, 60]);
    let mut viewer = open(dir.path(), 0, 0);

    viewer.show_current().unwrap();
    assert!(viewer.player().is_armed());

    viewer.navigate(Level::Top, Direction::Forward);
    viewer.show_current().unwrap();
    assert!(!viewer.player().is_armed());
    assert_eq!(viewer.player().frame_count(), 1);
}

#[test]
fn rescan_clears_cache_and_resets_cursor() {
    let dir = png_folder(&["a_1_1.png", "a_1_2.png", "b_1_1.png"]);
    let mut viewer = open(dir.path(), 0, 1);
    viewer.select_top(1);
    viewer.show_current().unwrap();
    assert!(!viewer.cache().is_empty());

    crate::helpers::write_png(dir.path(), "c_1_1.png", 2, 2);
    viewer.rescan(scan_folder(dir.path()).unwrap());

    assert!(viewer.cache().is_empty());
    assert_eq!(viewer.cursor().position(), (0, 0, 0));
    assert_eq!(viewer.index().top_count(), 3);
    assert!(viewer.shown_path().is_none());
}

#[test]
fn growing_window_requests_new_paths() {
    let dir = png_folder(&["a_1_1.png", "a_1_2.png", "a_1_3.png"]);
    let mut viewer = open(dir.path(), 0, 0);
    viewer.show_current().unwrap();
    assert_eq!(viewer.cache().len(), 1);

    viewer.set_preload_window(0, 2);
    assert!(wait_for_window(&mut viewer));
    assert_eq!(viewer.cache().len(), 3);
}

#[test]
fn shutdown_stops_worker_in_time() {
    let dir = png_folder(&["a_1_1.png", "a_1_2.png"]);
    let mut viewer = open(dir.path(), 0, 1);
    viewer.show_current().unwrap();
    assert!(viewer.shutdown(Duration::from_secs(2)));
    assert_eq!(viewer.preloader_state(), PreloaderState::Idle);
}

fn slow_neighbour_viewer(dir: &Path, shutdown_timeout: Duration) -> Viewer {
    let mut settings = settings(0, 1);
    settings.preloader.shutdown_timeout = shutdown_timeout;
    Viewer::with_decoder(dir, scan_folder(dir).unwrap(), settings, |p: &Path| {
        if p.ends_with("a_1_y.png") {
            std::thread::sleep(Duration::from_millis(300));
        }
        decode_file(p)
    })
}

#[test]
fn rescan_during_preload_leaves_cache_empty() {
    let dir = png_folder(&["a_1_x.png", "a_1_y.png"]);
    let mut viewer = slow_neighbour_viewer(dir.path(), Duration::from_secs(2));
    viewer.show_current().unwrap();
    std::thread::sleep(Duration::from_millis(50));

    viewer.rescan(Vec::new());
    assert!(viewer.cache().is_empty());

    std::thread::sleep(Duration::from_millis(500));
    assert!(!viewer.poll_loaded());
    assert!(viewer.cache().is_empty());
    assert_eq!(viewer.preloader_state(), PreloaderState::Idle);
}

#[test]
fn rescan_with_stuck_worker_keeps_late_result_out() {
    let dir = png_folder(&["a_1_x.png", "a_1_y.png"]);
    let mut viewer = slow_neighbour_viewer(dir.path(), Duration::from_millis(20));
    viewer.show_current().unwrap();
    std::thread::sleep(Duration::from_millis(50));

    viewer.rescan(scan_folder(dir.path()).unwrap());
    assert!(viewer.cache().is_empty());

    std::thread::sleep(Duration::from_millis(500));
    assert!(!viewer.poll_loaded());
    assert!(viewer.cache().is_empty());
    assert_eq!(viewer.index().len(), 2);
}
