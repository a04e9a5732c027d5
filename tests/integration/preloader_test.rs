//! Integration tests for the background preloader

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use imgnav::cache::new_decoded_cache;
use imgnav::decode::decode_file;
use imgnav::preload::{PreloaderOptions, PreloaderState};
use imgnav::{Decoded, Preloader};
use tempfile::TempDir;

use crate::helpers::{png_folder, wait_until, write_garbage, write_gif};

fn fast() -> PreloaderOptions {
    PreloaderOptions {
        poll_interval: Duration::from_millis(20),
        shutdown_timeout: Duration::from_secs(2),
    }
}

#[test]
fn same_path_twice_leaves_one_cache_entry() {
    let dir = png_folder(&["a_1_x.png"]);
    let path = dir.path().join("a_1_x.png");
    let cache = new_decoded_cache(5);
    let emitted = Arc::new(AtomicUsize::new(0));

    let sink_cache = cache.clone();
    let sink_count = Arc::clone(&emitted);
    let mut preloader = Preloader::new(move |p: PathBuf, d: Arc<Decoded>| {
        sink_cache.put(p, d);
        sink_count.fetch_add(1, Ordering::SeqCst);
    })
    .with_options(fast());

    preloader.request(path.clone());
    preloader.request(path.clone());

    assert!(wait_until(Duration::from_secs(5), || emitted
        .load(Ordering::SeqCst)
        == 2));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&path));
}

#[test]
fn requests_are_processed_in_order() {
    let dir = png_folder(&["a_1_x.png", "a_1_y.png", "a_1_z.png"]);
    let order = Arc::new(Mutex::new(Vec::new()));
    let sink_order = Arc::clone(&order);
    let mut preloader = Preloader::new(move |p: PathBuf, _| {
        sink_order.lock().unwrap().push(p);
    })
    .with_options(fast());

    let paths: Vec<PathBuf> = ["a_1_z.png", "a_1_x.png", "a_1_y.png"]
        .iter()
        .map(|n| dir.path().join(n))
        .collect();
    for p in &paths {
        preloader.request(p.clone());
    }

    assert!(wait_until(Duration::from_secs(5), || order.lock().unwrap().len() == 3));
    assert_eq!(*order.lock().unwrap(), paths);
}

#[test]
fn bad_and_missing_files_do_not_stop_the_worker() {
    let dir = TempDir::new().unwrap();
    let bad = write_garbage(dir.path(), "a_1_bad.png");
    let missing = dir.path().join("a_1_gone.png");
    let good = write_gif(dir.path(), "a_1_good.gif", &[30, 30]);

    let done = Arc::new(Mutex::new(Vec::new()));
    let sink_done = Arc::clone(&done);
    let mut preloader = Preloader::new(move |p: PathBuf, d: Arc<Decoded>| {
        sink_done.lock().unwrap().push((p, d.frame_count()));
    })
    .with_options(fast());

    preloader.request(bad);
    preloader.request(missing);
    preloader.request(good.clone());

    assert!(wait_until(Duration::from_secs(5), || !done.lock().unwrap().is_empty()));
    assert_eq!(*done.lock().unwrap(), vec![(good, 2)]);
    assert_eq!(preloader.state(), PreloaderState::Running);
}

#[test]
fn stop_then_wait_terminates_worker() {
    let dir = png_folder(&["a_1_x.png"]);
    let mut preloader = Preloader::new(|_, _| {}).with_options(fast());
    preloader.request(dir.path().join("a_1_x.png"));

    preloader.stop();
    assert!(preloader.wait(Duration::from_secs(2)));
    assert_eq!(preloader.state(), PreloaderState::Idle);
}

#[test]
fn only_one_worker_decodes_at_a_time() {
    let dir = png_folder(&["a_1_a.png", "a_1_b.png", "a_1_c.png", "a_1_d.png"]);
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicUsize::new(0));

    let (dec_active, dec_peak) = (Arc::clone(&active), Arc::clone(&peak));
    let sink_finished = Arc::clone(&finished);
    let mut preloader = Preloader::with_decoder(
        move |p: &Path| {
            let now = dec_active.fetch_add(1, Ordering::SeqCst) + 1;
            dec_peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(15));
            dec_active.fetch_sub(1, Ordering::SeqCst);
            decode_file(p)
        },
        move |_, _| {
            sink_finished.fetch_add(1, Ordering::SeqCst);
        },
    )
    .with_options(fast());

    for name in ["a_1_a.png", "a_1_b.png", "a_1_c.png", "a_1_d.png"] {
        preloader.request(dir.path().join(name));
    }

    assert!(wait_until(Duration::from_secs(5), || finished.load(Ordering::SeqCst) == 4));
    assert_eq!(peak.load(Ordering::SeqCst), 1);
}

#[test]
fn request_after_stop_waits_for_the_stopping_worker() {
    let dir = png_folder(&["a_1_a.png", "a_1_b.png"]);
    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(Mutex::new(Vec::new()));

    let (dec_active, dec_peak) = (Arc::clone(&active), Arc::clone(&peak));
    let sink_finished = Arc::clone(&finished);
    let mut preloader = Preloader::with_decoder(
        move |p: &Path| {
            let now = dec_active.fetch_add(1, Ordering::SeqCst) + 1;
            dec_peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(200));
            dec_active.fetch_sub(1, Ordering::SeqCst);
            decode_file(p)
        },
        move |p: PathBuf, _| sink_finished.lock().unwrap().push(p),
    )
    .with_options(fast());

    let (a, b) = (dir.path().join("a_1_a.png"), dir.path().join("a_1_b.png"));
    preloader.request(a.clone());
    std::thread::sleep(Duration::from_millis(50));
    preloader.stop();
    preloader.request(b.clone());

    assert!(wait_until(Duration::from_secs(5), || finished.lock().unwrap().len() == 2));
    assert_eq!(peak.load(Ordering::SeqCst), 1);
    assert_eq!(*finished.lock().unwrap(), vec![a, b]);
}
