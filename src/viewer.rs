//! Viewer session
//!
//! Wires the grouping index, cursor, decoded-image cache, preloader and
//! animation player together. This is the surface a UI talks to: it moves
//! the selection, asks for the current image, and polls for background
//! completions to know when to repaint.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::animation::AnimationPlayer;
use crate::cache::{new_decoded_cache, DecodedCache, DEFAULT_CAPACITY};
use crate::cursor::{Direction, Level, NavigationCursor, PreloadWindow};
use crate::decode::{decode_file, Decoded, DecodeError};
use crate::index::{FileEntry, GroupIndex, SortOrder};
use crate::preload::{Preloader, PreloaderOptions, PreloaderState, SharedDecoder};

/// Default number of files preloaded behind the cursor.
pub const DEFAULT_BACKWARD: usize = 3;
/// Default number of files preloaded ahead of the cursor.
pub const DEFAULT_FORWARD: usize = 7;

/// Tunables for a [`Viewer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerSettings {
    pub backward: usize,
    pub forward: usize,
    pub cache_capacity: usize,
    pub sort_order: SortOrder,
    pub preloader: PreloaderOptions,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            backward: DEFAULT_BACKWARD,
            forward: DEFAULT_FORWARD,
            cache_capacity: DEFAULT_CAPACITY,
            sort_order: SortOrder::Name,
            preloader: PreloaderOptions::default(),
        }
    }
}

/// How much of the preload window is already decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatus {
    pub backward_cached: usize,
    pub backward_total: usize,
    pub forward_cached: usize,
    pub forward_total: usize,
    /// Configured window sizes (totals are these, clipped to the list)
    pub backward_window: usize,
    pub forward_window: usize,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cache: back {}/{}  next {}/{}",
            self.backward_cached, self.backward_total, self.forward_cached, self.forward_total
        )
    }
}

/// An open folder with its navigation and decode state.
pub struct Viewer {
    root: PathBuf,
    index: GroupIndex,
    cursor: NavigationCursor,
    cache: DecodedCache,
    decoder: SharedDecoder,
    preloader: Preloader,
    player: AnimationPlayer,
    loaded_rx: Receiver<PathBuf>,
    shown: Option<PathBuf>,
    backward: usize,
    forward: usize,
}

impl Viewer {
    /// Open `root` with an already scanned file list.
    pub fn new(root: impl Into<PathBuf>, entries: Vec<FileEntry>, settings: ViewerSettings) -> Self {
        Self::with_decoder(root, entries, settings, decode_file)
    }

    /// Like [`Viewer::new`] with a custom decode function for both paths.
    pub fn with_decoder(
        root: impl Into<PathBuf>,
        entries: Vec<FileEntry>,
        settings: ViewerSettings,
        decoder: impl Fn(&Path) -> Result<Decoded, DecodeError> + Send + Sync + 'static,
    ) -> Self {
        let decoder: SharedDecoder = Arc::new(decoder);
        let (cache, preloader, loaded_rx) =
            preload_pipeline(&decoder, settings.cache_capacity, settings.preloader);

        let index = GroupIndex::build(entries).with_sort_order(settings.sort_order);
        let root = root.into();
        info!(folder = %root.display(), files = index.len(), "opened folder");

        Self {
            root,
            index,
            cursor: NavigationCursor::new(),
            cache,
            decoder,
            preloader,
            player: AnimationPlayer::new(),
            loaded_rx,
            shown: None,
            backward: settings.backward,
            forward: settings.forward,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index(&self) -> &GroupIndex {
        &self.index
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn cache(&self) -> &DecodedCache {
        &self.cache
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn preloader_state(&self) -> PreloaderState {
        self.preloader.state()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.index.sort_order()
    }

    /// `(backward, forward)` window sizes.
    pub fn preload_window_sizes(&self) -> (usize, usize) {
        (self.backward, self.forward)
    }

    pub fn current_entry(&self) -> Option<&FileEntry> {
        self.cursor.current(&self.index)
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.current_entry().map(|e| self.path_of(e))
    }

    /// Path that was last shown, if any.
    pub fn shown_path(&self) -> Option<&Path> {
        self.shown.as_deref()
    }

    /// Frame the player is currently displaying.
    pub fn current_image(&self) -> Option<&RgbaImage> {
        self.player.current_image()
    }

    pub fn path_of(&self, entry: &FileEntry) -> PathBuf {
        self.root.join(entry.name())
    }

    /// Replace the file list. The cache is cleared and the cursor reset.
    ///
    /// The worker is stopped and waited on first so no decode for the old
    /// list lands in the cleared cache. If it does not exit in time it keeps
    /// the old cache and channel, and the viewer continues with new ones.
    pub fn rescan(&mut self, entries: Vec<FileEntry>) {
        self.player.stop();
        self.preloader.stop();
        let options = self.preloader.options();
        if self.preloader.wait(options.shutdown_timeout) {
            self.cache.clear();
            // Notifications for the old list are stale.
            while self.loaded_rx.try_recv().is_ok() {}
        } else {
            warn!("preload worker still busy after rescan, replacing cache");
            let (cache, preloader, loaded_rx) =
                preload_pipeline(&self.decoder, self.cache.capacity(), options);
            self.cache = cache;
            self.preloader = preloader;
            self.loaded_rx = loaded_rx;
        }
        self.shown = None;
        self.cursor.reset();
        self.index = GroupIndex::build(entries).with_sort_order(self.index.sort_order());
        info!(files = self.index.len(), "rescanned folder");
    }

    /// Re-sort top groups, keeping the selected group when it still exists.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        let selected = self
            .index
            .top_key_at(self.cursor.top())
            .map(str::to_string);
        let (middle, file) = (self.cursor.middle(), self.cursor.file());

        self.index.set_sort_order(order);

        let top = selected
            .and_then(|key| self.index.position_of_top(&key))
            .unwrap_or(0);
        self.cursor.select_top(&self.index, top);
        self.cursor.select_middle(&self.index, middle);
        self.cursor.select_file(&self.index, file);
    }

    /// Step the cursor. Returns whether the selection changed.
    pub fn navigate(&mut self, level: Level, direction: Direction) -> bool {
        self.cursor.step(&self.index, level, direction)
    }

    pub fn select_top(&mut self, top: usize) {
        self.cursor.select_top(&self.index, top);
    }

    pub fn select_middle(&mut self, middle: usize) {
        self.cursor.select_middle(&self.index, middle);
    }

    pub fn select_file(&mut self, file: usize) {
        self.cursor.select_file(&self.index, file);
    }

    /// Display the selected file and preload its neighbours.
    ///
    /// Served from the cache when possible, otherwise decoded synchronously.
    /// `Ok(None)` when nothing is selected.
    pub fn show_current(&mut self) -> Result<Option<Arc<Decoded>>, DecodeError> {
        let Some(path) = self.current_path() else {
            self.player.stop();
            self.shown = None;
            return Ok(None);
        };

        if self.shown.as_ref() == Some(&path) {
            if let Some(decoded) = self.player.decoded() {
                return Ok(Some(Arc::clone(decoded)));
            }
        }

        let result = self.load(&path);
        match &result {
            Ok(decoded) => self.player.activate(Arc::clone(decoded), Instant::now()),
            Err(_) => self.player.stop(),
        }
        self.shown = Some(path);
        self.request_window();
        result.map(Some)
    }

    fn load(&self, path: &Path) -> Result<Arc<Decoded>, DecodeError> {
        if let Some(decoded) = self.cache.get(&path.to_path_buf()) {
            debug!(path = %path.display(), "cache hit");
            return Ok(decoded);
        }
        debug!(path = %path.display(), "cache miss, decoding");
        let decoded = Arc::new((self.decoder)(path)?);
        self.cache.put(path.to_path_buf(), Arc::clone(&decoded));
        Ok(decoded)
    }

    fn window(&self) -> PreloadWindow {
        self.cursor
            .preload_window(&self.index, self.backward, self.forward)
    }

    fn window_paths(&self, indices: &[usize]) -> Vec<PathBuf> {
        let files = self.index.files_in(self.cursor.top(), self.cursor.middle());
        indices
            .iter()
            .filter_map(|&i| files.get(i))
            .map(|e| self.path_of(e))
            .collect()
    }

    /// Request every uncached path of the preload window.
    pub fn request_window(&mut self) {
        let window = self.window();
        let mut paths = self.window_paths(&window.backward);
        paths.extend(self.window_paths(&window.forward));
        for path in paths {
            if self.cache.get(&path).is_none() {
                self.preloader.request(path);
            }
        }
    }

    /// Drain completion notifications.
    ///
    /// Returns `true` when the shown path was among them, i.e. a repaint
    /// may be useful.
    pub fn poll_loaded(&mut self) -> bool {
        let mut hit = false;
        while let Ok(path) = self.loaded_rx.try_recv() {
            if self.shown.as_ref() == Some(&path) {
                hit = true;
            }
        }
        hit
    }

    /// Advance the animation. Returns `true` when the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.player.tick(now)
    }

    /// Count window positions already in the cache (without promoting them).
    pub fn cache_status(&self) -> CacheStatus {
        let window = self.window();
        let cached = |indices: &[usize]| {
            self.window_paths(indices)
                .iter()
                .filter(|p| self.cache.contains(p))
                .count()
        };
        CacheStatus {
            backward_cached: cached(&window.backward),
            backward_total: window.backward.len(),
            forward_cached: cached(&window.forward),
            forward_total: window.forward.len(),
            backward_window: self.backward,
            forward_window: self.forward,
        }
    }

    /// Resize the preload window, requesting newly covered paths.
    pub fn set_preload_window(&mut self, backward: usize, forward: usize) {
        self.backward = backward;
        self.forward = forward;
        if self.shown.is_some() {
            self.request_window();
        }
    }

    /// Stop playback and the worker. Returns whether the worker exited in time.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.player.stop();
        self.preloader.stop();
        self.preloader.wait(timeout)
    }
}

/// A fresh cache with a preloader whose sink fills it and reports each
/// completed path on the returned channel.
fn preload_pipeline(
    decoder: &SharedDecoder,
    capacity: usize,
    options: PreloaderOptions,
) -> (DecodedCache, Preloader, Receiver<PathBuf>) {
    let cache = new_decoded_cache(capacity);
    let (loaded_tx, loaded_rx) = channel::<PathBuf>();

    let sink_cache = cache.clone();
    let worker_decoder = Arc::clone(decoder);
    let preloader = Preloader::with_decoder(
        move |path: &Path| worker_decoder(path),
        move |path: PathBuf, decoded: Arc<Decoded>| {
            sink_cache.put(path.clone(), decoded);
            // The UI may be gone during teardown.
            let _ = loaded_tx.send(path);
        },
    )
    .with_options(options);

    (cache, preloader, loaded_rx)
}
