//! Background preloader
//!
//! Owns at most one live decode worker. Requests are queued FIFO. A request
//! arriving when no worker is running spawns a fresh worker with a fresh
//! queue; a worker that was asked to stop is waited on first.
//! There is no in-flight dedup: callers check the cache before requesting.

pub mod worker;

pub use worker::{SharedDecoder, SharedSink};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::decode::{decode_file, Decoded, DecodeError};
use worker::{spawn_worker, Message, WorkerHandle};

/// Lifecycle of the preloader's worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderState {
    /// No live worker.
    Idle,
    /// A worker is consuming the queue.
    Running,
    /// Stop was requested; the worker finishes its current decode and exits.
    StopRequested,
}

/// Worker timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloaderOptions {
    /// How long an idle worker blocks before re-checking its stop flag
    pub poll_interval: Duration,
    /// Bound on waiting for a stopping worker, on drop and before a respawn
    pub shutdown_timeout: Duration,
}

impl Default for PreloaderOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            shutdown_timeout: Duration::from_secs(1),
        }
    }
}

/// Single-worker background decoder.
pub struct Preloader {
    decoder: SharedDecoder,
    sink: SharedSink,
    options: PreloaderOptions,
    worker: Option<WorkerHandle>,
}

impl Preloader {
    /// Create an idle preloader decoding with [`decode_file`].
    pub fn new(sink: impl Fn(PathBuf, Arc<Decoded>) + Send + Sync + 'static) -> Self {
        Self::with_decoder(decode_file, sink)
    }

    /// Create an idle preloader with a custom decode function.
    pub fn with_decoder(
        decoder: impl Fn(&Path) -> Result<Decoded, DecodeError> + Send + Sync + 'static,
        sink: impl Fn(PathBuf, Arc<Decoded>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            decoder: Arc::new(decoder),
            sink: Arc::new(sink),
            options: PreloaderOptions::default(),
            worker: None,
        }
    }

    pub fn with_options(mut self, options: PreloaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> PreloaderOptions {
        self.options
    }

    pub fn state(&self) -> PreloaderState {
        match &self.worker {
            None => PreloaderState::Idle,
            Some(w) if w.is_finished() => PreloaderState::Idle,
            Some(w) if w.stop_requested() => PreloaderState::StopRequested,
            Some(_) => PreloaderState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == PreloaderState::Running
    }

    /// Queue `path` for decoding, starting a worker when none is live.
    pub fn request(&mut self, path: PathBuf) {
        if !self.is_running() && !self.spawn() {
            return;
        }

        let Some(worker) = &self.worker else {
            return;
        };
        if let Err(failed) = worker.tx.send(Message::Load(path)) {
            // Worker died between the state check and the send.
            debug!("preload worker gone, respawning");
            if self.spawn() {
                if let Some(worker) = &self.worker {
                    let _ = worker.tx.send(failed.0);
                }
            }
        }
    }

    /// Ask the worker to exit after its current decode. Queued paths are dropped.
    pub fn stop(&mut self) {
        if let Some(worker) = &self.worker {
            if !worker.is_finished() && !worker.stop_requested() {
                debug!("stopping preload worker");
                worker.request_stop();
            }
        }
    }

    /// Wait up to `timeout` for the worker to exit.
    ///
    /// Returns `false` if it is still running; it is then left detached.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        match &mut self.worker {
            None => true,
            Some(worker) => worker.wait(timeout),
        }
    }

    /// Replace the current worker with a fresh one.
    ///
    /// A worker still finishing its last decode is waited on first, so two
    /// workers never decode at once. It is detached only if the wait times out.
    fn spawn(&mut self) -> bool {
        if let Some(old) = &mut self.worker {
            if !old.is_finished() {
                old.request_stop();
                if !old.wait(self.options.shutdown_timeout) {
                    warn!("previous preload worker did not stop in time, detaching");
                }
            }
        }
        match spawn_worker(
            Arc::clone(&self.decoder),
            Arc::clone(&self.sink),
            self.options.poll_interval,
        ) {
            Ok(worker) => {
                self.worker = Some(worker);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to start preload worker");
                self.worker = None;
                false
            }
        }
    }
}

impl Drop for Preloader {
    fn drop(&mut self) {
        self.stop();
        if !self.wait(self.options.shutdown_timeout) {
            warn!("preload worker did not stop in time, detaching");
        }
    }
}
