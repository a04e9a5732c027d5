//! Background decode worker
//!
//! A single thread consuming a FIFO of paths. Each path is decoded with the
//! shared decoder and the result handed to the completion sink. The worker
//! exits on a stop sentinel, when its stop flag is set, or when the queue
//! sender is dropped.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::decode::{Decoded, DecodeError};

/// A thread-safe, shared decode function.
pub type SharedDecoder = Arc<dyn Fn(&Path) -> Result<Decoded, DecodeError> + Send + Sync>;

/// Receives every successfully decoded image, exactly once per decode.
pub type SharedSink = Arc<dyn Fn(PathBuf, Arc<Decoded>) + Send + Sync>;

/// Items on the worker queue
#[derive(Debug)]
pub(crate) enum Message {
    Load(PathBuf),
    Stop,
}

/// Handle to one spawned worker thread.
pub(crate) struct WorkerHandle {
    /// Queue sender
    pub tx: Sender<Message>,
    /// Set by `Preloader::stop`, checked between items and while idle
    stop: Arc<AtomicBool>,
    /// Disconnects when the worker thread exits (normally or by panic)
    done_rx: Receiver<()>,
    /// Observed exit through `done_rx`
    exited: bool,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        // The worker may already be gone; the flag alone is enough then.
        let _ = self.tx.send(Message::Stop);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.exited || self.thread.is_finished()
    }

    /// Wait up to `timeout` for the thread to exit.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        if self.is_finished() {
            return true;
        }
        match self.done_rx.recv_timeout(timeout) {
            // Nothing is ever sent; disconnection is the exit signal.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                self.exited = true;
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

/// Spawn a worker with a fresh queue and stop flag.
pub(crate) fn spawn_worker(
    decoder: SharedDecoder,
    sink: SharedSink,
    poll_interval: Duration,
) -> std::io::Result<WorkerHandle> {
    let (tx, rx) = channel::<Message>();
    let (done_tx, done_rx) = channel::<()>();
    let stop = Arc::new(AtomicBool::new(false));
    let worker_stop = Arc::clone(&stop);

    let thread = thread::Builder::new()
        .name("imgnav-preload".to_string())
        .spawn(move || {
            // Dropped on exit or unwind, which wakes `WorkerHandle::wait`.
            let _done = done_tx;
            run(&rx, &worker_stop, &decoder, &sink, poll_interval);
        })?;

    info!("preload worker started");
    Ok(WorkerHandle {
        tx,
        stop,
        done_rx,
        exited: false,
        thread,
    })
}

fn run(
    rx: &Receiver<Message>,
    stop: &AtomicBool,
    decoder: &SharedDecoder,
    sink: &SharedSink,
    poll_interval: Duration,
) {
    loop {
        if stop.load(Ordering::Acquire) {
            break;
        }
        let path = match rx.recv_timeout(poll_interval) {
            Ok(Message::Load(path)) => path,
            Ok(Message::Stop) => break,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        if stop.load(Ordering::Acquire) {
            break;
        }
        if !path.exists() {
            debug!(path = %path.display(), "skipping vanished file");
            continue;
        }

        match decoder(&path) {
            Ok(decoded) => sink(path, Arc::new(decoded)),
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "file vanished during decode");
            }
            Err(e) => warn!(error = %e, "preload failed"),
        }
    }
    info!("preload worker exited");
}
