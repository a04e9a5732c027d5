//! Animation player
//!
//! Steps a decoded frame sequence on a per-frame deadline. The caller
//! drives it with [`AnimationPlayer::tick`] from its event loop; there is no
//! timer thread, so a disarmed player can never fire late.

use std::sync::Arc;
use std::time::{Duration, Instant};

use image::RgbaImage;

use crate::decode::Decoded;

/// Plays one decoded image. Stills are a one-frame sequence that never arms.
#[derive(Debug, Default)]
pub struct AnimationPlayer {
    decoded: Option<Arc<Decoded>>,
    frame: usize,
    deadline: Option<Instant>,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start showing `decoded` from frame 0.
    pub fn activate(&mut self, decoded: Arc<Decoded>, now: Instant) {
        self.stop();
        self.deadline = if decoded.frame_count() > 1 {
            decoded.frame_duration(0).map(|d| now + d)
        } else {
            None
        };
        self.decoded = Some(decoded);
    }

    /// Advance one frame if the deadline has passed.
    ///
    /// Re-arms with the new frame's own duration. Returns `true` when the
    /// displayed frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let (Some(deadline), Some(decoded)) = (self.deadline, &self.decoded) else {
            return false;
        };
        if now < deadline {
            return false;
        }
        self.frame = (self.frame + 1) % decoded.frame_count();
        self.deadline = decoded.frame_duration(self.frame).map(|d| now + d);
        true
    }

    /// Disarm, then drop the frames.
    pub fn stop(&mut self) {
        self.deadline = None;
        self.decoded = None;
        self.frame = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Duration of the frame currently displayed, for animated images.
    pub fn current_interval(&self) -> Option<Duration> {
        self.deadline?;
        self.decoded.as_ref()?.frame_duration(self.frame)
    }

    /// Time left before the next frame is due.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    pub fn current_image(&self) -> Option<&RgbaImage> {
        self.decoded.as_ref()?.frame(self.frame)
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.decoded.as_ref().map_or(0, |d| d.frame_count())
    }

    pub fn decoded(&self) -> Option<&Arc<Decoded>> {
        self.decoded.as_ref()
    }
}
