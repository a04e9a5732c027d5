//! Navigation cursor
//!
//! Tracks the selected `(top, middle, file)` triple over a [`GroupIndex`]
//! and owns the stepping rules. Every caller that moves the selection goes
//! through [`NavigationCursor::step`] or the `select_*` methods so keyboard
//! and list-driven navigation behave identically.

use crate::index::{FileEntry, GroupIndex};

/// Which level of the hierarchy a step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Top,
    Middle,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// File indices to preload around the current one, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadWindow {
    pub backward: Vec<usize>,
    pub forward: Vec<usize>,
}

impl PreloadWindow {
    /// All indices, backward side first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.backward.iter().chain(self.forward.iter()).copied()
    }
}

/// Compute the preload window around `current` in a list of `len` files.
///
/// `backward` is `[current-1, ..., current-B]`, `forward` is
/// `[current+1, ..., current+F]`, both clipped to `0..len`.
pub fn preload_window(current: usize, len: usize, backward: usize, forward: usize) -> PreloadWindow {
    if len == 0 {
        return PreloadWindow::default();
    }
    let current = current.min(len - 1);
    PreloadWindow {
        backward: (1..=backward)
            .map_while(|d| current.checked_sub(d))
            .collect(),
        forward: (1..=forward)
            .map(|d| current + d)
            .take_while(|&i| i < len)
            .collect(),
    }
}

/// Selected position in a [`GroupIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    top: usize,
    middle: usize,
    file: usize,
}

impl NavigationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn middle(&self) -> usize {
        self.middle
    }

    pub fn file(&self) -> usize {
        self.file
    }

    /// `(top, middle, file)`
    pub fn position(&self) -> (usize, usize, usize) {
        (self.top, self.middle, self.file)
    }

    /// Back to `(0, 0, 0)`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The selected file, if the position is valid for `index`.
    pub fn current<'a>(&self, index: &'a GroupIndex) -> Option<&'a FileEntry> {
        index.files_in(self.top, self.middle).get(self.file).copied()
    }

    /// Preload window over the current file list.
    pub fn preload_window(&self, index: &GroupIndex, backward: usize, forward: usize) -> PreloadWindow {
        let len = index.files_in(self.top, self.middle).len();
        preload_window(self.file, len, backward, forward)
    }

    /// Select a top group (clamped); middle and file reset to 0.
    pub fn select_top(&mut self, index: &GroupIndex, top: usize) {
        self.top = clamp(top, index.top_count());
        self.middle = 0;
        self.file = 0;
    }

    /// Select a middle group (clamped); file resets to 0.
    pub fn select_middle(&mut self, index: &GroupIndex, middle: usize) {
        self.middle = clamp(middle, index.middle_count(self.top));
        self.file = 0;
    }

    /// Select a file in the current middle group (clamped).
    pub fn select_file(&mut self, index: &GroupIndex, file: usize) {
        self.file = clamp(file, index.files_in(self.top, self.middle).len());
    }

    /// Move one step at `level`. Returns whether the position changed.
    pub fn step(&mut self, index: &GroupIndex, level: Level, direction: Direction) -> bool {
        if index.is_empty() {
            return false;
        }
        let before = self.position();
        match (level, direction) {
            (Level::File, Direction::Forward) => self.next_file(index),
            (Level::File, Direction::Backward) => self.prev_file(index),
            (Level::Middle, Direction::Forward) => self.next_middle(index),
            (Level::Middle, Direction::Backward) => self.prev_middle(index),
            (Level::Top, Direction::Forward) => self.next_top(index),
            (Level::Top, Direction::Backward) => self.prev_top(index),
        }
        self.position() != before
    }

    fn next_file(&mut self, index: &GroupIndex) {
        if self.file + 1 < index.files_in(self.top, self.middle).len() {
            self.file += 1;
        } else if !self.advance_middle(index) && !self.advance_top(index) {
            self.set(0, 0, 0);
        }
    }

    fn prev_file(&mut self, index: &GroupIndex) {
        if self.file > 0 {
            self.file -= 1;
            return;
        }
        let (top, middle) = if self.middle > 0 {
            (self.top, self.middle - 1)
        } else if self.top > 0 {
            let top = self.top - 1;
            (top, index.middle_count(top).saturating_sub(1))
        } else {
            let top = index.top_count() - 1;
            (top, index.middle_count(top).saturating_sub(1))
        };
        let file = index.files_in(top, middle).len().saturating_sub(1);
        self.set(top, middle, file);
    }

    fn next_middle(&mut self, index: &GroupIndex) {
        if !self.advance_middle(index) {
            self.advance_top(index);
        }
    }

    fn prev_middle(&mut self, index: &GroupIndex) {
        if self.middle > 0 {
            self.set(self.top, self.middle - 1, 0);
        } else if self.top > 0 {
            let top = self.top - 1;
            self.set(top, index.middle_count(top).saturating_sub(1), 0);
        }
    }

    fn next_top(&mut self, index: &GroupIndex) {
        self.advance_top(index);
    }

    /// Backward lands on the last set of the previous group.
    fn prev_top(&mut self, index: &GroupIndex) {
        if self.top > 0 {
            let top = self.top - 1;
            self.set(top, index.middle_count(top).saturating_sub(1), 0);
        }
    }

    fn advance_middle(&mut self, index: &GroupIndex) -> bool {
        if self.middle + 1 < index.middle_count(self.top) {
            self.set(self.top, self.middle + 1, 0);
            true
        } else {
            false
        }
    }

    fn advance_top(&mut self, index: &GroupIndex) -> bool {
        if self.top + 1 < index.top_count() {
            self.set(self.top + 1, 0, 0);
            true
        } else {
            false
        }
    }

    fn set(&mut self, top: usize, middle: usize, file: usize) {
        self.top = top;
        self.middle = middle;
        self.file = file;
    }
}

fn clamp(value: usize, len: usize) -> usize {
    value.min(len.saturating_sub(1))
}
