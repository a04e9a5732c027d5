//! Layout helpers for the browser
//!
//! Normal mode: header (1 row), four columns (flexible), status line
//! (1 row), footer (1 row). Fullscreen mode: preview plus one info row.

use ratatui::layout::{Constraint, Layout, Rect};

/// Areas of the normal browser screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserLayout {
    pub header: Rect,
    pub top: Rect,
    pub middle: Rect,
    pub files: Rect,
    pub preview: Rect,
    pub status: Rect,
    pub footer: Rect,
}

/// Split `area` into header / columns / status / footer.
pub fn build_browser_layout(area: Rect) -> BrowserLayout {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    let columns = Layout::horizontal([
        Constraint::Percentage(16),
        Constraint::Percentage(18),
        Constraint::Percentage(22),
        Constraint::Percentage(44),
    ])
    .split(rows[1]);

    BrowserLayout {
        header: rows[0],
        top: columns[0],
        middle: columns[1],
        files: columns[2],
        preview: columns[3],
        status: rows[2],
        footer: rows[3],
    }
}

/// Split `area` into image / info row for fullscreen mode.
pub fn build_fullscreen_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    (rows[0], rows[1])
}
