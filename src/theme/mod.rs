//! Theme configuration for TUI and CLI
//!
//! Centralizes the colors used by the browser and by plain-text command
//! output. Provides ratatui styles (for the TUI) and ANSI escape codes
//! (for the CLI).

use ratatui::style::Color;

pub mod cli;
pub mod tui;

pub use cli::{color_to_ansi, Painter, ANSI_RESET};

/// Theme configuration for the TUI and CLI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: Color,
    /// Secondary/dimmed text color (dates, hints, counters)
    pub text_secondary: Color,
    /// Accent color for the focused column and key hints
    pub accent: Color,
    /// Error color (decode failures)
    pub error: Color,
    /// Color of the cache indicator when the window is fully decoded
    pub success: Color,
    /// Border of columns without focus
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::gallery()
    }
}

impl Theme {
    /// Default theme: gray text, cyan accent on the terminal background.
    pub fn gallery() -> Self {
        Self {
            text_primary: Color::Gray,
            text_secondary: Color::DarkGray,
            accent: Color::LightCyan,
            error: Color::Red,
            success: Color::LightGreen,
            border: Color::DarkGray,
        }
    }
}

/// Global theme instance.
pub fn current_theme() -> Theme {
    Theme::default()
}
