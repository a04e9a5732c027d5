//! ANSI color helpers for CLI output

use std::io::IsTerminal;

use ratatui::style::Color;

use super::Theme;

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a ratatui Color to an ANSI escape code.
pub fn color_to_ansi(color: Color) -> &'static str {
    match color {
        Color::Black => "\x1b[30m",
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
        Color::Magenta => "\x1b[35m",
        Color::Cyan => "\x1b[36m",
        Color::Gray => "\x1b[37m",
        Color::DarkGray => "\x1b[90m",
        Color::LightRed => "\x1b[91m",
        Color::LightGreen => "\x1b[92m",
        Color::LightYellow => "\x1b[93m",
        Color::LightBlue => "\x1b[94m",
        Color::LightMagenta => "\x1b[95m",
        Color::LightCyan => "\x1b[96m",
        Color::White => "\x1b[97m",
        Color::Reset => "\x1b[0m",
        // RGB and indexed colors have no fixed escape here
        _ => "",
    }
}

/// Whether stdout should receive color codes.
pub fn stdout_supports_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Wraps text in theme colors, or passes it through when color is off.
#[derive(Debug, Clone)]
pub struct Painter {
    theme: Theme,
    enabled: bool,
}

impl Painter {
    pub fn new(theme: Theme, enabled: bool) -> Self {
        Self { theme, enabled }
    }

    /// Painter for stdout using the current theme.
    pub fn stdout() -> Self {
        Self::new(super::current_theme(), stdout_supports_color())
    }

    fn paint(&self, color: Color, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color_to_ansi(color), text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(self.theme.accent, text)
    }

    pub fn primary(&self, text: &str) -> String {
        self.paint(self.theme.text_primary, text)
    }

    pub fn secondary(&self, text: &str) -> String {
        self.paint(self.theme.text_secondary, text)
    }
}
