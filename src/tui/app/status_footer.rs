//! Status line and footer rendering
//!
//! The status line shows position, file name and the cache indicator; the
//! footer shows key hints.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::current_theme;
use crate::viewer::CacheStatus;

/// Render a status line made of pre-styled spans.
pub fn render_status_line(frame: &mut Frame, area: Rect, spans: Vec<Span<'static>>) {
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a centered footer with keybinding hints.
pub fn render_footer(frame: &mut Frame, area: Rect, text: &str) {
    let theme = current_theme();
    let footer = Paragraph::new(text.to_string())
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Cache indicator span, highlighted once the whole window is decoded.
pub fn cache_span(status: &CacheStatus) -> Span<'static> {
    let theme = current_theme();
    let complete = status.backward_cached == status.backward_total
        && status.forward_cached == status.forward_total;
    let style = if complete {
        theme.success_style()
    } else {
        theme.text_secondary_style()
    };
    Span::styled(status.to_string(), style)
}
