//! Titled, bordered list used for the three group columns.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::theme::current_theme;

/// One row of a group column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub label: String,
    /// Dimmed suffix (file count, date)
    pub detail: Option<String>,
}

impl ListRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// A column listing group keys or file names with one selected row.
pub struct GroupList<'a> {
    title: &'a str,
    rows: &'a [ListRow],
    selected: Option<usize>,
    focused: bool,
}

impl<'a> GroupList<'a> {
    pub fn new(title: &'a str, rows: &'a [ListRow]) -> Self {
        Self {
            title,
            rows,
            selected: None,
            focused: false,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for GroupList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = current_theme();

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| {
                let mut spans = vec![Span::styled(row.label.clone(), theme.text_style())];
                if let Some(detail) = &row.detail {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(detail.clone(), theme.text_secondary_style()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let title = format!(" {} ({}) ", self.title, self.rows.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(self.focused))
            .title(Span::styled(title, theme.border_style(self.focused)));

        let list = List::new(items)
            .block(block)
            .highlight_style(theme.highlight_style(self.focused));

        let mut state = ListState::default();
        state.select(self.selected.filter(|&i| i < self.rows.len()));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
