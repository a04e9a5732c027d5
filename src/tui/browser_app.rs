//! Browse command TUI application
//!
//! Three group columns, a half-block preview and a status line with the
//! cache indicator. All selection changes go through the viewer's cursor.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use humansize::{format_size, DECIMAL};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::{info, warn};

use super::app::layout::{build_browser_layout, build_fullscreen_layout};
use super::app::status_footer::{cache_span, render_footer, render_status_line};
use super::app::App;
use super::event::Event;
use super::widgets::{GroupList, HalfBlockImage, ListRow, ScaledFrameCache};
use crate::config::{Config, KeyAction, KeyMap, MAX_PRELOAD_WINDOW};
use crate::cursor::{Direction, Level};
use crate::index::scan_folder;
use crate::opener::open_external;
use crate::theme::current_theme;
use crate::viewer::{CacheStatus, Viewer};

/// Event poll interval; bounds animation timing resolution.
pub const TICK_RATE: Duration = Duration::from_millis(20);

/// Footer hint line built from the active bindings.
fn footer_hints(keymap: &KeyMap) -> String {
    let pair = |a: KeyAction, b: KeyAction| format!("{}/{}", keymap.label(a), keymap.label(b));
    let window = [
        KeyAction::ShrinkBackward,
        KeyAction::GrowBackward,
        KeyAction::ShrinkForward,
        KeyAction::GrowForward,
    ]
    .map(|a| keymap.label(a))
    .join(" ");
    [
        format!("{}: focus", keymap.label(KeyAction::FocusNext)),
        format!("{}: step", pair(KeyAction::StepBackward, KeyAction::StepForward)),
        format!("{}: file", pair(KeyAction::PrevFile, KeyAction::NextFile)),
        format!("{}: middle", pair(KeyAction::NextMiddle, KeyAction::PrevMiddle)),
        format!("{}: top", pair(KeyAction::NextTop, KeyAction::PrevTop)),
        format!("{}: fullscreen", keymap.label(KeyAction::Fullscreen)),
        format!("{}: sort", keymap.label(KeyAction::ToggleSort)),
        format!("{}: rescan", keymap.label(KeyAction::Rescan)),
        format!("{}: open", keymap.label(KeyAction::OpenExternal)),
        format!("{window}: window"),
        format!("{}: quit", keymap.label(KeyAction::Quit)),
    ]
    .join(" | ")
}

/// Column that receives up/down keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Top,
    Middle,
    #[default]
    Files,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Top => Focus::Middle,
            Focus::Middle => Focus::Files,
            Focus::Files => Focus::Top,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Top => Focus::Files,
            Focus::Middle => Focus::Top,
            Focus::Files => Focus::Middle,
        }
    }

    /// Cursor level stepped by up/down in this column.
    pub fn level(self) -> Level {
        match self {
            Focus::Top => Level::Top,
            Focus::Middle => Level::Middle,
            Focus::Files => Level::File,
        }
    }
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Browser state, independent of the real terminal.
pub struct BrowserState {
    viewer: Viewer,
    config: Config,
    config_path: PathBuf,
    focus: Focus,
    fullscreen: bool,
    status_message: Option<String>,
    load_error: Option<String>,
    file_size: Option<u64>,
    scaled: ScaledFrameCache,
    last_status: CacheStatus,
    keymap: KeyMap,
    footer: String,
}

impl BrowserState {
    /// Wrap an open viewer and show its first file.
    pub fn new(viewer: Viewer, config: Config, config_path: PathBuf) -> Self {
        let keymap = config.keys.keymap().unwrap_or_else(|e| {
            warn!(error = %e, "invalid key bindings, using defaults");
            KeyMap::default()
        });
        let mut state = Self {
            viewer,
            config,
            config_path,
            focus: Focus::default(),
            fullscreen: false,
            status_message: None,
            load_error: None,
            file_size: None,
            scaled: ScaledFrameCache::new(),
            last_status: CacheStatus::default(),
            footer: footer_hints(&keymap),
            keymap,
        };
        state.show_current();
        state
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        self.status_message = None;
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return KeyOutcome::Continue;
        }

        let Some(action) = self.keymap.action(key.code) else {
            return match key.code {
                KeyCode::Esc if self.fullscreen => {
                    self.fullscreen = false;
                    KeyOutcome::Continue
                }
                KeyCode::Esc => KeyOutcome::Quit,
                _ => KeyOutcome::Continue,
            };
        };

        match action {
            KeyAction::Quit => return KeyOutcome::Quit,

            KeyAction::FocusNext => self.focus = self.focus.next(),
            KeyAction::FocusPrev => self.focus = self.focus.prev(),

            KeyAction::StepBackward => self.step(self.focus.level(), Direction::Backward),
            KeyAction::StepForward => self.step(self.focus.level(), Direction::Forward),
            KeyAction::PrevFile => self.step(Level::File, Direction::Backward),
            KeyAction::NextFile => self.step(Level::File, Direction::Forward),

            KeyAction::NextTop => self.step(Level::Top, Direction::Forward),
            KeyAction::PrevTop => self.step(Level::Top, Direction::Backward),
            KeyAction::NextMiddle => self.step(Level::Middle, Direction::Forward),
            KeyAction::PrevMiddle => self.step(Level::Middle, Direction::Backward),

            KeyAction::Fullscreen => self.fullscreen = !self.fullscreen,
            KeyAction::ToggleSort => self.toggle_sort(),
            KeyAction::Rescan => self.rescan(),
            KeyAction::OpenExternal => self.open_current(),

            KeyAction::ShrinkBackward => self.adjust_window(-1, 0),
            KeyAction::GrowBackward => self.adjust_window(1, 0),
            KeyAction::ShrinkForward => self.adjust_window(0, -1),
            KeyAction::GrowForward => self.adjust_window(0, 1),
        }
        KeyOutcome::Continue
    }

    /// Advance animation and collect background results.
    ///
    /// Returns `true` when the screen should be redrawn.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let loaded = self.viewer.poll_loaded();
        if loaded && self.load_error.is_some() {
            self.show_current();
        }
        let advanced = self.viewer.tick(now);
        let status = self.viewer.cache_status();
        let status_changed = status != self.last_status;
        self.last_status = status;
        loaded || advanced || status_changed
    }

    fn step(&mut self, level: Level, direction: Direction) {
        if self.viewer.navigate(level, direction) {
            self.show_current();
        }
    }

    fn show_current(&mut self) {
        self.file_size = self
            .viewer
            .current_path()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len());
        match self.viewer.show_current() {
            Ok(_) => self.load_error = None,
            Err(e) => {
                warn!(error = %e, "could not load image");
                self.load_error = Some(format!("could not load image: {}", e));
            }
        }
        self.last_status = self.viewer.cache_status();
    }

    fn toggle_sort(&mut self) {
        let order = self.viewer.sort_order().toggled();
        self.viewer.set_sort_order(order);
        self.config.library.sort_order = order;
        self.persist();
        self.show_current();
        self.status_message = Some(format!("sorted by {}", order));
    }

    fn rescan(&mut self) {
        let root = self.viewer.root().to_path_buf();
        match scan_folder(&root) {
            Ok(entries) => {
                self.viewer.rescan(entries);
                self.scaled.clear();
                self.show_current();
                self.status_message =
                    Some(format!("rescanned: {} files", self.viewer.index().len()));
            }
            Err(e) => self.status_message = Some(format!("rescan failed: {}", e)),
        }
    }

    fn open_current(&mut self) {
        let Some(path) = self.viewer.current_path() else {
            return;
        };
        match open_external(&path) {
            Ok(()) => self.status_message = Some("opened in external viewer".to_string()),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    fn adjust_window(&mut self, backward: isize, forward: isize) {
        let (b, f) = self.viewer.preload_window_sizes();
        let clamp = |v: usize, d: isize| v.saturating_add_signed(d).min(MAX_PRELOAD_WINDOW);
        let (b, f) = (clamp(b, backward), clamp(f, forward));
        self.viewer.set_preload_window(b, f);
        self.config.set_preload_window(b, f);
        self.persist();
        self.last_status = self.viewer.cache_status();
        self.status_message = Some(format!("preload window: -{} +{}", b, f));
    }

    /// Save folder, sort order and window sizes.
    pub fn persist(&mut self) {
        self.config.set_library_folder(self.viewer.root());
        if let Err(e) = self.config.save_to(&self.config_path) {
            warn!(error = %e, "failed to save config");
            self.status_message = Some(format!("could not save config: {}", e));
        }
    }

    /// Stop the worker and save the configuration.
    pub fn shutdown(&mut self) {
        self.persist();
        let timeout = self.config.shutdown_timeout();
        if !self.viewer.shutdown(timeout) {
            warn!("preload worker still busy at exit");
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        if self.fullscreen {
            let (image_area, info_area) = build_fullscreen_layout(frame.area());
            self.render_image(frame, image_area);
            render_status_line(frame, info_area, self.status_spans());
            return;
        }

        let layout = build_browser_layout(frame.area());
        let theme = current_theme();

        let header = Line::from(vec![
            Span::styled(" imgnav ", theme.accent_bold_style()),
            Span::styled(self.viewer.root().display().to_string(), theme.text_style()),
            Span::styled(
                format!(
                    "  sort: {}  window: -{} +{}",
                    self.viewer.sort_order(),
                    self.viewer.preload_window_sizes().0,
                    self.viewer.preload_window_sizes().1
                ),
                theme.text_secondary_style(),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), layout.header);

        let (top, middle, file) = self.viewer.cursor().position();
        let top_rows = self.top_rows();
        let middle_rows = self.middle_rows();
        let file_rows = self.file_rows();

        frame.render_widget(
            GroupList::new("Groups", &top_rows)
                .selected(Some(top))
                .focused(self.focus == Focus::Top),
            layout.top,
        );
        frame.render_widget(
            GroupList::new("Sets", &middle_rows)
                .selected(Some(middle))
                .focused(self.focus == Focus::Middle),
            layout.middle,
        );
        frame.render_widget(
            GroupList::new("Files", &file_rows)
                .selected(Some(file))
                .focused(self.focus == Focus::Files),
            layout.files,
        );

        let title = self
            .viewer
            .current_entry()
            .map(|e| format!(" {} ", e.display_name()))
            .unwrap_or_default();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(false))
            .title(title);
        let inner = block.inner(layout.preview);
        frame.render_widget(block, layout.preview);
        self.render_image(frame, inner);

        render_status_line(frame, layout.status, self.status_spans());
        render_footer(frame, layout.footer, &self.footer);
    }

    fn render_image(&mut self, frame: &mut Frame, area: Rect) {
        let theme = current_theme();
        if let Some(err) = &self.load_error {
            let text = Paragraph::new(err.clone())
                .style(theme.error_style())
                .wrap(Wrap { trim: true });
            frame.render_widget(text, area);
            return;
        }
        if self.viewer.index().is_empty() {
            let text = Paragraph::new("No images in this folder").style(theme.text_secondary_style());
            frame.render_widget(text, area);
            return;
        }

        let frame_index = self.viewer.player().frame_index();
        if let (Some(path), Some(image)) = (self.viewer.shown_path(), self.viewer.current_image()) {
            let scaled = self
                .scaled
                .get_or_scale(path, frame_index, image, area.width, area.height);
            frame.render_widget(HalfBlockImage::new(scaled), area);
        }
    }

    fn status_spans(&self) -> Vec<Span<'static>> {
        let theme = current_theme();
        let index = self.viewer.index();
        let (top, middle, file) = self.viewer.cursor().position();
        let mut spans = Vec::new();

        if !index.is_empty() {
            spans.push(Span::styled(
                format!(
                    "{}/{} \u{b7} {}/{} \u{b7} {}/{}  ",
                    top + 1,
                    index.top_count(),
                    middle + 1,
                    index.middle_count(top),
                    file + 1,
                    index.files_in(top, middle).len()
                ),
                theme.text_secondary_style(),
            ));
        }
        if let Some(entry) = self.viewer.current_entry() {
            spans.push(Span::styled(entry.name().to_string(), theme.text_style()));
            if let Some(size) = self.file_size {
                spans.push(Span::styled(
                    format!(" {}", format_size(size, DECIMAL)),
                    theme.text_secondary_style(),
                ));
            }
            if self.viewer.player().frame_count() > 1 {
                spans.push(Span::styled(" (animated)", theme.accent_style()));
            }
            spans.push(Span::raw("  "));
        }
        spans.push(cache_span(&self.viewer.cache_status()));
        if let Some(msg) = &self.status_message {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(msg.clone(), theme.accent_style()));
        }
        spans
    }

    fn top_rows(&self) -> Vec<ListRow> {
        let index = self.viewer.index();
        index
            .top_keys()
            .iter()
            .map(|key| {
                ListRow::new(key.clone()).with_detail(format!("({})", index.top_group(key).len()))
            })
            .collect()
    }

    fn middle_rows(&self) -> Vec<ListRow> {
        let index = self.viewer.index();
        let top = self.viewer.cursor().top();
        index
            .middle_groups_at(top)
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let label = if group.key.is_empty() {
                    "(none)".to_string()
                } else {
                    group.key.to_string()
                };
                let row = ListRow::new(label);
                match index
                    .first_file_of_middle(top, i)
                    .and_then(|f| f.created())
                {
                    Some(created) => row.with_detail(format_date(created)),
                    None => row,
                }
            })
            .collect()
    }

    fn file_rows(&self) -> Vec<ListRow> {
        let cursor = self.viewer.cursor();
        self.viewer
            .index()
            .files_in(cursor.top(), cursor.middle())
            .iter()
            .map(|f| ListRow::new(f.display_name()))
            .collect()
    }
}

/// `%Y/%m/%d` in local time.
pub fn format_date(time: std::time::SystemTime) -> String {
    chrono::DateTime::<chrono::Local>::from(time)
        .format("%Y/%m/%d")
        .to_string()
}

/// Browser bound to the real terminal.
pub struct BrowserApp {
    app: App,
    state: BrowserState,
}

impl BrowserApp {
    pub fn new(state: BrowserState) -> Result<Self> {
        let app = App::new(TICK_RATE)?;
        Ok(Self { app, state })
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        info!("browser started");
        let mut dirty = true;
        loop {
            if dirty {
                self.app.draw(|f| self.state.draw(f))?;
                dirty = false;
            }
            match self.app.next_event()? {
                Event::Key(key) => {
                    if self.state.handle_key(key) == KeyOutcome::Quit {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                Event::Tick => dirty = self.state.on_tick(Instant::now()),
                Event::Quit => break,
            }
        }
        self.state.shutdown();
        info!("browser closed");
        Ok(())
    }
}
