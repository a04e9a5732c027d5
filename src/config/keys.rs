//! Key bindings for the browser
//!
//! The `[keys]` table maps an action name to the keys that trigger it:
//!
//! ```toml
//! [keys]
//! next_middle = ["n", "PageDown"]
//! next_top = ["N"]
//! ```
//!
//! Actions missing from the table keep their default keys. Esc (leave
//! fullscreen, then quit) and Ctrl-C are fixed.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Something the browser can do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyAction {
    Quit,
    FocusNext,
    FocusPrev,
    StepBackward,
    StepForward,
    PrevFile,
    NextFile,
    NextMiddle,
    PrevMiddle,
    NextTop,
    PrevTop,
    Fullscreen,
    ToggleSort,
    Rescan,
    OpenExternal,
    ShrinkBackward,
    GrowBackward,
    ShrinkForward,
    GrowForward,
}

impl KeyAction {
    pub const ALL: [KeyAction; 19] = [
        KeyAction::Quit,
        KeyAction::FocusNext,
        KeyAction::FocusPrev,
        KeyAction::StepBackward,
        KeyAction::StepForward,
        KeyAction::PrevFile,
        KeyAction::NextFile,
        KeyAction::NextMiddle,
        KeyAction::PrevMiddle,
        KeyAction::NextTop,
        KeyAction::PrevTop,
        KeyAction::Fullscreen,
        KeyAction::ToggleSort,
        KeyAction::Rescan,
        KeyAction::OpenExternal,
        KeyAction::ShrinkBackward,
        KeyAction::GrowBackward,
        KeyAction::ShrinkForward,
        KeyAction::GrowForward,
    ];

    /// Name used in the `[keys]` table.
    pub fn name(self) -> &'static str {
        match self {
            KeyAction::Quit => "quit",
            KeyAction::FocusNext => "focus_next",
            KeyAction::FocusPrev => "focus_prev",
            KeyAction::StepBackward => "step_backward",
            KeyAction::StepForward => "step_forward",
            KeyAction::PrevFile => "prev_file",
            KeyAction::NextFile => "next_file",
            KeyAction::NextMiddle => "next_middle",
            KeyAction::PrevMiddle => "prev_middle",
            KeyAction::NextTop => "next_top",
            KeyAction::PrevTop => "prev_top",
            KeyAction::Fullscreen => "fullscreen",
            KeyAction::ToggleSort => "toggle_sort",
            KeyAction::Rescan => "rescan",
            KeyAction::OpenExternal => "open_external",
            KeyAction::ShrinkBackward => "shrink_backward",
            KeyAction::GrowBackward => "grow_backward",
            KeyAction::ShrinkForward => "shrink_forward",
            KeyAction::GrowForward => "grow_forward",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Keys bound when the config does not say otherwise.
    pub fn default_keys(self) -> &'static [&'static str] {
        match self {
            KeyAction::Quit => &["q"],
            KeyAction::FocusNext => &["Tab"],
            KeyAction::FocusPrev => &["BackTab"],
            KeyAction::StepBackward => &["Up", "k"],
            KeyAction::StepForward => &["Down", "j"],
            KeyAction::PrevFile => &["Left", "h"],
            KeyAction::NextFile => &["Right", "l"],
            KeyAction::NextMiddle => &["n"],
            KeyAction::PrevMiddle => &["p"],
            KeyAction::NextTop => &["N"],
            KeyAction::PrevTop => &["P"],
            KeyAction::Fullscreen => &["f", "Enter"],
            KeyAction::ToggleSort => &["s"],
            KeyAction::Rescan => &["r"],
            KeyAction::OpenExternal => &["o"],
            KeyAction::ShrinkBackward => &["["],
            KeyAction::GrowBackward => &["]"],
            KeyAction::ShrinkForward => &["{"],
            KeyAction::GrowForward => &["}"],
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors in the `[keys]` table
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyConfigError {
    #[error("unknown key action '{0}'")]
    UnknownAction(String),

    #[error("unknown key '{key}' for action '{action}'")]
    UnknownKey { action: KeyAction, key: String },

    #[error("key '{key}' is bound to both '{first}' and '{second}'")]
    Conflict {
        key: String,
        first: KeyAction,
        second: KeyAction,
    },
}

/// Parse a key name: a single character (case-sensitive) or a named key
/// such as `Up`, `Enter`, `PageDown` or `F5` (case-insensitive).
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "tab" => KeyCode::Tab,
        "backtab" | "shift-tab" => KeyCode::BackTab,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        f if f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        _ => return None,
    };
    Some(code)
}

/// The `[keys]` table, with every action present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct KeysConfig {
    bindings: BTreeMap<KeyAction, Vec<String>>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        let bindings = KeyAction::ALL
            .into_iter()
            .map(|a| (a, a.default_keys().iter().map(|k| k.to_string()).collect()))
            .collect();
        Self { bindings }
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for KeysConfig {
    type Error = KeyConfigError;

    fn try_from(table: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut config = Self::default();
        for (name, keys) in table {
            let action =
                KeyAction::from_name(&name).ok_or(KeyConfigError::UnknownAction(name))?;
            config.bindings.insert(action, keys);
        }
        config.keymap()?;
        Ok(config)
    }
}

impl From<KeysConfig> for BTreeMap<String, Vec<String>> {
    fn from(config: KeysConfig) -> Self {
        config
            .bindings
            .into_iter()
            .map(|(action, keys)| (action.name().to_string(), keys))
            .collect()
    }
}

impl KeysConfig {
    /// Key names bound to `action`.
    pub fn keys(&self, action: KeyAction) -> &[String] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set(&mut self, action: KeyAction, keys: Vec<String>) {
        self.bindings.insert(action, keys);
    }

    /// Resolve the table into a lookup from key code to action.
    pub fn keymap(&self) -> Result<KeyMap, KeyConfigError> {
        let mut actions: HashMap<KeyCode, KeyAction> = HashMap::new();
        for (&action, keys) in &self.bindings {
            for key in keys {
                let code = parse_key(key).ok_or_else(|| KeyConfigError::UnknownKey {
                    action,
                    key: key.clone(),
                })?;
                if let Some(first) = actions.insert(code, action) {
                    if first != action {
                        return Err(KeyConfigError::Conflict {
                            key: key.clone(),
                            first,
                            second: action,
                        });
                    }
                }
            }
        }

        let labels = self
            .bindings
            .iter()
            .filter_map(|(&action, keys)| keys.first().map(|k| (action, k.clone())))
            .collect();
        Ok(KeyMap { actions, labels })
    }
}

/// Resolved key bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    actions: HashMap<KeyCode, KeyAction>,
    labels: BTreeMap<KeyAction, String>,
}

impl Default for KeyMap {
    fn default() -> Self {
        match KeysConfig::default().keymap() {
            Ok(map) => map,
            // Defaults are conflict-free; covered by tests.
            Err(_) => Self {
                actions: HashMap::new(),
                labels: BTreeMap::new(),
            },
        }
    }
}

impl KeyMap {
    pub fn action(&self, code: KeyCode) -> Option<KeyAction> {
        self.actions.get(&code).copied()
    }

    /// First key bound to `action`, for hints. Empty when unbound.
    pub fn label(&self, action: KeyAction) -> &str {
        self.labels.get(&action).map(String::as_str).unwrap_or("")
    }
}
