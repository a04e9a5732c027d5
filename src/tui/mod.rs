//! TUI (Text User Interface) module for imgnav
//!
//! Terminal browser built on ratatui/crossterm: group columns, a
//! half-block image preview and the preload cache indicator.

pub mod app;
pub mod browser_app;
pub mod event;
pub mod widgets;

pub use browser_app::{BrowserApp, BrowserState};
