//! File name parsing for the grouping convention
//!
//! Names follow `<top>_<middle>_<rest>.<ext>`. The top key is everything
//! before the first underscore, the middle key is the second segment when a
//! third one exists, and the display name is the remainder without extension.

use std::path::Path;
use std::time::SystemTime;

/// Segment delimiter in grouped file names.
pub const DELIMITER: char = '_';

/// A single image file in the scanned folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: String,
    top_key: String,
    middle_key: String,
    display_name: String,
    created: Option<SystemTime>,
}

impl FileEntry {
    /// Parse a bare file name (no directory part).
    pub fn parse(name: impl Into<String>) -> Self {
        let name = name.into();
        let top_key = top_key_of(&name).to_string();
        let middle_key = middle_key_of(&name).to_string();
        let display_name = display_name_of(&name);
        Self {
            name,
            top_key,
            middle_key,
            display_name,
            created: None,
        }
    }

    /// Attach the file's creation timestamp.
    pub fn with_created(mut self, created: Option<SystemTime>) -> Self {
        self.created = created;
        self
    }

    /// Full file name including extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn top_key(&self) -> &str {
        &self.top_key
    }

    /// Second segment, or `""` when the name has fewer than three segments.
    pub fn middle_key(&self) -> &str {
        &self.middle_key
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn created(&self) -> Option<SystemTime> {
        self.created
    }

    /// Lower-cased extension, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

fn top_key_of(name: &str) -> &str {
    name.split(DELIMITER).next().unwrap_or(name)
}

fn middle_key_of(name: &str) -> &str {
    let mut parts = name.splitn(3, DELIMITER);
    let _top = parts.next();
    match (parts.next(), parts.next()) {
        (Some(middle), Some(_)) => middle,
        _ => "",
    }
}

fn display_name_of(name: &str) -> String {
    let rest = name.splitn(3, DELIMITER).nth(2).unwrap_or(name);
    strip_extension(rest).to_string()
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}
