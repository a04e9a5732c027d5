//! Three-level grouping index
//!
//! Turns a flat list of file names into top groups, middle groups and an
//! ordered file list. Files inside a top group are always kept in natural
//! order, whatever order the top groups themselves are displayed in, so a
//! file index stays stable across re-sorts. Middle groups are derived on
//! demand by a stable partition of the top group.

pub mod entry;
pub mod natural;
pub mod scan;

pub use entry::FileEntry;
pub use natural::{natural_cmp, NaturalKey};
pub use scan::{scan_folder, ScanError, ACCEPTED_EXTENSIONS};

use std::collections::HashMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Display order of the top groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Natural order of the top key.
    #[default]
    Name,
    /// Creation time of the group's first file, newest first.
    Date,
}

impl SortOrder {
    /// The other order.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Name => SortOrder::Date,
            SortOrder::Date => SortOrder::Name,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Name => write!(f, "name"),
            SortOrder::Date => write!(f, "date"),
        }
    }
}

/// A middle group: files of one top group sharing a middle key.
#[derive(Debug, Clone)]
pub struct MiddleGroup<'a> {
    pub key: &'a str,
    /// Files in the same relative order as in the top group.
    pub files: Vec<&'a FileEntry>,
}

/// Grouping of a scanned folder.
#[derive(Debug, Clone, Default)]
pub struct GroupIndex {
    groups: HashMap<String, Vec<FileEntry>>,
    top_keys: Vec<String>,
    sort_order: SortOrder,
}

impl GroupIndex {
    /// Group entries by top key and sort every group by natural key.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = FileEntry>,
    {
        let mut groups: HashMap<String, Vec<FileEntry>> = HashMap::new();
        for entry in entries {
            groups
                .entry(entry.top_key().to_string())
                .or_default()
                .push(entry);
        }
        for files in groups.values_mut() {
            files.sort_by_cached_key(|f| NaturalKey::new(f.name()));
        }

        let mut index = Self {
            top_keys: groups.keys().cloned().collect(),
            groups,
            sort_order: SortOrder::Name,
        };
        index.sort_top_keys();
        index
    }

    /// Build from bare file names (no timestamps).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(names.into_iter().map(FileEntry::parse))
    }

    /// Builder-style variant of [`GroupIndex::set_sort_order`].
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.set_sort_order(order);
        self
    }

    /// Change the display order of the top groups.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.sort_top_keys();
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    fn sort_top_keys(&mut self) {
        match self.sort_order {
            SortOrder::Name => {
                self.top_keys.sort_by_cached_key(|k| NaturalKey::new(k));
            }
            SortOrder::Date => {
                let groups = &self.groups;
                let first_created = |key: &str| {
                    groups
                        .get(key)
                        .and_then(|files| files.first())
                        .and_then(|f| f.created())
                        .unwrap_or(UNIX_EPOCH)
                };
                self.top_keys.sort_by(|a, b| {
                    let (ta, tb): (SystemTime, SystemTime) = (first_created(a), first_created(b));
                    tb.cmp(&ta).then_with(|| natural_cmp(a, b))
                });
            }
        }
    }

    /// Top keys in display order.
    pub fn top_keys(&self) -> &[String] {
        &self.top_keys
    }

    pub fn top_count(&self) -> usize {
        self.top_keys.len()
    }

    /// Display position of a top key.
    pub fn position_of_top(&self, key: &str) -> Option<usize> {
        self.top_keys.iter().position(|k| k == key)
    }

    /// All files of a top group in natural order (empty when unknown).
    pub fn top_group(&self, key: &str) -> &[FileEntry] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Top key at a display position.
    pub fn top_key_at(&self, top: usize) -> Option<&str> {
        self.top_keys.get(top).map(String::as_str)
    }

    /// Partition a top group by middle key.
    ///
    /// Buckets are ordered by natural key of the middle key (`""` first);
    /// each bucket keeps the top group's order.
    pub fn middle_groups(&self, top_key: &str) -> Vec<MiddleGroup<'_>> {
        let mut buckets: Vec<MiddleGroup<'_>> = Vec::new();
        let mut slot_of: HashMap<&str, usize> = HashMap::new();

        for file in self.top_group(top_key) {
            let key = file.middle_key();
            let slot = *slot_of.entry(key).or_insert_with(|| {
                buckets.push(MiddleGroup {
                    key,
                    files: Vec::new(),
                });
                buckets.len() - 1
            });
            buckets[slot].files.push(file);
        }

        buckets.sort_by_cached_key(|g| NaturalKey::new(g.key));
        buckets
    }

    /// Middle groups of the top group at a display position.
    pub fn middle_groups_at(&self, top: usize) -> Vec<MiddleGroup<'_>> {
        match self.top_key_at(top) {
            Some(key) => self.middle_groups(key),
            None => Vec::new(),
        }
    }

    /// Number of middle groups under a top group.
    pub fn middle_count(&self, top: usize) -> usize {
        self.middle_groups_at(top).len()
    }

    /// The file list addressed by `(top, middle)`.
    pub fn files_in(&self, top: usize, middle: usize) -> Vec<&FileEntry> {
        self.middle_groups_at(top)
            .into_iter()
            .nth(middle)
            .map(|g| g.files)
            .unwrap_or_default()
    }

    /// First file of a middle group, used for its date label.
    pub fn first_file_of_middle(&self, top: usize, middle: usize) -> Option<&FileEntry> {
        self.files_in(top, middle).into_iter().next()
    }

    /// Total number of files.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
