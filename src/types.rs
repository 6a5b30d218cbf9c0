use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Timestamp layout used for the `DateTimeMod` column, always rendered in UTC.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    /// True only for directories the scan descended into. A symlink to a
    /// directory that was not followed reports `false` (but keeps the target's size).
    pub is_directory: bool,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            EntryKind::Directory => "📁",
            EntryKind::File => "📄",
        }
    }
}

impl Entry {
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        if self.is_directory {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    #[must_use]
    pub fn formatted_modified(&self) -> String {
        self.modified_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
