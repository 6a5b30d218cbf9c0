use crate::types::Entry;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Instant, SystemTime};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Descend into symlinked directories. Link cycles are detected and skipped.
    pub follow_links: bool,
}

/// Scans `root` with default options.
#[must_use]
pub fn scan_dir(root: &Path) -> Vec<Entry> {
    scan(root, &ScanOptions::default())
}

/// Depth-first, pre-order listing of everything below `root`.
///
/// A directory's own entry is emitted before its contents. Entries whose
/// metadata cannot be read are dropped, and directories that cannot be opened
/// contribute nothing; neither stops the walk. The root itself is never part
/// of the result.
#[must_use]
pub fn scan(root: &Path, options: &ScanOptions) -> Vec<Entry> {
    let started = Instant::now();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(options.follow_links)
        .into_iter();
    let mut entries = Vec::new();

    while let Some(next) = walker.next() {
        let dent = match next {
            Ok(dent) => dent,
            Err(e) => {
                debug!("[scan] skipping unreadable path under {:?}: {e}", root);
                continue;
            }
        };

        match inspect_entry(&dent, options.follow_links) {
            Some(entry) => entries.push(entry),
            // Without metadata the directory is not listed, so its contents are not either.
            None if dent.file_type().is_dir() => walker.skip_current_dir(),
            None => {}
        }
    }

    info!(
        "[scan] {} entries under {:?} in {:.2?}",
        entries.len(),
        root,
        started.elapsed()
    );
    entries
}

/// Runs [`scan`] on a worker thread; the completed listing is handed back once via `join`.
pub fn spawn_scan(root: PathBuf, options: ScanOptions) -> JoinHandle<Vec<Entry>> {
    thread::spawn(move || scan(&root, &options))
}

fn inspect_entry(dent: &DirEntry, follow_links: bool) -> Option<Entry> {
    let path = dent.path();

    // stat, not lstat: a dangling symlink has no metadata and is dropped
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            debug!("[scan] no metadata for {:?}: {e}", path);
            return None;
        }
    };

    // Only report a directory when the walk will actually descend into it.
    let is_directory = metadata.is_dir() && (follow_links || !dent.path_is_symlink());
    let modified_at: DateTime<Utc> = metadata
        .modified()
        .unwrap_or(SystemTime::UNIX_EPOCH)
        .into();

    Some(Entry {
        name: dent.file_name().to_string_lossy().to_string(),
        path: path.to_path_buf(),
        is_directory,
        size: metadata.len(),
        modified_at,
    })
}
