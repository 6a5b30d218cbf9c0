use crate::types::Entry;
use clap::ValueEnum;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortMode {
    /// Case-insensitive compare bounded by the length of the left-hand path.
    /// Run through the stable merge sort it yields the same order as `Lexicographic`.
    #[default]
    Legacy,
    /// Full case-insensitive path compare
    Lexicographic,
}

/// ASCII case-insensitive compare of `a` against `b`, looking at no more than
/// `a.len()` bytes. Running off the end of `b` compares as a NUL byte.
///
/// Not a total order: a proper prefix is `Equal` to its extension on the left
/// but `Greater` when the arguments are swapped.
#[must_use]
pub fn legacy_path_cmp(a: &[u8], b: &[u8]) -> Ordering {
    for (i, &ca) in a.iter().enumerate() {
        let ca = ca.to_ascii_lowercase();
        let cb = b.get(i).map_or(0, u8::to_ascii_lowercase);
        if ca != cb {
            return ca.cmp(&cb);
        }
    }
    Ordering::Equal
}

#[must_use]
pub fn lexicographic_path_cmp(a: &[u8], b: &[u8]) -> Ordering {
    a.iter()
        .map(u8::to_ascii_lowercase)
        .cmp(b.iter().map(u8::to_ascii_lowercase))
}

/// Directories first, then by path under `mode`.
#[must_use]
pub fn compare_entries(a: &Entry, b: &Entry, mode: SortMode) -> Ordering {
    if a.is_directory != b.is_directory {
        return b.is_directory.cmp(&a.is_directory);
    }
    let pa = a.path.as_os_str().as_encoded_bytes();
    let pb = b.path.as_os_str().as_encoded_bytes();
    match mode {
        SortMode::Legacy => legacy_path_cmp(pa, pb),
        SortMode::Lexicographic => lexicographic_path_cmp(pa, pb),
    }
}

#[must_use]
pub fn sort_entries(entries: Vec<Entry>, mode: SortMode) -> Vec<Entry> {
    match mode {
        // std sorts may panic on a comparator that is not a total order
        SortMode::Legacy => merge_sort_by(entries, |a, b| compare_entries(a, b, mode)),
        SortMode::Lexicographic => {
            let mut entries = entries;
            entries.sort_by(|a, b| compare_entries(a, b, mode));
            entries
        }
    }
}

/// Stable top-down merge sort. Splits at `len / 2` and keeps the left item
/// unless `cmp(left, right)` is `Greater`, so the result is deterministic
/// even for comparators that are not consistent.
pub fn merge_sort_by<T, F>(items: Vec<T>, mut cmp: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    merge_sort_rec(items, &mut cmp)
}

fn merge_sort_rec<T, F>(items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = merge_sort_rec(left, cmp);
    let right = merge_sort_rec(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }

    merged
}
