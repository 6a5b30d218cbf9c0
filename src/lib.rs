pub mod hierarchy;
pub mod ordering;
pub mod render;
pub mod scanner;
pub mod types;

pub use hierarchy::{Hierarchy, Node, NodeId};
pub use ordering::SortMode;
pub use scanner::{ScanOptions, scan, scan_dir, spawn_scan};
pub use types::{Entry, EntryKind};
