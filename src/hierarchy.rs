use crate::ordering::{SortMode, sort_entries};
use crate::types::{Entry, EntryKind};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub entry: Entry,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The four values shown per row: kind glyph, name, size and UTC timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub kind: &'static str,
    pub name: String,
    pub size: u64,
    pub modified: String,
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.entry.kind()
    }

    #[must_use]
    pub fn fields(&self) -> DisplayFields {
        DisplayFields {
            kind: self.kind().glyph(),
            name: self.entry.name.clone(),
            size: self.entry.size,
            modified: self.entry.formatted_modified(),
        }
    }
}

/// Parent/child tree rebuilt from a flat scan. Nodes live in one arena and
/// refer to each other by index.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    by_path: HashMap<PathBuf, NodeId>,
}

impl Hierarchy {
    #[must_use]
    pub fn build(entries: Vec<Entry>, root: &Path) -> Self {
        Self::build_with(entries, root, SortMode::default())
    }

    /// Sorts `entries` and attaches each one below the node for its parent
    /// directory. An entry whose parent sits directly in `root`, or whose
    /// parent was never inserted, becomes a top-level node.
    #[must_use]
    pub fn build_with(entries: Vec<Entry>, root: &Path, mode: SortMode) -> Self {
        let sorted = sort_entries(entries, mode);

        let mut hierarchy = Hierarchy {
            nodes: Vec::with_capacity(sorted.len()),
            roots: Vec::new(),
            by_path: HashMap::with_capacity(sorted.len()),
        };

        for entry in sorted {
            let id = hierarchy.nodes.len();

            let parent = match entry.path.parent() {
                Some(parent_path) if parent_path != root => {
                    let found = hierarchy.by_path.get(parent_path).copied();
                    if found.is_none() {
                        debug!("[build] no parent node for {:?}, attaching at top level", entry.path);
                    }
                    found
                }
                _ => None,
            };

            match parent {
                Some(parent_id) => hierarchy.nodes[parent_id].children.push(id),
                None => hierarchy.roots.push(id),
            }

            hierarchy.by_path.insert(entry.path.clone(), id);
            hierarchy.nodes.push(Node {
                entry,
                parent,
                children: Vec::new(),
            });
        }

        hierarchy
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level node ids in display order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Number of ancestors; top-level nodes are at depth 0.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id].parent;
        while let Some(p) = current {
            depth += 1;
            current = self.nodes[p].parent;
        }
        depth
    }

    #[must_use]
    pub fn find(&self, path: &Path) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// Pre-order traversal yielding `(depth, node)`, parents before children.
    #[must_use]
    pub fn walk(&self) -> Vec<(usize, &Node)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, NodeId)> = self.roots.iter().rev().map(|&id| (0, id)).collect();

        while let Some((depth, id)) = stack.pop() {
            let node = &self.nodes[id];
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|&child| (depth + 1, child)));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_dir;
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn entry(path: &str, is_directory: bool, size: u64) -> Entry {
        let path = PathBuf::from(path);
        Entry {
            name: path.file_name().unwrap().to_string_lossy().to_string(),
            path,
            is_directory,
            size,
            modified_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn names(h: &Hierarchy, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| h.node(id).entry.name.clone()).collect()
    }

    #[test]
    fn test_build_sample_scenario() {
        let entries = vec![
            entry("/r/a.txt", false, 10),
            entry("/r/sub", true, 4096),
            entry("/r/sub/b.txt", false, 5),
        ];
        let h = Hierarchy::build(entries, Path::new("/r"));

        assert_eq!(h.len(), 3);
        assert_eq!(names(&h, h.roots()), vec!["sub", "a.txt"]);

        let sub = h.find(Path::new("/r/sub")).unwrap();
        assert_eq!(names(&h, h.children(sub)), vec!["b.txt"]);

        let b = h.find(Path::new("/r/sub/b.txt")).unwrap();
        assert_eq!(h.parent(b), Some(sub));
        assert_eq!(h.depth(b), 1);
    }

    #[test]
    fn test_orphan_attaches_at_top_level() {
        let entries = vec![
            entry("/r/a.txt", false, 1),
            entry("/r/missing/child.txt", false, 2),
        ];
        let h = Hierarchy::build(entries, Path::new("/r"));

        assert_eq!(h.roots().len(), 2);
        let orphan = h.find(Path::new("/r/missing/child.txt")).unwrap();
        assert_eq!(h.parent(orphan), None);
    }

    #[test]
    fn test_find_by_path() {
        let entries = vec![
            entry("/r/sub/b.txt", false, 5),
            entry("/r/a.txt", false, 10),
            entry("/r/sub", true, 4096),
        ];
        let h = Hierarchy::build(entries, Path::new("/r"));

        for (id, node) in h.nodes().iter().enumerate() {
            assert_eq!(h.find(&node.entry.path), Some(id));
        }
        // component-wise match, trailing separator ignored
        assert_eq!(h.find(Path::new("/r/sub/")), h.find(Path::new("/r/sub")));
        assert_eq!(h.find(Path::new("/r/nope")), None);
        assert_eq!(h.find(Path::new("/r")), None);
    }

    #[test]
    fn test_trailing_separator_on_root() {
        let entries = vec![entry("/r/a.txt", false, 1), entry("/r/d", true, 0)];
        let h = Hierarchy::build(entries, Path::new("/r/"));
        assert_eq!(h.roots().len(), 2);
    }

    #[test]
    fn test_display_fields() {
        let h = Hierarchy::build(vec![entry("/r/a.txt", false, 10)], Path::new("/r"));
        let fields = h.node(h.roots()[0]).fields();
        assert_eq!(
            fields,
            DisplayFields {
                kind: "📄",
                name: "a.txt".to_string(),
                size: 10,
                modified: "02.01.2024 03:04:05".to_string(),
            }
        );
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let entries = vec![
            entry("/r/z.txt", false, 1),
            entry("/r/d/e/f.txt", false, 1),
            entry("/r/d/e", true, 0),
            entry("/r/d", true, 0),
            entry("/r/d/g.txt", false, 1),
        ];
        let h = Hierarchy::build(entries, Path::new("/r"));
        let walked: Vec<(usize, String)> = h
            .walk()
            .into_iter()
            .map(|(depth, n)| (depth, n.entry.name.clone()))
            .collect();

        assert_eq!(
            walked,
            vec![
                (0, "d".to_string()),
                (1, "e".to_string()),
                (2, "f.txt".to_string()),
                (1, "g.txt".to_string()),
                (0, "z.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_scanned_tree_invariants() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.txt"), b"0123456789").unwrap();
        fs::create_dir_all(root.join("sub/inner")).unwrap();
        fs::write(root.join("sub/b.txt"), b"01234").unwrap();
        fs::write(root.join("sub/inner/c.txt"), b"c").unwrap();
        fs::write(root.join("Zeta.txt"), b"z").unwrap();

        let entries = scan_dir(root);
        let total = entries.len();
        let h = Hierarchy::build(entries, root);
        assert_eq!(h.len(), total);

        for (id, node) in h.nodes().iter().enumerate() {
            match node.parent {
                Some(p) => {
                    assert_eq!(Some(h.node(p).entry.path.as_path()), node.entry.path.parent());
                }
                None => assert_eq!(node.entry.path.parent(), Some(root)),
            }

            // directories before files among siblings
            let kinds: Vec<bool> = h
                .children(id)
                .iter()
                .map(|&c| h.node(c).entry.is_directory)
                .collect();
            assert!(kinds.windows(2).all(|w| w[0] || !w[1]));
        }

        let top: Vec<bool> = h.roots().iter().map(|&c| h.node(c).entry.is_directory).collect();
        assert!(top.windows(2).all(|w| w[0] || !w[1]));

        let sub = h.find(&root.join("sub")).unwrap();
        assert_eq!(names(&h, h.children(sub)), vec!["inner", "b.txt"]);
        assert_eq!(names(&h, h.roots()), vec!["sub", "a.txt", "Zeta.txt"]);
    }
}
