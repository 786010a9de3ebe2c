//! Content index: a trie over content item paths
//!
//! Built fresh from a flat `(path, summary)` snapshot of the content map,
//! never patched incrementally. Consumers use it to answer folder-oriented
//! queries (children of a folder, all folder paths) and may reshape it with
//! `filter`/`map`/`sort` in whatever order they need. Only the constructor
//! mutates structure; transforms operate on the owned value.

use std::cmp::Ordering;

use crate::paths::slug_segments;

/// One node of the content index: a folder or a leaf with summary data.
#[derive(Debug, Clone, PartialEq)]
pub struct TrieNode<T> {
    segment: String,
    path: String,
    is_folder: bool,
    /// Summary attached at this node's terminal segment. Folders keep data
    /// too when an index entry addresses the folder itself.
    pub data: Option<T>,
    pub children: Vec<TrieNode<T>>,
}

impl<T> TrieNode<T> {
    /// Create an empty root. The root is a folder with an empty path and is
    /// excluded from `folder_paths`.
    pub fn root() -> Self {
        Self {
            segment: String::new(),
            path: String::new(),
            is_folder: true,
            data: None,
            children: Vec::new(),
        }
    }

    /// Build a trie from `(path, summary)` entries, preserving insertion
    /// order of siblings.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, T)>) -> Self {
        let mut root = Self::root();
        for (path, data) in entries {
            root.insert(&path, data);
        }
        root
    }

    /// Insert one entry, creating intermediate folder nodes as needed.
    /// Inserting an existing path replaces its summary.
    pub fn insert(&mut self, path: &str, data: T) {
        let segments: Vec<&str> = slug_segments(path);
        if segments.is_empty() {
            self.data = Some(data);
            return;
        }
        self.insert_at(&segments, data);
    }

    fn insert_at(&mut self, segments: &[&str], data: T) {
        let (head, rest) = match segments.split_first() {
            Some(split) => split,
            None => {
                self.data = Some(data);
                return;
            }
        };

        if !rest.is_empty() {
            self.is_folder = true;
        }

        let child_path = if self.path.is_empty() {
            (*head).to_string()
        } else {
            format!("{}/{}", self.path, head)
        };

        let child = match self.children.iter_mut().position(|c| c.segment == *head) {
            Some(i) => &mut self.children[i],
            None => {
                self.children.push(TrieNode {
                    segment: (*head).to_string(),
                    path: child_path,
                    is_folder: false,
                    data: None,
                    children: Vec::new(),
                });
                self.children.last_mut().unwrap()
            }
        };

        if rest.is_empty() {
            child.data = Some(data);
        } else {
            child.is_folder = true;
            child.insert_at(rest, data);
        }
    }

    /// Last path segment of this node.
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Full path from the root, `/`-joined.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True for folder nodes, including folders that exist only because a
    /// descendant does.
    pub fn is_folder(&self) -> bool {
        self.is_folder
    }

    /// Walk down by path segments; `&[]` returns the root itself.
    pub fn find_node(&self, segments: &[&str]) -> Option<&TrieNode<T>> {
        match segments.split_first() {
            None => Some(self),
            Some((head, rest)) => self
                .children
                .iter()
                .find(|c| c.segment == *head)?
                .find_node(rest),
        }
    }

    /// Every folder node's full path, depth-first, root excluded.
    pub fn folder_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_folder_paths(&mut paths);
        paths
    }

    fn collect_folder_paths(&self, paths: &mut Vec<String>) {
        if self.is_folder && !self.path.is_empty() {
            paths.push(self.path.clone());
        }
        for child in &self.children {
            child.collect_folder_paths(paths);
        }
    }

    /// Prune subtrees whose root fails the predicate. A removed node takes
    /// its whole subtree with it; later transforms never see it again.
    pub fn filter(&mut self, predicate: &dyn Fn(&TrieNode<T>) -> bool) {
        self.children.retain(|c| predicate(c));
        for child in &mut self.children {
            child.filter(predicate);
        }
    }

    /// Mutate node metadata in place without altering structure. Applied to
    /// every node below the root.
    pub fn map(&mut self, f: &mut dyn FnMut(&mut TrieNode<T>)) {
        for child in &mut self.children {
            f(child);
            child.map(f);
        }
    }

    /// Reorder each folder's children independently; nodes never move across
    /// folders.
    pub fn sort(&mut self, comparator: &dyn Fn(&TrieNode<T>, &TrieNode<T>) -> Ordering) {
        self.children.sort_by(|a, b| comparator(a, b));
        for child in &mut self.children {
            child.sort(comparator);
        }
    }
}
