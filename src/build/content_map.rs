//! Content map: path -> processed representation
//!
//! The single place that asserts "this path exists as this content". Owned
//! exclusively by the build coordinator; everything else works from
//! snapshots. Updates follow a strict order so that change events handed to
//! emitters still carry the last-known record of content deleted in the
//! same pass.

use std::collections::BTreeMap;

use crate::models::{ChangeEvent, ChangeKind, ContentRecord, MarkdownContent};
use crate::paths::is_markdown;

/// Mapping from relative path to its processed record.
#[derive(Debug, Default)]
pub struct ContentMap {
    entries: BTreeMap<String, ContentRecord>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&ContentRecord> {
        self.entries.get(path)
    }

    pub fn insert_markdown(&mut self, content: MarkdownContent) {
        self.entries.insert(
            content.record.relative_path.clone(),
            ContentRecord::Markdown(content),
        );
    }

    pub fn insert_other(&mut self, path: impl Into<String>) {
        self.entries.insert(path.into(), ContentRecord::Other);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every tracked path, in map order.
    pub fn paths(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Snapshot of all markdown content, in map order.
    pub fn markdown_content(&self) -> Vec<MarkdownContent> {
        self.entries
            .values()
            .filter_map(|r| r.as_markdown().cloned())
            .collect()
    }

    /// Every known slug: canonical slugs plus alias slugs of markdown
    /// entries. Non-markdown paths contribute nothing.
    pub fn all_slugs(&self) -> Vec<String> {
        let mut slugs = Vec::new();
        for record in self.entries.values() {
            if let Some(content) = record.as_markdown() {
                slugs.push(content.record.slug.clone());
                slugs.extend(content.record.alias_slugs.iter().cloned());
            }
        }
        slugs
    }

    /// Apply one build window's pending changes.
    ///
    /// Ordering is load-bearing:
    /// 1. (caller) parsed only Add/Change markdown paths into `parsed`
    /// 2. upsert freshly parsed records, replacing wholesale
    /// 3. materialize change events from the post-upsert map, so Delete
    ///    events still carry the record that is about to be removed
    /// 4. apply deletions
    /// 5. track non-markdown additions as `Other` so future diffs see them
    pub fn apply_changes(
        &mut self,
        parsed: Vec<MarkdownContent>,
        pending: &BTreeMap<String, ChangeKind>,
    ) -> Vec<ChangeEvent> {
        for content in parsed {
            self.insert_markdown(content);
        }

        let events: Vec<ChangeEvent> = pending
            .iter()
            .map(|(path, kind)| ChangeEvent {
                path: path.clone(),
                kind: *kind,
                content: self
                    .entries
                    .get(path)
                    .and_then(|r| r.as_markdown())
                    .cloned(),
            })
            .collect();

        for (path, kind) in pending {
            match kind {
                ChangeKind::Delete => {
                    self.entries.remove(path);
                }
                ChangeKind::Add if !is_markdown(path) => {
                    self.insert_other(path.clone());
                }
                _ => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileRecord, Frontmatter};

    fn page(path: &str) -> MarkdownContent {
        MarkdownContent {
            body: format!("body of {path}"),
            record: FileRecord::new(path, Frontmatter::default()),
        }
    }

    fn changes(pairs: &[(&str, ChangeKind)]) -> BTreeMap<String, ChangeKind> {
        pairs
            .iter()
            .map(|(p, k)| (p.to_string(), *k))
            .collect()
    }

    #[test]
    fn upsert_replaces_wholesale() {
        let mut map = ContentMap::new();
        map.insert_markdown(page("a.md"));

        let mut replacement = page("a.md");
        replacement.body = "new body".to_string();
        let events = map.apply_changes(
            vec![replacement],
            &changes(&[("a.md", ChangeKind::Change)]),
        );

        assert_eq!(events.len(), 1);
        let current = map.get("a.md").unwrap().as_markdown().unwrap();
        assert_eq!(current.body, "new body");
    }

    #[test]
    fn delete_event_carries_prior_record_then_removes() {
        let mut map = ContentMap::new();
        map.insert_markdown(page("doomed.md"));

        let events =
            map.apply_changes(Vec::new(), &changes(&[("doomed.md", ChangeKind::Delete)]));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::Delete);
        let carried = events[0].content.as_ref().expect("record attached");
        assert_eq!(carried.record.slug, "doomed");
        assert!(map.get("doomed.md").is_none());
    }

    #[test]
    fn non_markdown_add_tracked_as_other() {
        let mut map = ContentMap::new();
        let events =
            map.apply_changes(Vec::new(), &changes(&[("img/logo.png", ChangeKind::Add)]));

        assert_eq!(events.len(), 1);
        assert!(events[0].content.is_none());
        assert_eq!(map.get("img/logo.png"), Some(&ContentRecord::Other));
    }

    #[test]
    fn non_markdown_delete_removed() {
        let mut map = ContentMap::new();
        map.insert_other("img/logo.png");

        map.apply_changes(Vec::new(), &changes(&[("img/logo.png", ChangeKind::Delete)]));
        assert!(map.get("img/logo.png").is_none());
    }

    #[test]
    fn parse_failure_leaves_prior_entry_untouched() {
        // a Change event with no freshly parsed record (parse failed)
        let mut map = ContentMap::new();
        map.insert_markdown(page("flaky.md"));

        let events =
            map.apply_changes(Vec::new(), &changes(&[("flaky.md", ChangeKind::Change)]));

        // event still carries the previous record; map keeps it
        assert!(events[0].content.is_some());
        assert!(map.get("flaky.md").is_some());
    }

    #[test]
    fn all_slugs_includes_aliases() {
        let mut fm = Frontmatter::default();
        fm.aliases = vec!["old-home".to_string()];
        let mut map = ContentMap::new();
        map.insert_markdown(MarkdownContent {
            body: String::new(),
            record: FileRecord::new("home.md", fm),
        });
        map.insert_other("logo.png");

        assert_eq!(map.all_slugs(), vec!["home", "old-home"]);
    }
}
