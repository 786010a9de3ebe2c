//! Folder index emitter
//!
//! Rebuilds the content index trie from the filtered snapshot on every run
//! and emits one listing page per folder. Full-only: folder membership can
//! change through any add or delete, so partial change sets are not enough
//! to know which listings are stale.

use std::cmp::Ordering;

use crate::build::BuildContext;
use crate::error::VellumResult;
use crate::index::TrieNode;
use crate::models::MarkdownContent;

use super::helpers::write_output;
use super::{EmitStream, Emitter, StaticResources};

/// Per-node summary carried in the folder trie.
#[derive(Debug, Clone, PartialEq)]
struct PageSummary {
    title: String,
}

pub struct FolderIndex;

impl Emitter for FolderIndex {
    fn name(&self) -> &'static str {
        "FolderIndex"
    }

    fn emit_all<'a>(
        &'a self,
        ctx: &'a BuildContext,
        content: &'a [MarkdownContent],
        _resources: &'a StaticResources,
    ) -> VellumResult<EmitStream<'a>> {
        let mut trie = TrieNode::from_entries(content.iter().map(|item| {
            (
                item.record.slug.clone(),
                PageSummary {
                    title: item.record.title().to_string(),
                },
            )
        }));

        // folders first, then alphabetical by segment
        trie.sort(&|a, b| match (a.is_folder(), b.is_folder()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.segment().cmp(b.segment()),
        });

        let folder_paths = trie.folder_paths();
        Ok(Box::new(folder_paths.into_iter().map(move |folder| {
            let segments: Vec<&str> = folder.split('/').collect();
            let node = trie
                .find_node(&segments)
                .expect("folder path came from this trie");
            let html = render_listing(ctx, &folder, node);
            write_output(&ctx.output_dir, &format!("{folder}/index.html"), html.as_bytes())
        })))
    }
}

fn render_listing(ctx: &BuildContext, folder: &str, node: &TrieNode<PageSummary>) -> String {
    let mut items = String::new();
    for child in &node.children {
        let label = child
            .data
            .as_ref()
            .map(|d| d.title.clone())
            .unwrap_or_else(|| child.segment().to_string());
        let href = if child.is_folder() {
            format!("{}/index.html", child.segment())
        } else {
            format!("{}.html", child.segment())
        };
        items.push_str(&format!("<li><a href=\"{href}\">{label}</a></li>\n"));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{folder} - {site}</title>\n</head>\n<body>\n\
         <h1>{folder}</h1>\n<ul>\n{items}</ul>\n</body>\n</html>\n",
        site = ctx.config.site.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{FileRecord, Frontmatter};
    use std::fs;
    use tempfile::tempdir;

    fn page(path: &str, title: Option<&str>) -> MarkdownContent {
        let mut fm = Frontmatter::default();
        fm.title = title.map(|t| t.to_string());
        MarkdownContent {
            body: String::new(),
            record: FileRecord::new(path, fm),
        }
    }

    #[test]
    fn emits_listing_per_folder() {
        let dir = tempdir().unwrap();
        let mut ctx = BuildContext::rooted_at(Config::default(), dir.path());
        ctx.output_dir = dir.path().join("public");

        let content = vec![
            page("guides/setup.md", Some("Setup Guide")),
            page("guides/advanced/tuning.md", None),
            page("about.md", None),
        ];

        let written: Vec<_> = FolderIndex
            .emit_all(&ctx, &content, &StaticResources::default())
            .unwrap()
            .collect::<VellumResult<Vec<_>>>()
            .unwrap();

        // guides and guides/advanced are folders; about is not
        assert_eq!(written.len(), 2);
        let listing = fs::read_to_string(ctx.output_dir.join("guides/index.html")).unwrap();
        assert!(listing.contains("Setup Guide"));
        assert!(listing.contains("advanced/index.html"));
        assert!(!ctx.output_dir.join("about/index.html").exists());
    }

    #[test]
    fn folders_sort_before_files() {
        let dir = tempdir().unwrap();
        let mut ctx = BuildContext::rooted_at(Config::default(), dir.path());
        ctx.output_dir = dir.path().join("public");

        let content = vec![
            page("top/aaa.md", None),
            page("top/zzz/inner.md", None),
        ];

        FolderIndex
            .emit_all(&ctx, &content, &StaticResources::default())
            .unwrap()
            .for_each(|r| {
                r.unwrap();
            });

        let listing = fs::read_to_string(ctx.output_dir.join("top/index.html")).unwrap();
        let folder_pos = listing.find("zzz/index.html").unwrap();
        let file_pos = listing.find("aaa.html").unwrap();
        assert!(folder_pos < file_pos);
    }
}
