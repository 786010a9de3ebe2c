//! Core data models for Vellum
//!
//! Defines the fundamental data structures used throughout Vellum:
//! - `Frontmatter`: YAML metadata extracted from content files
//! - `FileRecord`: path-derived identity (slug, aliases) plus frontmatter
//! - `MarkdownContent`: a fully parsed content file
//! - `ContentRecord`: what the content map knows about one path
//! - `ChangeKind` / `ChangeEvent`: one path's transition for one build cycle

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::paths::{alias_slug, slugify_path};

/// YAML frontmatter extracted from content files
///
/// Every field is optional; a file with an empty frontmatter block is valid
/// content. `tags` and `aliases` accept both a YAML list and a single
/// comma-separated string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Page title (falls back to the file stem when absent)
    #[serde(default)]
    pub title: Option<String>,

    /// Tags for grouping
    #[serde(default, deserialize_with = "string_or_list")]
    pub tags: Vec<String>,

    /// Alternative slugs that should resolve to this page
    #[serde(default, deserialize_with = "string_or_list")]
    pub aliases: Vec<String>,

    /// Draft pages are parsed but filtered out before emission
    #[serde(default)]
    pub draft: bool,

    /// Publication date
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Accept `tags: a, b` as well as `tags: [a, b]`.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(StringOrList::One(s)) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Some(StringOrList::Many(v)) => v,
    })
}

/// Identity and metadata for one parsed content file
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Path relative to the content directory, POSIX separators
    pub relative_path: String,

    /// Canonical slug derived from the path
    pub slug: String,

    /// Slugs derived from frontmatter aliases
    pub alias_slugs: Vec<String>,

    /// Parsed frontmatter
    pub frontmatter: Frontmatter,
}

impl FileRecord {
    /// Build a record from a relative path and its frontmatter.
    pub fn new(relative_path: impl Into<String>, frontmatter: Frontmatter) -> Self {
        let relative_path = relative_path.into();
        let slug = slugify_path(&relative_path);
        let alias_slugs = frontmatter.aliases.iter().map(|a| alias_slug(a)).collect();
        Self {
            relative_path,
            slug,
            alias_slugs,
            frontmatter,
        }
    }

    /// Display title: frontmatter title, else the last slug segment.
    pub fn title(&self) -> &str {
        match &self.frontmatter.title {
            Some(t) => t,
            None => self.slug.rsplit('/').next().unwrap_or(&self.slug),
        }
    }
}

/// A fully parsed markdown content file: the rendered-content tree stand-in
/// (raw body) plus its file record. Replaced wholesale on every re-parse.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownContent {
    /// Content body after the frontmatter block
    pub body: String,

    /// Path-derived identity and metadata
    pub record: FileRecord,
}

/// What the content map knows about one filesystem path
#[derive(Debug, Clone, PartialEq)]
pub enum ContentRecord {
    /// A parsed markdown file
    Markdown(MarkdownContent),
    /// A non-content file tracked for bookkeeping only (assets etc.)
    Other,
}

impl ContentRecord {
    /// The markdown content, if this record is markdown.
    pub fn as_markdown(&self) -> Option<&MarkdownContent> {
        match self {
            ContentRecord::Markdown(content) => Some(content),
            ContentRecord::Other => None,
        }
    }
}

/// Kind of filesystem transition observed for a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Add,
    Change,
    Delete,
}

/// A normalized description of one path's transition for one build cycle.
///
/// For markdown paths the event carries the content map entry as it stood
/// after re-parsing but before deletions were applied, so emitters can clean
/// up artifacts derived from content that is about to disappear.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: String,
    pub kind: ChangeKind,
    pub content: Option<MarkdownContent>,
}
