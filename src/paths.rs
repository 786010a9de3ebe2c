//! Path normalization and slug derivation
//!
//! All content paths inside Vellum are POSIX-style strings relative to the
//! content directory. Slugs are path-derived identifiers: extension stripped,
//! whitespace collapsed to `-`, and a trailing `index` segment folded into
//! its parent so `posts/index.md` addresses the `posts` folder itself.

use std::path::Path;

/// Convert a path to a POSIX-style string (forward slashes only).
pub fn to_posix(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.contains('\\') {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

/// True if a relative path names a markdown content file.
pub fn is_markdown(path: &str) -> bool {
    Path::new(path)
        .extension()
        .map(|e| e == "md")
        .unwrap_or(false)
}

/// Derive the canonical slug for a content file path.
///
/// `guides/Getting Started.md` becomes `guides/getting-started`;
/// `guides/index.md` becomes `guides`; `index.md` becomes `index`.
pub fn slugify_path(path: &str) -> String {
    let without_ext = match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
        _ => path,
    };

    let mut segments: Vec<String> = without_ext
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(slugify_segment)
        .collect();

    // index files address their folder, except at the root
    if segments.len() > 1 && segments.last().map(|s| s.as_str()) == Some("index") {
        segments.pop();
    }

    if segments.is_empty() {
        "index".to_string()
    } else {
        segments.join("/")
    }
}

/// Derive slugs for frontmatter aliases. Aliases without an extension are
/// treated as markdown paths.
pub fn alias_slug(alias: &str) -> String {
    if is_markdown(alias) {
        slugify_path(alias)
    } else {
        slugify_path(&format!("{alias}.md"))
    }
}

/// Split a slug into its path segments.
pub fn slug_segments(slug: &str) -> Vec<&str> {
    slug.split('/').filter(|s| !s.is_empty()).collect()
}

fn slugify_segment(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| *c != '?' && *c != '#' && *c != '%')
        .collect::<String>()
        .to_lowercase()
}
