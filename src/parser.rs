//! Content parser
//!
//! Handles extraction and parsing of YAML frontmatter from markdown files.
//! The parse stage is deliberately narrow: frontmatter plus raw body. It
//! never touches shared build state, and a failure for one path never aborts
//! the others - bad files surface as diagnostics in the build report.

use std::fs;
use std::path::Path;

use crate::error::{VellumError, VellumResult};
use crate::models::{FileRecord, Frontmatter, MarkdownContent};
use crate::paths::to_posix;

/// Delimiter for frontmatter sections
const FRONTMATTER_DELIMITER: &str = "---";

/// Result of extracting frontmatter from content
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFrontmatter {
    /// The raw YAML content of the frontmatter
    pub yaml: String,
    /// The content body after the frontmatter
    pub body: String,
}

/// A parse failure for a single path, reported but never fatal
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    pub path: String,
    pub message: String,
}

/// Extract frontmatter from file content
///
/// Frontmatter must be at the start of the file, delimited by `---` lines.
pub fn extract_frontmatter(content: &str, file: &Path) -> VellumResult<ExtractedFrontmatter> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || lines[0].trim() != FRONTMATTER_DELIMITER {
        return Err(VellumError::NoFrontmatter {
            file: file.to_path_buf(),
        });
    }

    let closing_line = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.trim() == FRONTMATTER_DELIMITER)
        .map(|(i, _)| i)
        .ok_or_else(|| VellumError::UnclosedFrontmatter {
            file: file.to_path_buf(),
        })?;

    let yaml = lines[1..closing_line].join("\n");
    let body = if closing_line + 1 < lines.len() {
        lines[closing_line + 1..].join("\n")
    } else {
        String::new()
    };

    Ok(ExtractedFrontmatter { yaml, body })
}

/// Parse frontmatter YAML into a `Frontmatter` struct
pub fn parse_frontmatter(yaml: &str, file: &Path) -> VellumResult<Frontmatter> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml_ng::from_str(yaml).map_err(|e| VellumError::InvalidFrontmatter {
        file: file.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse a single content file rooted at `content_dir`.
///
/// `relative_path` uses POSIX separators and doubles as the content map key.
pub fn parse_file(content_dir: &Path, relative_path: &str) -> VellumResult<MarkdownContent> {
    let full_path = content_dir.join(relative_path);
    let content = fs::read_to_string(&full_path)?;
    let extracted = extract_frontmatter(&content, &full_path)?;
    let frontmatter = parse_frontmatter(&extracted.yaml, &full_path)?;

    Ok(MarkdownContent {
        body: extracted.body,
        record: FileRecord::new(relative_path, frontmatter),
    })
}

/// Parse a batch of markdown paths, isolating per-path failures.
///
/// Returns parsed content alongside diagnostics for the paths that failed.
/// The caller leaves a failed path's previous content map entry untouched.
pub fn parse_paths(
    content_dir: &Path,
    relative_paths: &[String],
) -> (Vec<MarkdownContent>, Vec<ParseDiagnostic>) {
    let mut parsed = Vec::with_capacity(relative_paths.len());
    let mut diagnostics = Vec::new();

    for path in relative_paths {
        match parse_file(content_dir, path) {
            Ok(content) => parsed.push(content),
            Err(e) => diagnostics.push(ParseDiagnostic {
                path: path.clone(),
                message: e.to_string(),
            }),
        }
    }

    (parsed, diagnostics)
}

/// Walk the content directory and list every non-ignored file, relative to
/// it, with POSIX separators. `ignored` is checked against every entry.
pub fn list_content_files(
    content_dir: &Path,
    ignored: &dyn Fn(&str) -> bool,
) -> VellumResult<Vec<String>> {
    if !content_dir.is_dir() {
        return Err(VellumError::DirectoryNotFound {
            path: content_dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    list_recursive(content_dir, content_dir, ignored, &mut files)?;
    files.sort();
    Ok(files)
}

fn list_recursive(
    root: &Path,
    current: &Path,
    ignored: &dyn Fn(&str) -> bool,
    files: &mut Vec<String>,
) -> VellumResult<()> {
    for entry in fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        let relative = match path.strip_prefix(root) {
            Ok(rel) => to_posix(rel),
            Err(_) => continue,
        };

        if ignored(&relative) {
            continue;
        }

        if path.is_dir() {
            list_recursive(root, &path, ignored, files)?;
        } else {
            files.push(relative);
        }
    }

    Ok(())
}
