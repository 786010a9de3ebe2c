//! Ignore policy for watched and globbed paths
//!
//! Combines the project `.gitignore` (if any) with the `ignore_patterns`
//! list from `vellum.toml`, using gitignore semantics for both. Paths under
//! `.git/` are always ignored regardless of patterns. Paths are matched
//! relative to the content directory.

use std::fs;
use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::config::Config;

#[derive(Debug)]
pub struct IgnorePolicy {
    matcher: Gitignore,
}

impl IgnorePolicy {
    /// A policy that matches nothing (beyond the built-in `.git/` rule).
    pub fn empty() -> Self {
        let matcher = GitignoreBuilder::new("")
            .build()
            .expect("empty gitignore should always build");
        Self { matcher }
    }

    /// Build the policy for a project root.
    ///
    /// Never fails: an unreadable `.gitignore` or a broken pattern is
    /// warned about and skipped, so a typo excludes nothing rather than
    /// everything.
    pub fn load(project_root: &Path, config: &Config) -> Self {
        let mut builder = GitignoreBuilder::new("");

        let gitignore_path = project_root.join(".gitignore");
        match fs::read_to_string(&gitignore_path) {
            Ok(content) => {
                for line in content.lines() {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    if let Err(e) = builder.add_line(Some(gitignore_path.clone()), line) {
                        eprintln!("warning: skipping .gitignore line '{line}': {e}");
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                eprintln!(
                    "warning: could not read {}: {e}",
                    gitignore_path.display()
                );
            }
        }

        for pattern in &config.ignore_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                eprintln!("warning: skipping ignore pattern '{pattern}': {e}");
            }
        }

        match builder.build() {
            Ok(matcher) => Self { matcher },
            Err(e) => {
                eprintln!("warning: ignore patterns disabled: {e}");
                Self::empty()
            }
        }
    }

    /// Check whether a content-relative path should be excluded.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        if rel_path.starts_with(".git") {
            return true;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self::empty()
    }
}
