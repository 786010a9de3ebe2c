//! Process-wide build context
//!
//! Created once at process start and never torn down; only its mutable
//! fields (build id, known paths, derived slugs) are refreshed per build.

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Shared state handed to every pipeline stage.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Identifier of the build currently mutating shared state. Monotonic;
    /// the coordinator uses it for its last-request-wins staleness check.
    pub build_id: u64,

    pub config: Config,

    /// Absolute content directory
    pub content_dir: PathBuf,

    /// Absolute output directory
    pub output_dir: PathBuf,

    /// Every path the content map currently tracks, POSIX relative strings
    pub all_paths: Vec<String>,

    /// Every known slug, canonical and alias, derived from `all_paths`
    pub all_slugs: Vec<String>,
}

impl BuildContext {
    /// Context rooted at the current directory; commands use `rooted_at`.
    pub fn new(config: Config) -> Self {
        Self::rooted_at(config, Path::new("."))
    }

    /// Create the process-wide context for a project root.
    pub fn rooted_at(config: Config, project_root: &Path) -> Self {
        let content_dir = project_root.join(&config.content);
        let output_dir = project_root.join(&config.output);
        Self {
            build_id: 0,
            config,
            content_dir,
            output_dir,
            all_paths: Vec::new(),
            all_slugs: Vec::new(),
        }
    }

    /// Refresh the per-build fields from a new content map snapshot.
    pub fn refresh(&mut self, build_id: u64, all_paths: Vec<String>, all_slugs: Vec<String>) {
        self.build_id = build_id;
        self.all_paths = all_paths;
        self.all_slugs = all_slugs;
    }
}
