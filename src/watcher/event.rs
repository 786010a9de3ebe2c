//! Watch event types and options

use std::path::PathBuf;

use crate::config::Config;
use crate::models::ChangeKind;

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// How long to drain spurious startup events from the OS watcher
pub const STARTUP_COOLDOWN_MS: u64 = 500;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root (holds the content directory and `vellum.toml`)
    pub project_root: PathBuf,
    /// Config
    pub config: Config,
    /// Output as NDJSON
    pub json: bool,
}

impl WatchOptions {
    pub fn content_dir(&self) -> PathBuf {
        self.project_root.join(&self.config.content)
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        content_dir: String,
    },
    FileChanged {
        path: String,
        kind: ChangeKind,
    },
    BuildStarted,
    BuildComplete {
        build_id: u64,
        emitted: usize,
        diagnostics: usize,
    },
    /// A requested rebuild found nothing to do or lost to a newer request
    BuildSkipped,
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
