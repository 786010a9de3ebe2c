//! Vellum - incremental markdown site compiler
//!
//! Vellum compiles a directory of markdown notes into a static HTML site and
//! rebuilds incrementally as files change. An in-memory content map is the
//! single source of truth for what content exists between rebuilds; a
//! mutex-guarded coordinator collapses bursts of filesystem events into one
//! rebuild over the aggregated change set.

pub mod build;
pub mod config;
pub mod emit;
pub mod error;
pub mod filter;
pub mod index;
pub mod models;
pub mod parser;
pub mod paths;
pub mod ui;
pub mod watcher;

// Re-exports for convenience
pub use build::{BuildContext, BuildCoordinator, BuildOutcome, BuildReport};
pub use config::Config;
pub use error::{VellumError, VellumResult};
pub use index::TrieNode;
pub use models::{ChangeEvent, ChangeKind, ContentRecord, FileRecord, Frontmatter, MarkdownContent};
pub use watcher::{watch, IgnorePolicy, WatchEvent, WatchOptions};
