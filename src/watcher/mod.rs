//! File watcher for continuous rebuilds
//!
//! Implements the `watch` command with:
//! - Debouncing (100ms) via the coordinator's aggregation window
//! - Incremental rebuilds (only reparse changed files)
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod ignore;
mod sync;
#[cfg(test)]
mod tests;

pub use event::{WatchEvent, WatchOptions, DEBOUNCE_MS, STARTUP_COOLDOWN_MS};
pub use ignore::IgnorePolicy;
pub use sync::watch;
