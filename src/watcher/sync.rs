//! Watch loop
//!
//! Runs an initial full build, then feeds filesystem events through the
//! ignore policy into the coordinator's aggregation window and requests a
//! rebuild once the window has been quiet for the debounce interval. Build
//! failures are reported as events and the loop keeps watching.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::build::{BuildCoordinator, BuildOutcome};
use crate::error::{VellumError, VellumResult};
use crate::models::ChangeKind;
use crate::paths::to_posix;

use super::event::{WatchEvent, WatchOptions, DEBOUNCE_MS, STARTUP_COOLDOWN_MS};
use super::ignore::IgnorePolicy;

/// Start watching the content directory for changes.
///
/// Blocks until `running` is cleared (Ctrl+C handling is the caller's job).
pub fn watch(
    options: WatchOptions,
    coordinator: Arc<BuildCoordinator>,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> VellumResult<()> {
    let content_dir = options.content_dir();
    event_callback(WatchEvent::WatchStarted {
        content_dir: content_dir.display().to_string(),
    });

    // Initial full build
    event_callback(WatchEvent::BuildStarted);
    match coordinator.build_full() {
        Ok(report) => event_callback(WatchEvent::BuildComplete {
            build_id: report.build_id,
            emitted: report.emitted,
            diagnostics: report.diagnostics.len(),
        }),
        Err(e) => {
            event_callback(WatchEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
    }

    let ignore = IgnorePolicy::load(&options.project_root, &options.config);

    // Event paths may arrive under either spelling of the root (as watched,
    // or with symlinks and `.` segments resolved), so keep both around
    let canonical_root = content_dir
        .canonicalize()
        .unwrap_or_else(|_| content_dir.clone());

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if let Some(kind) = map_event_kind(&event.kind) {
                    for path in event.paths {
                        let _ = tx.send((path, kind));
                    }
                }
            }
        },
        NotifyConfig::default(),
    )
    .map_err(|e| VellumError::Watch(e.to_string()))?;

    watcher
        .watch(&content_dir, RecursiveMode::Recursive)
        .map_err(|e| VellumError::Watch(e.to_string()))?;

    // Startup cooldown: drain any initial events from notify (it sometimes
    // sends events for existing files when the watcher is first registered)
    let cooldown_end = Instant::now() + Duration::from_millis(STARTUP_COOLDOWN_MS);
    while Instant::now() < cooldown_end {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    while running.load(Ordering::SeqCst) {
        // Check for file changes (non-blocking with timeout)
        if let Ok((path, kind)) = rx.recv_timeout(Duration::from_millis(50)) {
            if let Some(rel) = content_relative(&content_dir, &canonical_root, &path) {
                let is_dir = path.is_dir();
                if !ignore.is_ignored(Path::new(&rel), is_dir) && !is_dir {
                    event_callback(WatchEvent::FileChanged {
                        path: rel.clone(),
                        kind,
                    });
                    coordinator.record_change(rel, kind);
                }
            }
        }

        // Rebuild once the aggregation window has settled
        if coordinator.rebuild_due(Duration::from_millis(DEBOUNCE_MS)) {
            event_callback(WatchEvent::BuildStarted);
            match coordinator.request_build() {
                Ok(BuildOutcome::Completed(report)) => {
                    event_callback(WatchEvent::BuildComplete {
                        build_id: report.build_id,
                        emitted: report.emitted,
                        diagnostics: report.diagnostics.len(),
                    });
                }
                Ok(BuildOutcome::Superseded) | Ok(BuildOutcome::NoChanges) => {
                    event_callback(WatchEvent::BuildSkipped);
                }
                Err(e) => {
                    event_callback(WatchEvent::Error {
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

/// Map an OS watcher event kind onto a content transition. Access, metadata
/// and other noise map to `None`.
pub(crate) fn map_event_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Add),
        EventKind::Modify(_) => Some(ChangeKind::Change),
        EventKind::Remove(_) => Some(ChangeKind::Delete),
        _ => None,
    }
}

/// POSIX path relative to the content root, or `None` for paths outside it.
///
/// Tries the as-watched root first so that events for deleted files, which
/// can no longer be canonicalized, still resolve when the root is a symlink
/// or a relative path.
pub(crate) fn content_relative(
    watched_root: &Path,
    canonical_root: &Path,
    path: &Path,
) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(watched_root) {
        return Some(to_posix(rel));
    }
    if let Ok(rel) = path.strip_prefix(canonical_root) {
        return Some(to_posix(rel));
    }
    // Path spelled through yet another alias of the same directory
    let canonical = path.canonicalize().ok()?;
    canonical.strip_prefix(canonical_root).ok().map(to_posix)
}
