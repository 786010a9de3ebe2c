//! Build coordinator
//!
//! Owns the content map and build context behind a single mutex - the only
//! shared-resource guard in the process - and schedules builds with a
//! last-request-wins policy. Every `request_build` takes a fresh monotonic
//! build id; after winning the lock a request re-checks that its id is still
//! the latest and abandons its intent if a newer request arrived, so bursts
//! of changes degrade to one rebuild over the union of pending changes.
//!
//! The mutex is released on every exit path, including pipeline errors (the
//! guard drops before the error propagates) and poisoning (the inner state
//! is recovered, since partially applied content map updates are valid by
//! construction - updates land per path, never half a path).

use std::collections::BTreeSet;
use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::emit::{
    collect_static_resources, register, run_emitters, Emitter, EmitterReport, RegisteredEmitter,
};
use crate::error::VellumResult;
use crate::filter::{filter_content, ContentFilter};
use crate::models::{ChangeEvent, ChangeKind, MarkdownContent};
use crate::parser::{list_content_files, parse_paths, ParseDiagnostic};
use crate::paths::is_markdown;

use super::aggregator::ChangeAggregator;
use super::content_map::ContentMap;
use super::context::BuildContext;

/// Summary of one completed build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub build_id: u64,
    /// Markdown files parsed in this pass
    pub parsed: usize,
    /// Total artifacts produced across emitters
    pub emitted: usize,
    pub emitters: Vec<EmitterReport>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// What became of one build request.
#[derive(Debug)]
pub enum BuildOutcome {
    Completed(BuildReport),
    /// Lost the last-request-wins check; a newer request builds instead
    Superseded,
    /// Won the lock but found nothing pending (a prior winner took it all)
    NoChanges,
}

/// Everything the mutex guards: the content map and the per-build fields of
/// the process-wide context.
struct BuildState {
    map: ContentMap,
    ctx: BuildContext,
}

type CompletionNotifier = Box<dyn Fn() + Send + Sync>;
type IgnorePredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Drives the parse -> filter -> emit pipeline over a mutex-guarded content
/// map. Created once at process start; lives until process exit.
pub struct BuildCoordinator {
    state: Mutex<BuildState>,
    /// Highest build id handed out so far
    latest: AtomicU64,
    aggregator: Mutex<ChangeAggregator>,
    filters: Vec<Box<dyn ContentFilter>>,
    emitters: Vec<RegisteredEmitter>,
    ignored: IgnorePredicate,
    on_complete: Option<CompletionNotifier>,
}

impl BuildCoordinator {
    pub fn new(ctx: BuildContext) -> Self {
        Self {
            state: Mutex::new(BuildState {
                map: ContentMap::new(),
                ctx,
            }),
            latest: AtomicU64::new(0),
            aggregator: Mutex::new(ChangeAggregator::new()),
            filters: Vec::new(),
            emitters: Vec::new(),
            ignored: Box::new(|_| false),
            on_complete: None,
        }
    }

    pub fn with_filters(mut self, filters: Vec<Box<dyn ContentFilter>>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_emitters(mut self, emitters: Vec<Box<dyn Emitter>>) -> Self {
        self.emitters = register(emitters);
        self
    }

    /// Predicate applied when globbing the content tree on full builds.
    /// Watch-mode events are expected to be pre-filtered by the same policy.
    pub fn with_ignore(mut self, ignored: IgnorePredicate) -> Self {
        self.ignored = ignored;
        self
    }

    /// Callback invoked once per completed build, after the mutex is
    /// released (client-refresh signaling and the like).
    pub fn with_completion_notifier(mut self, notifier: CompletionNotifier) -> Self {
        self.on_complete = Some(notifier);
        self
    }

    /// Record one filesystem change into the aggregation window. Cheap and
    /// non-blocking with respect to running builds.
    pub fn record_change(&self, path: impl Into<String>, kind: ChangeKind) {
        self.lock_aggregator().record(path, kind);
    }

    /// True once pending changes have sat quiet for the debounce window.
    pub fn rebuild_due(&self, debounce: Duration) -> bool {
        let agg = self.lock_aggregator();
        match agg.last_record() {
            Some(at) => !agg.is_empty() && at.elapsed() >= debounce,
            None => false,
        }
    }

    /// One-shot full build: clean output, glob, parse everything, emit
    /// everything. Also the initial pass before watching.
    pub fn build_full(&self) -> VellumResult<BuildReport> {
        let build_id = self.next_build_id();
        let mut state = self.lock_state();

        let output_dir = state.ctx.output_dir.clone();
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir)?;
        }
        fs::create_dir_all(&output_dir)?;

        let all_files = list_content_files(&state.ctx.content_dir, &|p| (self.ignored)(p))?;
        let markdown_paths: Vec<String> = all_files
            .iter()
            .filter(|p| is_markdown(p))
            .cloned()
            .collect();
        let (parsed, diagnostics) = parse_paths(&state.ctx.content_dir, &markdown_paths);
        let parsed_count = parsed.len();

        state.map = ContentMap::new();
        for path in &all_files {
            if !is_markdown(path) {
                state.map.insert_other(path.clone());
            }
        }
        for content in parsed {
            state.map.insert_markdown(content);
        }

        let report = self.finish_build(&mut state, build_id, parsed_count, diagnostics, None)?;

        drop(state);
        self.notify_complete();
        Ok(report)
    }

    /// Incremental build over the current aggregation window.
    ///
    /// Safe to call from any thread; concurrent requests collapse to the
    /// newest one. A superseded request discards its intent entirely - the
    /// winner drains the aggregator itself and sees the union of changes.
    pub fn request_build(&self) -> VellumResult<BuildOutcome> {
        let build_id = self.next_build_id();
        let mut state = self.lock_state();

        // another build was requested while we waited on the lock
        if self.latest.load(Ordering::SeqCst) != build_id {
            return Ok(BuildOutcome::Superseded);
        }

        let pending = self.lock_aggregator().drain();
        if pending.is_empty() {
            return Ok(BuildOutcome::NoChanges);
        }

        let to_parse: Vec<String> = pending
            .iter()
            .filter(|(path, kind)| **kind != ChangeKind::Delete && is_markdown(path))
            .map(|(path, _)| path.clone())
            .collect();
        let (parsed, diagnostics) = parse_paths(&state.ctx.content_dir, &to_parse);
        let parsed_count = parsed.len();

        let events = state.map.apply_changes(parsed, &pending);

        let report =
            self.finish_build(&mut state, build_id, parsed_count, diagnostics, Some(&events))?;

        drop(state);
        self.notify_complete();
        Ok(BuildOutcome::Completed(report))
    }

    /// Shared tail of both build paths: refresh the context from the map,
    /// filter, emit.
    fn finish_build(
        &self,
        state: &mut BuildState,
        build_id: u64,
        parsed_count: usize,
        mut diagnostics: Vec<ParseDiagnostic>,
        changes: Option<&[ChangeEvent]>,
    ) -> VellumResult<BuildReport> {
        let all_paths = state.map.paths();
        let all_slugs = state.map.all_slugs();
        state.ctx.refresh(build_id, all_paths, all_slugs);

        // A slug claimed twice (page or alias) leaves one claimant unreachable
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        for slug in &state.ctx.all_slugs {
            if !seen.insert(slug.as_str()) && reported.insert(slug.as_str()) {
                diagnostics.push(ParseDiagnostic {
                    path: slug.clone(),
                    message: "slug claimed by more than one page or alias".to_string(),
                });
            }
        }

        let filtered: Vec<MarkdownContent> =
            filter_content(&state.ctx, &self.filters, state.map.markdown_content());

        let resources = collect_static_resources(&self.emitters);
        let emitters = run_emitters(&self.emitters, &state.ctx, &filtered, &resources, changes)?;
        let emitted = emitters.iter().map(|r| r.outputs).sum();

        Ok(BuildReport {
            build_id,
            parsed: parsed_count,
            emitted,
            emitters,
            diagnostics,
        })
    }

    /// Current snapshot of tracked paths (for diagnostics and tests).
    pub fn tracked_paths(&self) -> Vec<String> {
        self.lock_state().map.paths()
    }

    fn next_build_id(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock_state(&self) -> MutexGuard<'_, BuildState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_aggregator(&self) -> MutexGuard<'_, ChangeAggregator> {
        self.aggregator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify_complete(&self) {
        if let Some(notifier) = &self.on_complete {
            notifier();
        }
    }
}
