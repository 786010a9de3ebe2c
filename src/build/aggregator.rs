//! Change-event aggregation
//!
//! Collapses rapid bursts of raw filesystem events into one pending set per
//! build window. The map is keyed by path and the latest kind wins: an Add
//! followed by a Delete before the next build collapses to a single Delete.
//! Nothing is dropped across the window - an event arriving after a Delete
//! for the same path simply becomes that path's new pending kind.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::models::ChangeKind;

/// Pending filesystem changes awaiting the next build.
#[derive(Debug, Default)]
pub struct ChangeAggregator {
    pending: BTreeMap<String, ChangeKind>,
    last_record: Option<Instant>,
}

impl ChangeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one raw event; overwrites any pending kind for the same path.
    pub fn record(&mut self, path: impl Into<String>, kind: ChangeKind) {
        self.pending.insert(path.into(), kind);
        self.last_record = Some(Instant::now());
    }

    /// Take the pending set, clearing exactly what the triggered build is
    /// about to process. Events recorded after this call belong to the next
    /// cycle.
    pub fn drain(&mut self) -> BTreeMap<String, ChangeKind> {
        self.last_record = None;
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// When the most recent event was recorded; `None` once drained.
    pub fn last_record(&self) -> Option<Instant> {
        self.last_record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn last_kind_wins_within_window() {
        let mut agg = ChangeAggregator::new();
        agg.record("x.md", ChangeKind::Add);
        agg.record("x.md", ChangeKind::Change);
        agg.record("x.md", ChangeKind::Delete);

        let drained = agg.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained.get("x.md"), Some(&ChangeKind::Delete));
    }

    #[test]
    fn event_after_delete_is_recorded() {
        let mut agg = ChangeAggregator::new();
        agg.record("x.md", ChangeKind::Delete);
        agg.record("x.md", ChangeKind::Add);

        assert_eq!(agg.drain().get("x.md"), Some(&ChangeKind::Add));
    }

    #[test]
    fn drain_clears_only_current_window() {
        let mut agg = ChangeAggregator::new();
        agg.record("a.md", ChangeKind::Add);

        let first = agg.drain();
        assert_eq!(first.len(), 1);
        assert!(agg.is_empty());
        assert!(agg.last_record().is_none());

        agg.record("b.md", ChangeKind::Change);
        let second = agg.drain();
        assert!(!second.contains_key("a.md"));
        assert_eq!(second.get("b.md"), Some(&ChangeKind::Change));
    }

    proptest! {
        /// The drained set holds exactly the recorded paths, each with the
        /// kind of its last event.
        #[test]
        fn drained_kinds_match_last_event(
            events in prop::collection::vec(
                (prop::sample::select(vec!["a.md", "b.md", "c/d.md", "e.png"]),
                 prop::sample::select(vec![ChangeKind::Add, ChangeKind::Change, ChangeKind::Delete])),
                0..40,
            )
        ) {
            let mut agg = ChangeAggregator::new();
            let mut expected: std::collections::BTreeMap<String, ChangeKind> =
                Default::default();

            for (path, kind) in &events {
                agg.record(*path, *kind);
                expected.insert((*path).to_string(), *kind);
            }

            prop_assert_eq!(agg.drain(), expected);
        }
    }
}
