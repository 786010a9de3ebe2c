//! Incremental build core
//!
//! Owns the mutex-guarded rebuild scheduler, the change-event aggregation
//! window, and the content map that is the single source of truth for what
//! content exists. Consumers (emitters, the content index) only ever see
//! snapshots derived from one consistent content map state.

mod aggregator;
mod content_map;
mod context;
mod coordinator;

pub use aggregator::ChangeAggregator;
pub use content_map::ContentMap;
pub use context::BuildContext;
pub use coordinator::{BuildCoordinator, BuildOutcome, BuildReport};
