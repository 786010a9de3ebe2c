//! Content filter stage
//!
//! Filters run between parsing and emission: synchronous predicates over
//! parsed content, no I/O and no access to the content map. A page is
//! emitted only if every registered filter keeps it.

use crate::build::BuildContext;
use crate::models::MarkdownContent;

/// A publish predicate applied to every parsed markdown item.
pub trait ContentFilter: Send + Sync {
    /// Stable name used in diagnostics.
    fn name(&self) -> &'static str;

    fn should_publish(&self, ctx: &BuildContext, content: &MarkdownContent) -> bool;
}

/// Drops pages whose frontmatter marks them as drafts.
pub struct RemoveDrafts;

impl ContentFilter for RemoveDrafts {
    fn name(&self) -> &'static str {
        "RemoveDrafts"
    }

    fn should_publish(&self, _ctx: &BuildContext, content: &MarkdownContent) -> bool {
        !content.record.frontmatter.draft
    }
}

/// Apply all filters, keeping only content every filter publishes.
pub fn filter_content(
    ctx: &BuildContext,
    filters: &[Box<dyn ContentFilter>],
    content: Vec<MarkdownContent>,
) -> Vec<MarkdownContent> {
    content
        .into_iter()
        .filter(|item| filters.iter().all(|f| f.should_publish(ctx, item)))
        .collect()
}
