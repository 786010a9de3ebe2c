//! Alias redirect emitter
//!
//! Each frontmatter alias becomes a small redirect page at `{alias}.html`
//! pointing at the canonical slug. Incremental: on partial builds it only
//! touches aliases of changed files, and uses the record carried by a Delete
//! event to remove redirects keyed by the vanished content's aliases.

use std::path::PathBuf;

use crate::build::BuildContext;
use crate::error::VellumResult;
use crate::models::{ChangeEvent, ChangeKind, MarkdownContent};

use super::helpers::{remove_output, write_output};
use super::{EmitMode, EmitStream, Emitter, StaticResources};

pub struct AliasRedirects;

impl Emitter for AliasRedirects {
    fn name(&self) -> &'static str {
        "AliasRedirects"
    }

    fn mode(&self) -> EmitMode {
        EmitMode::Incremental
    }

    fn emit_all<'a>(
        &'a self,
        ctx: &'a BuildContext,
        content: &'a [MarkdownContent],
        _resources: &'a StaticResources,
    ) -> VellumResult<EmitStream<'a>> {
        Ok(Box::new(content.iter().flat_map(move |item| {
            emit_redirects(ctx, item).into_iter()
        })))
    }

    fn emit_partial<'a>(
        &'a self,
        ctx: &'a BuildContext,
        _content: &'a [MarkdownContent],
        _resources: &'a StaticResources,
        changes: &'a [ChangeEvent],
    ) -> VellumResult<Option<EmitStream<'a>>> {
        if !changes.iter().any(|e| e.content.is_some()) {
            return Ok(None);
        }

        Ok(Some(Box::new(
            changes
                .iter()
                .filter(|e| e.content.is_some())
                .flat_map(move |event| {
                    let item = event.content.as_ref().expect("filtered above");
                    match event.kind {
                        ChangeKind::Add | ChangeKind::Change => {
                            emit_redirects(ctx, item).into_iter()
                        }
                        ChangeKind::Delete => cleanup_redirects(ctx, item).into_iter(),
                    }
                }),
        )))
    }
}

fn emit_redirects(ctx: &BuildContext, item: &MarkdownContent) -> Vec<VellumResult<PathBuf>> {
    item.record
        .alias_slugs
        .iter()
        .map(|alias| {
            let html = render_redirect(alias, &item.record.slug);
            write_output(&ctx.output_dir, &format!("{alias}.html"), html.as_bytes())
        })
        .collect()
}

fn cleanup_redirects(ctx: &BuildContext, item: &MarkdownContent) -> Vec<VellumResult<PathBuf>> {
    let mut results = Vec::new();
    for alias in &item.record.alias_slugs {
        if let Err(e) = remove_output(&ctx.output_dir, &format!("{alias}.html")) {
            results.push(Err(e));
        }
    }
    results
}

fn render_redirect(from: &str, to: &str) -> String {
    // relative hop from the alias location to the canonical page
    let depth = from.matches('/').count();
    let prefix = "../".repeat(depth);
    let target = format!("{prefix}{to}.html");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>{to}</title>\n\
         <link rel=\"canonical\" href=\"{target}\">\n<meta name=\"robots\" content=\"noindex\">\n\
         <meta charset=\"utf-8\">\n<meta http-equiv=\"refresh\" content=\"0; url={target}\">\n\
         </head>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{FileRecord, Frontmatter};
    use std::fs;
    use tempfile::tempdir;

    fn aliased(path: &str, aliases: &[&str]) -> MarkdownContent {
        let mut fm = Frontmatter::default();
        fm.aliases = aliases.iter().map(|a| a.to_string()).collect();
        MarkdownContent {
            body: String::new(),
            record: FileRecord::new(path, fm),
        }
    }

    fn ctx_in(dir: &std::path::Path) -> BuildContext {
        let mut ctx = BuildContext::rooted_at(Config::default(), dir);
        ctx.output_dir = dir.join("public");
        ctx
    }

    #[test]
    fn emit_all_writes_redirects() {
        let dir = tempdir().unwrap();
        let ctx = ctx_in(dir.path());
        let content = vec![aliased("new-home.md", &["old-home", "archive/home"])];

        let written: Vec<_> = AliasRedirects
            .emit_all(&ctx, &content, &StaticResources::default())
            .unwrap()
            .collect::<VellumResult<Vec<_>>>()
            .unwrap();

        assert_eq!(written.len(), 2);
        let html = fs::read_to_string(ctx.output_dir.join("old-home.html")).unwrap();
        assert!(html.contains("url=new-home.html"));
        let nested = fs::read_to_string(ctx.output_dir.join("archive/home.html")).unwrap();
        assert!(nested.contains("url=../new-home.html"));
    }

    #[test]
    fn partial_skips_when_no_markdown_events() {
        let dir = tempdir().unwrap();
        let ctx = ctx_in(dir.path());
        let resources = StaticResources::default();
        let changes = vec![ChangeEvent {
            path: "logo.png".to_string(),
            kind: ChangeKind::Add,
            content: None,
        }];

        let stream = AliasRedirects
            .emit_partial(&ctx, &[], &resources, &changes)
            .unwrap();
        assert!(stream.is_none());
    }

    #[test]
    fn delete_event_cleans_up_stale_redirects() {
        let dir = tempdir().unwrap();
        let ctx = ctx_in(dir.path());
        let item = aliased("gone.md", &["gone-alias"]);

        // emit, then delete using the record carried by the event
        let resources = StaticResources::default();
        AliasRedirects
            .emit_all(&ctx, std::slice::from_ref(&item), &resources)
            .unwrap()
            .for_each(|r| {
                r.unwrap();
            });
        assert!(ctx.output_dir.join("gone-alias.html").exists());

        let changes = vec![ChangeEvent {
            path: "gone.md".to_string(),
            kind: ChangeKind::Delete,
            content: Some(item),
        }];
        let stream = AliasRedirects
            .emit_partial(&ctx, &[], &resources, &changes)
            .unwrap()
            .expect("delete with record is relevant");
        for r in stream {
            r.unwrap();
        }

        assert!(!ctx.output_dir.join("gone-alias.html").exists());
    }
}
