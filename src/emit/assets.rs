//! Asset emitter
//!
//! Copies non-markdown files from the content tree into the output tree at
//! the same relative path. Incremental: partial builds copy only added or
//! changed assets and delete outputs for removed ones.

use std::fs;
use std::path::PathBuf;

use crate::build::BuildContext;
use crate::error::VellumResult;
use crate::models::{ChangeEvent, ChangeKind, MarkdownContent};
use crate::paths::is_markdown;

use super::helpers::{remove_output, write_output};
use super::{EmitMode, EmitStream, Emitter, StaticResources};

pub struct Assets;

impl Emitter for Assets {
    fn name(&self) -> &'static str {
        "Assets"
    }

    fn mode(&self) -> EmitMode {
        EmitMode::Incremental
    }

    fn emit_all<'a>(
        &'a self,
        ctx: &'a BuildContext,
        _content: &'a [MarkdownContent],
        _resources: &'a StaticResources,
    ) -> VellumResult<EmitStream<'a>> {
        let assets: Vec<String> = ctx
            .all_paths
            .iter()
            .filter(|p| !is_markdown(p))
            .cloned()
            .collect();

        Ok(Box::new(
            assets.into_iter().map(move |path| copy_asset(ctx, &path)),
        ))
    }

    fn emit_partial<'a>(
        &'a self,
        ctx: &'a BuildContext,
        _content: &'a [MarkdownContent],
        _resources: &'a StaticResources,
        changes: &'a [ChangeEvent],
    ) -> VellumResult<Option<EmitStream<'a>>> {
        if !changes.iter().any(|e| !is_markdown(&e.path)) {
            return Ok(None);
        }

        Ok(Some(Box::new(
            changes
                .iter()
                .filter(|e| !is_markdown(&e.path))
                .flat_map(move |event| match event.kind {
                    ChangeKind::Add | ChangeKind::Change => {
                        vec![copy_asset(ctx, &event.path)].into_iter()
                    }
                    ChangeKind::Delete => {
                        let mut results = Vec::new();
                        if let Err(e) = remove_output(&ctx.output_dir, &event.path) {
                            results.push(Err(e));
                        }
                        results.into_iter()
                    }
                }),
        )))
    }
}

fn copy_asset(ctx: &BuildContext, rel_path: &str) -> VellumResult<PathBuf> {
    let bytes = fs::read(ctx.content_dir.join(rel_path))?;
    write_output(&ctx.output_dir, rel_path, &bytes)
}
