//! Emitters and the emitter adapter
//!
//! An emitter turns processed content into output artifacts. Every emitter
//! can produce everything from a full snapshot (`emit_all`); emitters that
//! also know how to react to a set of change events implement
//! `emit_partial`. The capability is declared once via `mode()` and cached
//! at registration, so the full-vs-incremental decision is a data lookup
//! rather than an ad hoc check per build.
//!
//! Emitters run sequentially: later emitters may depend on files written by
//! earlier ones. Each produced stream is lazy and finite; the adapter drains
//! it fully, counting outputs, before moving on.

mod aliases;
mod assets;
mod folder;
pub mod helpers;
mod page;

pub use aliases::AliasRedirects;
pub use assets::Assets;
pub use folder::FolderIndex;
pub use page::ContentPage;

use std::path::PathBuf;

use crate::build::BuildContext;
use crate::error::{VellumError, VellumResult};
use crate::models::{ChangeEvent, MarkdownContent};

/// How an emitter participates in incremental builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// No incremental strategy; re-run in full on every build
    Full,
    /// Can emit only what a set of change events affects
    Incremental,
}

/// A lazy, finite, non-restartable sequence of written output paths.
pub type EmitStream<'a> = Box<dyn Iterator<Item = VellumResult<PathBuf>> + 'a>;

/// Assets emitters want present in every page, independent of content.
#[derive(Debug, Clone, Default)]
pub struct StaticResources {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl StaticResources {
    pub fn merge(&mut self, other: StaticResources) {
        self.css.extend(other.css);
        self.js.extend(other.js);
    }
}

/// A collaborator that turns processed content into output artifacts.
pub trait Emitter: Send + Sync {
    /// Stable name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    fn mode(&self) -> EmitMode {
        EmitMode::Full
    }

    /// Resources to inject regardless of content changes.
    fn static_resources(&self) -> StaticResources {
        StaticResources::default()
    }

    /// Emit everything from the current content snapshot.
    fn emit_all<'a>(
        &'a self,
        ctx: &'a BuildContext,
        content: &'a [MarkdownContent],
        resources: &'a StaticResources,
    ) -> VellumResult<EmitStream<'a>>;

    /// Emit only what `changes` affects. `Ok(None)` means this emitter
    /// determined no changes affect it and can be skipped entirely.
    /// Called only when `mode()` is `Incremental`.
    fn emit_partial<'a>(
        &'a self,
        _ctx: &'a BuildContext,
        _content: &'a [MarkdownContent],
        _resources: &'a StaticResources,
        _changes: &'a [ChangeEvent],
    ) -> VellumResult<Option<EmitStream<'a>>> {
        Ok(None)
    }
}

/// An emitter with its capability resolved at registration time.
pub struct RegisteredEmitter {
    pub emitter: Box<dyn Emitter>,
    pub mode: EmitMode,
}

/// Resolve each emitter's mode once.
pub fn register(emitters: Vec<Box<dyn Emitter>>) -> Vec<RegisteredEmitter> {
    emitters
        .into_iter()
        .map(|emitter| {
            let mode = emitter.mode();
            RegisteredEmitter { emitter, mode }
        })
        .collect()
}

/// The default emitter set, in dependency order.
pub fn default_emitters() -> Vec<Box<dyn Emitter>> {
    vec![
        Box::new(ContentPage),
        Box::new(FolderIndex),
        Box::new(AliasRedirects),
        Box::new(Assets),
    ]
}

/// Union of all registered emitters' static resources.
pub fn collect_static_resources(emitters: &[RegisteredEmitter]) -> StaticResources {
    let mut resources = StaticResources::default();
    for reg in emitters {
        resources.merge(reg.emitter.static_resources());
    }
    resources
}

/// Per-emitter outcome of one build.
#[derive(Debug, Clone)]
pub struct EmitterReport {
    pub name: String,
    pub outputs: usize,
    /// True when an incremental emitter declined the change set
    pub skipped: bool,
}

/// Run every emitter sequentially, fully draining each output stream.
///
/// `changes` is `None` for full builds; incremental emitters then fall back
/// to `emit_all` like everyone else.
pub fn run_emitters(
    emitters: &[RegisteredEmitter],
    ctx: &BuildContext,
    content: &[MarkdownContent],
    resources: &StaticResources,
    changes: Option<&[ChangeEvent]>,
) -> VellumResult<Vec<EmitterReport>> {
    let mut reports = Vec::with_capacity(emitters.len());

    for reg in emitters {
        let name = reg.emitter.name();

        let stream = match (changes, reg.mode) {
            (Some(changes), EmitMode::Incremental) => {
                match reg.emitter.emit_partial(ctx, content, resources, changes)? {
                    Some(stream) => stream,
                    None => {
                        reports.push(EmitterReport {
                            name: name.to_string(),
                            outputs: 0,
                            skipped: true,
                        });
                        continue;
                    }
                }
            }
            _ => reg.emitter.emit_all(ctx, content, resources)?,
        };

        let mut outputs = 0;
        for item in stream {
            item.map_err(|e| VellumError::Emit {
                emitter: name.to_string(),
                message: e.to_string(),
            })?;
            outputs += 1;
        }

        reports.push(EmitterReport {
            name: name.to_string(),
            outputs,
            skipped: false,
        });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    struct Counting {
        mode: EmitMode,
        n: usize,
    }

    impl Emitter for Counting {
        fn name(&self) -> &'static str {
            "Counting"
        }

        fn mode(&self) -> EmitMode {
            self.mode
        }

        fn emit_all<'a>(
            &'a self,
            _ctx: &'a BuildContext,
            _content: &'a [MarkdownContent],
            _resources: &'a StaticResources,
        ) -> VellumResult<EmitStream<'a>> {
            Ok(Box::new(
                (0..self.n).map(|i| Ok(PathBuf::from(format!("out-{i}.html")))),
            ))
        }

        fn emit_partial<'a>(
            &'a self,
            _ctx: &'a BuildContext,
            _content: &'a [MarkdownContent],
            _resources: &'a StaticResources,
            changes: &'a [ChangeEvent],
        ) -> VellumResult<Option<EmitStream<'a>>> {
            if changes.is_empty() {
                return Ok(None);
            }
            Ok(Some(Box::new(
                changes.iter().map(|c| Ok(PathBuf::from(&c.path))),
            )))
        }
    }

    fn ctx() -> BuildContext {
        BuildContext::new(Config::default())
    }

    #[test]
    fn register_caches_mode() {
        let regs = register(vec![
            Box::new(Counting {
                mode: EmitMode::Full,
                n: 0,
            }),
            Box::new(Counting {
                mode: EmitMode::Incremental,
                n: 0,
            }),
        ]);
        assert_eq!(regs[0].mode, EmitMode::Full);
        assert_eq!(regs[1].mode, EmitMode::Incremental);
    }

    #[test]
    fn full_build_uses_emit_all() {
        let regs = register(vec![Box::new(Counting {
            mode: EmitMode::Incremental,
            n: 3,
        })]);
        let reports = run_emitters(&regs, &ctx(), &[], &StaticResources::default(), None).unwrap();

        assert_eq!(reports[0].outputs, 3);
        assert!(!reports[0].skipped);
    }

    #[test]
    fn incremental_none_means_skip() {
        let regs = register(vec![Box::new(Counting {
            mode: EmitMode::Incremental,
            n: 3,
        })]);
        let reports =
            run_emitters(&regs, &ctx(), &[], &StaticResources::default(), Some(&[])).unwrap();

        assert_eq!(reports[0].outputs, 0);
        assert!(reports[0].skipped);
    }

    #[test]
    fn full_only_emitter_reruns_on_partial_builds() {
        let regs = register(vec![Box::new(Counting {
            mode: EmitMode::Full,
            n: 2,
        })]);
        let reports =
            run_emitters(&regs, &ctx(), &[], &StaticResources::default(), Some(&[])).unwrap();

        assert_eq!(reports[0].outputs, 2);
        assert!(!reports[0].skipped);
    }
}
