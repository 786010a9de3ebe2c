use std::path::Path;

use anyhow::Result;

use vellum::build::{BuildContext, BuildCoordinator};
use vellum::config::Config;
use vellum::emit::default_emitters;
use vellum::filter::RemoveDrafts;
use vellum::ui;
use vellum::watcher::IgnorePolicy;

pub fn cmd_build(root: &Path, json: bool, verbose: u8) -> Result<()> {
    let config = Config::load(&root.join("vellum.toml"))?;
    let ignore = IgnorePolicy::load(root, &config);

    let ctx = BuildContext::rooted_at(config, root);
    let coordinator = BuildCoordinator::new(ctx)
        .with_filters(vec![Box::new(RemoveDrafts)])
        .with_emitters(default_emitters())
        .with_ignore(Box::new(move |path| {
            ignore.is_ignored(Path::new(path), false)
        }));

    let report = coordinator.build_full()?;

    if json {
        for diag in &report.diagnostics {
            println!(
                "{}",
                serde_json::json!({
                    "event": "parse_error",
                    "path": diag.path,
                    "message": diag.message,
                })
            );
        }
        println!(
            "{}",
            serde_json::json!({
                "event": "build_complete",
                "build_id": report.build_id,
                "parsed": report.parsed,
                "emitted": report.emitted,
                "diagnostics": report.diagnostics.len(),
            })
        );
    } else {
        let caps = ui::Capabilities::detect(false);
        print!("{}", ui::render_build_report(&report, caps, verbose > 0));
    }

    Ok(())
}
