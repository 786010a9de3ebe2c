use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use vellum::build::{BuildContext, BuildCoordinator};
use vellum::config::Config;
use vellum::emit::default_emitters;
use vellum::filter::RemoveDrafts;
use vellum::ui;
use vellum::watcher::{watch, IgnorePolicy, WatchEvent, WatchOptions};

pub fn cmd_watch(root: &Path, json: bool) -> Result<()> {
    let config = Config::load(&root.join("vellum.toml"))?;
    let ignore = IgnorePolicy::load(root, &config);

    let options = WatchOptions {
        project_root: root.to_path_buf(),
        config: config.clone(),
        json,
    };

    let ctx = BuildContext::rooted_at(config, root);
    let coordinator = Arc::new(
        BuildCoordinator::new(ctx)
            .with_filters(vec![Box::new(RemoveDrafts)])
            .with_emitters(default_emitters())
            .with_ignore(Box::new(move |path| {
                ignore.is_ignored(Path::new(path), false)
            })),
    );

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let caps = ui::Capabilities::detect(json);

    watch(options, coordinator, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| {
                    let secs = d.as_secs() % 86_400;
                    let h = secs / 3600;
                    let m = (secs % 3600) / 60;
                    let s = secs % 60;
                    format!("{:02}:{:02}:{:02}", h, m, s)
                })
                .unwrap_or_else(|_| "00:00:00".to_string());

            let rendered = ui::render_watch_event(&timestamp, &event, caps);

            match event {
                WatchEvent::Error { .. } => eprint!("{rendered}"),
                _ => print!("{rendered}"),
            }
        }
    })?;

    Ok(())
}
