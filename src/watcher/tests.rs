//! Tests for the watcher module

use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
use notify::EventKind;
use tempfile::tempdir;

use crate::build::{BuildContext, BuildCoordinator};
use crate::config::Config;
use crate::emit::default_emitters;
use crate::models::ChangeKind;

use super::event::{WatchEvent, WatchOptions};
use super::ignore::IgnorePolicy;
use super::sync::{content_relative, map_event_kind, watch};

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        content_dir: "content".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"content_dir\":\"content\""));
}

#[test]
fn test_watch_event_to_json_file_changed() {
    let event = WatchEvent::FileChanged {
        path: "notes/test.md".to_string(),
        kind: ChangeKind::Delete,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"file_changed\""));
    assert!(json.contains("\"path\":\"notes/test.md\""));
    assert!(json.contains("\"kind\":\"delete\""));
}

#[test]
fn test_watch_event_to_json_build_complete() {
    let event = WatchEvent::BuildComplete {
        build_id: 3,
        emitted: 7,
        diagnostics: 1,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"build_complete\""));
    assert!(json.contains("\"build_id\":3"));
    assert!(json.contains("\"emitted\":7"));
    assert!(json.contains("\"diagnostics\":1"));
}

#[test]
fn test_watch_event_to_json_error() {
    let event = WatchEvent::Error {
        message: "Something \"failed\"".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"error\""));
    assert!(json.contains("\\\"failed\\\""));
}

#[test]
fn test_map_event_kind() {
    assert_eq!(
        map_event_kind(&EventKind::Create(CreateKind::File)),
        Some(ChangeKind::Add)
    );
    assert_eq!(
        map_event_kind(&EventKind::Modify(ModifyKind::Any)),
        Some(ChangeKind::Change)
    );
    assert_eq!(
        map_event_kind(&EventKind::Remove(RemoveKind::File)),
        Some(ChangeKind::Delete)
    );
    assert_eq!(map_event_kind(&EventKind::Access(AccessKind::Any)), None);
}

#[test]
fn test_content_relative_strips_root() {
    let root = Path::new("/tmp/site/content");
    assert_eq!(
        content_relative(root, root, Path::new("/tmp/site/content/notes/a.md")),
        Some("notes/a.md".to_string())
    );
    assert_eq!(
        content_relative(root, root, Path::new("/tmp/elsewhere/b.md")),
        None
    );
}

#[cfg(unix)]
#[test]
fn test_content_relative_resolves_deletes_under_symlinked_root() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("content");
    fs::create_dir_all(&real).unwrap();
    fs::write(real.join("a.md"), "x").unwrap();

    let link = dir.path().join("site");
    std::os::unix::fs::symlink(&real, &link).unwrap();
    let canonical = link.canonicalize().unwrap();

    // Events spelled under either form of the root resolve
    assert_eq!(
        content_relative(&link, &canonical, &canonical.join("a.md")),
        Some("a.md".to_string())
    );
    // A deleted file cannot be canonicalized; the as-watched prefix
    // must still resolve it
    assert_eq!(
        content_relative(&link, &canonical, &link.join("gone.md")),
        Some("gone.md".to_string())
    );
}

#[test]
fn test_ignore_policy_git_dir_always_ignored() {
    let policy = IgnorePolicy::empty();
    assert!(policy.is_ignored(Path::new(".git/HEAD"), false));
    assert!(policy.is_ignored(Path::new(".git"), true));
    assert!(!policy.is_ignored(Path::new("notes/a.md"), false));
}

#[test]
fn test_ignore_policy_config_patterns() {
    let dir = tempdir().unwrap();
    let mut config = Config::default();
    config.ignore_patterns = vec!["templates/**".to_string(), "*.tmp".to_string()];

    let policy = IgnorePolicy::load(dir.path(), &config);
    assert!(policy.is_ignored(Path::new("templates/base.md"), false));
    assert!(policy.is_ignored(Path::new("notes/scratch.tmp"), false));
    assert!(!policy.is_ignored(Path::new("notes/a.md"), false));
}

#[test]
fn test_ignore_policy_reads_project_gitignore() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".gitignore"), "# editors\ndrafts/\n*.bak\n").unwrap();

    let policy = IgnorePolicy::load(dir.path(), &Config::default());
    assert!(policy.is_ignored(Path::new("drafts/wip.md"), false));
    assert!(policy.is_ignored(Path::new("old.bak"), false));
    assert!(!policy.is_ignored(Path::new("notes/a.md"), false));
}

#[test]
fn test_ignore_policy_degrades_open_on_bad_input() {
    let dir = tempdir().unwrap();
    // A .gitignore that cannot be read as a file is skipped, not fatal
    fs::create_dir_all(dir.path().join(".gitignore")).unwrap();
    let mut config = Config::default();
    config.ignore_patterns = vec!["*.tmp".to_string()];

    let policy = IgnorePolicy::load(dir.path(), &config);
    assert!(policy.is_ignored(Path::new("scratch.tmp"), false));
    assert!(!policy.is_ignored(Path::new("notes/a.md"), false));
}

#[test]
fn test_watch_initial_build() {
    let dir = tempdir().unwrap();
    let content = dir.path().join("content");
    fs::create_dir_all(&content).unwrap();
    fs::write(content.join("index.md"), "---\ntitle: Home\n---\nhi\n").unwrap();

    let config = Config::default();
    let options = WatchOptions {
        project_root: dir.path().to_path_buf(),
        config: config.clone(),
        json: false,
    };
    let ctx = BuildContext::rooted_at(config, dir.path());
    let coordinator =
        Arc::new(BuildCoordinator::new(ctx).with_emitters(default_emitters()));

    let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    let running = Arc::new(AtomicBool::new(false)); // Stop immediately

    watch(options, coordinator, running, |event| {
        events_clone.lock().unwrap().push(event.to_json());
    })
    .unwrap();

    let captured = events.lock().unwrap();
    assert!(captured[0].contains("watch_started"));
    assert!(captured.iter().any(|e| e.contains("build_complete")));
    assert!(captured.last().unwrap().contains("shutdown"));
    assert!(dir.path().join("public/index.html").exists());
}
