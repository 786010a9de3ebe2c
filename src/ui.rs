//! Terminal output rendering
//!
//! Small, dependency-light rendering layer: capability detection (color,
//! unicode), icons with ASCII fallbacks, and one renderer per surface
//! (build summary, watch event stream). NDJSON mode bypasses all of this.

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

use crate::build::BuildReport;
use crate::models::ChangeKind;
use crate::watcher::WatchEvent;

mod colors {
    use crossterm::style::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

/// What the attached terminal can display.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub color: bool,
    pub unicode: bool,
}

impl Capabilities {
    /// Detect from the environment. NDJSON output is always plain.
    pub fn detect(json: bool) -> Self {
        if json {
            return Self::plain();
        }
        let tty = std::io::stdout().is_terminal();
        let color = tty && std::env::var_os("NO_COLOR").is_none();
        let unicode = std::env::var("LANG")
            .map(|l| l.to_uppercase().contains("UTF"))
            .unwrap_or(false)
            || std::env::var("LC_ALL")
                .map(|l| l.to_uppercase().contains("UTF"))
                .unwrap_or(false);
        Self { color, unicode }
    }

    pub fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Watch,
}

impl Icon {
    pub fn render(&self, unicode: bool) -> &'static str {
        match (unicode, self) {
            (true, Icon::Success) => "✓",
            (true, Icon::Error) => "✗",
            (true, Icon::Warning) => "⚠",
            (true, Icon::Progress) => "◌",
            (true, Icon::Arrow) => "→",
            (true, Icon::Watch) => "◉",
            (false, Icon::Success) => "[ok]",
            (false, Icon::Error) => "[x]",
            (false, Icon::Warning) => "[!]",
            (false, Icon::Progress) => "[..]",
            (false, Icon::Arrow) => "->",
            (false, Icon::Watch) => "[~]",
        }
    }

    pub fn colored(&self, caps: Capabilities) -> String {
        let s = self.render(caps.unicode);
        if !caps.color {
            return s.to_string();
        }
        let color: Color = match self {
            Icon::Success => colors::SUCCESS,
            Icon::Error => colors::ERROR,
            Icon::Warning | Icon::Progress => colors::WARNING,
            Icon::Arrow => colors::DIM,
            Icon::Watch => colors::INFO,
        };
        format!("{}", s.with(color))
    }
}

/// One-shot build summary for the `build` command. The per-emitter
/// breakdown only appears at `-v` and above.
pub fn render_build_report(report: &BuildReport, caps: Capabilities, verbose: bool) -> String {
    let mut out = String::new();

    let icon = if report.diagnostics.is_empty() {
        Icon::Success
    } else {
        Icon::Warning
    };
    out.push_str(&format!(
        "{} Build finished: {} files parsed, {} artifacts written\n",
        icon.colored(caps),
        report.parsed,
        report.emitted
    ));

    if verbose {
        for er in &report.emitters {
            let note = if er.skipped { " (skipped)" } else { "" };
            out.push_str(&format!(
                "  {} {}: {}{}\n",
                Icon::Arrow.colored(caps),
                er.name,
                er.outputs,
                note
            ));
        }
    }

    for diag in &report.diagnostics {
        out.push_str(&format!(
            "{} {}: {}\n",
            Icon::Warning.colored(caps),
            diag.path,
            diag.message
        ));
    }

    out
}

/// One line per watch event, prefixed with a wall-clock timestamp.
pub fn render_watch_event(timestamp: &str, event: &WatchEvent, caps: Capabilities) -> String {
    let prefix = format!("[{}]", timestamp);

    match event {
        WatchEvent::WatchStarted { content_dir } => format!(
            "{} {} Watching: {} (Ctrl+C to stop)\n",
            prefix,
            Icon::Watch.colored(caps),
            content_dir
        ),
        WatchEvent::FileChanged { path, kind } => {
            let verb = match kind {
                ChangeKind::Add => "Added",
                ChangeKind::Change => "Changed",
                ChangeKind::Delete => "Deleted",
            };
            format!(
                "{} {} {}: {}\n",
                prefix,
                Icon::Arrow.colored(caps),
                verb,
                path
            )
        }
        WatchEvent::BuildStarted => format!(
            "{} {} Building...\n",
            prefix,
            Icon::Progress.colored(caps)
        ),
        WatchEvent::BuildComplete {
            build_id,
            emitted,
            diagnostics,
        } => {
            let icon = if *diagnostics > 0 {
                Icon::Warning
            } else {
                Icon::Success
            }
            .colored(caps);

            if *diagnostics > 0 {
                format!(
                    "{} {} Build #{}: {} artifacts, {} warnings\n",
                    prefix, icon, build_id, emitted, diagnostics
                )
            } else {
                format!(
                    "{} {} Build #{}: {} artifacts\n",
                    prefix, icon, build_id, emitted
                )
            }
        }
        WatchEvent::BuildSkipped => format!(
            "{} {} Nothing to rebuild\n",
            prefix,
            Icon::Arrow.colored(caps)
        ),
        WatchEvent::Error { message } => format!(
            "{} {} Error: {}\n",
            prefix,
            Icon::Error.colored(caps),
            message
        ),
        WatchEvent::Shutdown => format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            Icon::Watch.colored(caps)
        ),
    }
}
