//! Terminal Rendering
//!
//! Plain-text views of [`ViewState`] for the CLI. Reports and details are
//! printed exactly as the server sent them.

use chrono::{DateTime, Utc};

use crate::view::ViewState;

/// Number of recent titles shown when no limit is given
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Recent titles, one per line, optionally prefixed with a 1-based index.
///
/// A `limit` of 0 falls back to [`DEFAULT_RECENT_LIMIT`].
pub fn render_recent(titles: &[String], limit: usize, indexed: bool) -> String {
    let limit = if limit == 0 { DEFAULT_RECENT_LIMIT } else { limit };
    titles
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, title)| {
            if indexed {
                format!("{}: {}", i + 1, title)
            } else {
                title.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ongoing tasks with elapsed minutes and local notes
pub fn render_ongoing(state: &ViewState, now: DateTime<Utc>) -> String {
    if state.ongoing.is_empty() {
        return "No ongoing entry.".to_string();
    }

    let mut lines = Vec::new();
    for (title, entry) in &state.ongoing {
        lines.push(title.clone());
        if let Some(minutes) = entry.item.minutes_since_start(now) {
            lines.push(format!("{} minutes ago", minutes.max(0)));
        }
        for note in entry.notes.lines() {
            lines.push(format!("    {}", note));
        }
    }
    lines.join("\n")
}

/// Latest detail of a task
pub fn render_detail(detail: Option<&str>) -> String {
    detail.unwrap_or("No detail.").to_string()
}

/// Report body
pub fn render_report(report: Option<&str>) -> String {
    report.unwrap_or("").to_string()
}

/// Whole state as pretty JSON
pub fn render_json(state: &ViewState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}
