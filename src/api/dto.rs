//! Data Transfer Objects
//!
//! Wire shapes returned by the ticktock backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as reported by `/api/unfinished/`
///
/// Only `title` is required. The server has historically sent capitalized
/// keys, so both spellings are accepted. Unknown fields are kept in `extra`
/// and serialized back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "Title")]
    pub title: String,

    #[serde(default, alias = "Start", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, alias = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Create a task carrying only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: None,
            notes: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the start time
    pub fn started_at(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Tag of the task: the title up to the first `": "`
    pub fn tag(&self) -> &str {
        self.title
            .split_once(": ")
            .map(|(tag, _)| tag)
            .unwrap_or(&self.title)
    }

    /// Whole minutes elapsed between `start` and `now`
    pub fn minutes_since_start(&self, now: DateTime<Utc>) -> Option<i64> {
        self.start.map(|start| (now - start).num_minutes())
    }
}

/// Body of `/api/unfinished/`: a list, a single task, or `null`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UnfinishedBody {
    Many(Vec<Task>),
    One(Task),
}

impl UnfinishedBody {
    pub(crate) fn into_tasks(body: Option<Self>) -> Vec<Task> {
        match body {
            Some(UnfinishedBody::Many(tasks)) => tasks,
            Some(UnfinishedBody::One(task)) => vec![task],
            None => Vec::new(),
        }
    }
}
