//! View State
//!
//! Plain data the view renders from. Owned by the
//! [`ViewModel`](super::ViewModel), handed out as snapshots.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use super::clock::format_day;
use crate::api::Task;

/// View type requested when nothing else is configured
pub const DEFAULT_VIEW_TYPE: &str = "daily_detail";

/// Everything the view shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// Recently finished titles, most recent first
    pub recent_titles: Vec<String>,
    /// Ongoing tasks keyed by title, in server order
    pub ongoing: IndexMap<String, OngoingEntry>,
    /// Latest detail of the last inspected task
    pub detail: Option<String>,
    /// Message of the most recent failure
    pub error: Option<String>,
    /// Report query fields
    pub query: QueryParams,
    /// Last fetched report, as returned by the server
    pub report: Option<String>,
}

/// An ongoing task plus the notes typed for it locally
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OngoingEntry {
    pub item: Task,
    pub notes: String,
}

impl OngoingEntry {
    pub fn new(item: Task) -> Self {
        Self {
            item,
            notes: String::new(),
        }
    }
}

/// Report query: inclusive day range and view type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParams {
    pub day_start: String,
    pub day_end: String,
    pub view_type: String,
}

impl QueryParams {
    /// Query covering a single day
    pub fn for_day(day: NaiveDate, view_type: impl Into<String>) -> Self {
        Self::for_range(day, day, view_type)
    }

    /// Query covering `start..=end`
    pub fn for_range(start: NaiveDate, end: NaiveDate, view_type: impl Into<String>) -> Self {
        Self {
            day_start: format_day(start),
            day_end: format_day(end),
            view_type: view_type.into(),
        }
    }
}

impl ViewState {
    /// Initial state: nothing loaded, query set to `today`
    pub fn new(today: NaiveDate, view_type: impl Into<String>) -> Self {
        Self {
            recent_titles: Vec::new(),
            ongoing: IndexMap::new(),
            detail: None,
            error: None,
            query: QueryParams::for_day(today, view_type),
            report: None,
        }
    }

    /// Replace the ongoing map from a fresh server list, dropping local notes
    pub fn replace_ongoing(&mut self, tasks: Vec<Task>) {
        self.ongoing = tasks
            .into_iter()
            .map(|task| (task.title.clone(), OngoingEntry::new(task)))
            .collect();
    }

    /// Local notes of an ongoing task
    pub fn notes(&self, title: &str) -> Option<&str> {
        self.ongoing.get(title).map(|entry| entry.notes.as_str())
    }
}
