//! In-memory backend for view-model tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiError, ApiResult, Task, TicktockApi};

/// One recorded call against [`MockApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Recent,
    Unfinished,
    Start(String),
    Finish { title: String, notes: String },
    Report { day_start: String, day_end: String, view_type: String },
    Latest(String),
}

/// Endpoints a failure can be injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Recent,
    Unfinished,
    Start,
    Finish,
    Report,
    Latest,
}

/// A hand-rolled backend that behaves like a tiny ticktock server.
///
/// `start` moves a title into the unfinished list, `finish` moves it to the
/// front of the recent list. Any endpoint can be made to answer with a fixed
/// status instead.
#[derive(Default)]
pub struct MockApi {
    recent: Mutex<Vec<String>>,
    unfinished: Mutex<Vec<Task>>,
    report: Mutex<String>,
    details: Mutex<HashMap<String, String>>,
    failures: Mutex<HashMap<Endpoint, u16>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent(self, titles: &[&str]) -> Self {
        *self.recent.lock().unwrap() = titles.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_unfinished(self, titles: &[&str]) -> Self {
        *self.unfinished.lock().unwrap() = titles.iter().map(|t| Task::new(*t)).collect();
        self
    }

    pub fn with_report(self, report: &str) -> Self {
        *self.report.lock().unwrap() = report.to_string();
        self
    }

    pub fn with_detail(self, title: &str, detail: &str) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(title.to_string(), detail.to_string());
        self
    }

    pub fn fail(&self, endpoint: Endpoint, status: u16) {
        self.failures.lock().unwrap().insert(endpoint, status);
    }

    pub fn heal(&self, endpoint: Endpoint) {
        self.failures.lock().unwrap().remove(&endpoint);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call, endpoint: Endpoint) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(&endpoint) {
            Some(status) => Err(ApiError::Status(*status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TicktockApi for MockApi {
    async fn recent_titles(&self) -> ApiResult<Vec<String>> {
        self.record(Call::Recent, Endpoint::Recent)?;
        Ok(self.recent.lock().unwrap().clone())
    }

    async fn unfinished(&self) -> ApiResult<Vec<Task>> {
        self.record(Call::Unfinished, Endpoint::Unfinished)?;
        Ok(self.unfinished.lock().unwrap().clone())
    }

    async fn start(&self, title: &str) -> ApiResult<()> {
        self.record(Call::Start(title.to_string()), Endpoint::Start)?;
        self.unfinished.lock().unwrap().push(Task::new(title));
        Ok(())
    }

    async fn finish(&self, title: &str, notes: &str) -> ApiResult<()> {
        self.record(
            Call::Finish {
                title: title.to_string(),
                notes: notes.to_string(),
            },
            Endpoint::Finish,
        )?;
        self.unfinished.lock().unwrap().retain(|t| t.title != title);
        let mut recent = self.recent.lock().unwrap();
        recent.retain(|t| t != title);
        recent.insert(0, title.to_string());
        Ok(())
    }

    async fn report_by_date(
        &self,
        day_start: &str,
        day_end: &str,
        view_type: &str,
    ) -> ApiResult<String> {
        self.record(
            Call::Report {
                day_start: day_start.to_string(),
                day_end: day_end.to_string(),
                view_type: view_type.to_string(),
            },
            Endpoint::Report,
        )?;
        Ok(self.report.lock().unwrap().clone())
    }

    async fn latest(&self, title: &str) -> ApiResult<String> {
        self.record(Call::Latest(title.to_string()), Endpoint::Latest)?;
        Ok(self
            .details
            .lock()
            .unwrap()
            .get(title)
            .cloned()
            .unwrap_or_default())
    }
}
