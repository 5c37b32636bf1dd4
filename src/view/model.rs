//! View Model
//!
//! Mediates between user actions and the backend. Every operation is one
//! request (refresh is two, run side by side) followed by a state update.
//! Failures land in the single `error` slot and are also returned.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::clock::{format_day, quick_range, Clock};
use super::error::{ViewError, ViewResult};
use super::state::{QueryParams, ViewState, DEFAULT_VIEW_TYPE};
use crate::api::TicktockApi;

/// Controller owning the view state
pub struct ViewModel {
    api: Arc<dyn TicktockApi>,
    clock: Arc<dyn Clock>,
    state: Arc<RwLock<ViewState>>,
}

impl ViewModel {
    /// Create a view-model with the default view type
    pub fn new(api: Arc<dyn TicktockApi>, clock: Arc<dyn Clock>) -> Self {
        Self::with_view_type(api, clock, DEFAULT_VIEW_TYPE)
    }

    /// Create a view-model whose report query starts with `view_type`
    pub fn with_view_type(
        api: Arc<dyn TicktockApi>,
        clock: Arc<dyn Clock>,
        view_type: impl Into<String>,
    ) -> Self {
        let state = ViewState::new(clock.today(), view_type);
        Self {
            api,
            clock,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    /// Store a failure in the error slot and hand it back
    async fn record<T>(&self, result: ViewResult<T>) -> ViewResult<T> {
        if let Err(e) = &result {
            tracing::warn!(error = %e, local = e.is_local(), "View operation failed");
            self.state.write().await.error = Some(e.to_string());
        }
        result
    }

    /// Reload recent titles and ongoing tasks.
    ///
    /// Clears the error first. The two fetches run concurrently and each
    /// writes its own slice as soon as it completes.
    pub async fn refresh(&self) -> ViewResult<()> {
        self.state.write().await.error = None;

        let (recent, ongoing) = tokio::join!(self.load_recent(), self.load_ongoing());
        recent.and(ongoing)
    }

    async fn load_recent(&self) -> ViewResult<()> {
        let result = self.api.recent_titles().await;
        let titles = self.record(result.map_err(ViewError::from)).await?;

        tracing::debug!(count = titles.len(), "Loaded recent titles");
        self.state.write().await.recent_titles = titles;
        Ok(())
    }

    async fn load_ongoing(&self) -> ViewResult<()> {
        let result = self.api.unfinished().await;
        let tasks = self.record(result.map_err(ViewError::from)).await?;

        tracing::debug!(count = tasks.len(), "Loaded ongoing tasks");
        self.state.write().await.replace_ongoing(tasks);
        Ok(())
    }

    /// Start a task, then refresh
    pub async fn start(&self, title: &str) -> ViewResult<()> {
        if title.is_empty() {
            return self.record(Err(ViewError::EmptyTitle)).await;
        }

        tracing::info!(title = %title, "Starting task");
        let result = self.api.start(title).await;
        self.record(result.map_err(ViewError::from)).await?;
        self.refresh().await
    }

    /// Finish an ongoing task with its local notes, then refresh
    pub async fn finish(&self, title: &str) -> ViewResult<()> {
        let notes = self.state.read().await.notes(title).map(str::to_string);
        let Some(notes) = notes else {
            return self
                .record(Err(ViewError::NotOngoing(title.to_string())))
                .await;
        };

        tracing::info!(title = %title, notes_len = notes.len(), "Finishing task");
        let result = self.api.finish(title, &notes).await;
        self.record(result.map_err(ViewError::from)).await?;
        self.refresh().await
    }

    /// Replace the local notes of an ongoing task
    pub async fn set_notes(&self, title: &str, notes: impl Into<String>) -> ViewResult<()> {
        let updated = {
            let mut state = self.state.write().await;
            match state.ongoing.get_mut(title) {
                Some(entry) => {
                    entry.notes = notes.into();
                    true
                }
                None => false,
            }
        };

        if updated {
            Ok(())
        } else {
            self.record(Err(ViewError::NotOngoing(title.to_string())))
                .await
        }
    }

    /// Replace the report query fields
    pub async fn set_query(&self, query: QueryParams) {
        self.state.write().await.query = query;
    }

    /// Fetch the report for the current query fields
    pub async fn report(&self) -> ViewResult<()> {
        let query = self.state.read().await.query.clone();
        self.report_by_date(&query.day_start, &query.day_end, &query.view_type)
            .await
    }

    /// Fetch the report for `day_start..=day_end` and store it verbatim
    pub async fn report_by_date(
        &self,
        day_start: &str,
        day_end: &str,
        view_type: &str,
    ) -> ViewResult<()> {
        if day_start.is_empty() || day_end.is_empty() {
            return self.record(Err(ViewError::EmptyDateRange)).await;
        }

        tracing::debug!(%day_start, %day_end, %view_type, "Fetching report");
        let result = self.api.report_by_date(day_start, day_end, view_type).await;
        let report = self.record(result.map_err(ViewError::from)).await?;

        self.state.write().await.report = Some(report);
        Ok(())
    }

    /// Report for a range derived from today; see [`quick_range`]
    pub async fn quick_report(&self, offset_days: u32, window_days: Option<u32>) -> ViewResult<()> {
        let (start, end) = self
            .record(quick_range(self.clock.today(), offset_days, window_days))
            .await?;

        let query = {
            let mut state = self.state.write().await;
            state.query.day_start = format_day(start);
            state.query.day_end = format_day(end);
            state.query.clone()
        };

        self.report_by_date(&query.day_start, &query.day_end, &query.view_type)
            .await
    }

    /// Fetch the latest detail of a task; an empty answer means no detail
    pub async fn item_detail(&self, title: &str) -> ViewResult<()> {
        let result = self.api.latest(title).await;
        let detail = self.record(result.map_err(ViewError::from)).await?;

        self.state.write().await.detail = if detail.is_empty() {
            None
        } else {
            Some(detail)
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{Call, Endpoint, MockApi};
    use crate::view::clock::FixedClock;
    use chrono::{Local, TimeZone};

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(
            Local.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        ))
    }

    fn setup(api: MockApi) -> (Arc<MockApi>, ViewModel) {
        let api = Arc::new(api);
        let model = ViewModel::new(api.clone(), clock());
        (api, model)
    }

    #[tokio::test]
    async fn test_refresh_loads_both_slices() {
        let (api, model) = setup(
            MockApi::new()
                .with_recent(&["reading", "code"])
                .with_unfinished(&["code: ticktock"]),
        );

        model.refresh().await.unwrap();

        let state = model.snapshot().await;
        assert_eq!(state.recent_titles, ["reading", "code"]);
        assert_eq!(state.notes("code: ticktock"), Some(""));
        assert_eq!(state.error, None);
        assert_eq!(api.count(&Call::Recent), 1);
        assert_eq!(api.count(&Call::Unfinished), 1);
    }

    #[tokio::test]
    async fn test_refresh_clears_previous_error() {
        let (_api, model) = setup(MockApi::new());
        model.start("").await.unwrap_err();
        assert!(model.snapshot().await.error.is_some());

        model.refresh().await.unwrap();
        assert_eq!(model.snapshot().await.error, None);
    }

    #[tokio::test]
    async fn test_refresh_slices_fail_independently() {
        let (api, model) = setup(MockApi::new().with_recent(&["a"]).with_unfinished(&["b"]));
        api.fail(Endpoint::Unfinished, 503);

        let err = model.refresh().await.unwrap_err();
        assert_eq!(err.to_string(), "503");

        let state = model.snapshot().await;
        assert_eq!(state.recent_titles, ["a"]);
        assert!(state.ongoing.is_empty());
        assert_eq!(state.error.as_deref(), Some("503"));
    }

    #[tokio::test]
    async fn test_start_empty_title_sends_nothing() {
        let (api, model) = setup(MockApi::new());

        let err = model.start("").await.unwrap_err();
        assert!(matches!(err, ViewError::EmptyTitle));
        assert!(api.calls().is_empty());

        let error = model.snapshot().await.error.unwrap();
        assert!(!error.is_empty());
    }

    #[tokio::test]
    async fn test_start_success_refreshes() {
        let (api, model) = setup(MockApi::new());

        model.start("code: ticktock").await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::Start("code: ticktock".to_string()),
                Call::Recent,
                Call::Unfinished,
            ]
        );
        assert!(model.snapshot().await.ongoing.contains_key("code: ticktock"));
    }

    #[tokio::test]
    async fn test_start_failure_keeps_state() {
        let (api, model) = setup(MockApi::new().with_recent(&["a"]));
        model.refresh().await.unwrap();
        let before = model.snapshot().await;
        api.clear_calls();
        api.fail(Endpoint::Start, 500);

        let err = model.start("b").await.unwrap_err();
        assert!(!err.is_local());

        let after = model.snapshot().await;
        assert_eq!(after.error.as_deref(), Some("500"));
        assert_eq!(after.recent_titles, before.recent_titles);
        assert_eq!(after.ongoing, before.ongoing);
        assert_eq!(api.calls(), vec![Call::Start("b".to_string())]);
    }

    #[tokio::test]
    async fn test_finish_sends_local_notes_and_refreshes_once() {
        let (api, model) = setup(MockApi::new().with_unfinished(&["reading"]));
        model.refresh().await.unwrap();
        model.set_notes("reading", "ch. 3\nch. 4").await.unwrap();
        api.clear_calls();

        model.finish("reading").await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::Finish {
                    title: "reading".to_string(),
                    notes: "ch. 3\nch. 4".to_string(),
                },
                Call::Recent,
                Call::Unfinished,
            ]
        );
        let state = model.snapshot().await;
        assert_eq!(state.recent_titles, ["reading"]);
        assert!(state.ongoing.is_empty());
    }

    #[tokio::test]
    async fn test_finish_failure_mutates_nothing() {
        let (api, model) = setup(MockApi::new().with_recent(&["x"]).with_unfinished(&["reading"]));
        model.refresh().await.unwrap();
        model.set_notes("reading", "notes").await.unwrap();
        api.clear_calls();
        api.fail(Endpoint::Finish, 409);

        model.finish("reading").await.unwrap_err();

        assert_eq!(api.count(&Call::Recent), 0);
        assert_eq!(api.count(&Call::Unfinished), 0);
        let state = model.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("409"));
        assert_eq!(state.recent_titles, ["x"]);
        assert_eq!(state.notes("reading"), Some("notes"));

        api.heal(Endpoint::Finish);
        model.finish("reading").await.unwrap();
        assert_eq!(model.snapshot().await.error, None);
    }

    #[tokio::test]
    async fn test_finish_unknown_title_rejected_locally() {
        let (api, model) = setup(MockApi::new());

        let err = model.finish("ghost").await.unwrap_err();
        assert!(matches!(err, ViewError::NotOngoing(ref t) if t == "ghost"));
        assert!(api.calls().is_empty());
        assert_eq!(
            model.snapshot().await.error.as_deref(),
            Some("Not an ongoing task: ghost")
        );
    }

    #[tokio::test]
    async fn test_set_notes_unknown_title() {
        let (_api, model) = setup(MockApi::new());
        assert!(model.set_notes("ghost", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_report_by_date_stores_text() {
        let (api, model) = setup(MockApi::new().with_report("<pre>2h</pre>"));

        model
            .report_by_date("2024-01-01", "2024-01-07", "summary")
            .await
            .unwrap();

        assert_eq!(model.snapshot().await.report.as_deref(), Some("<pre>2h</pre>"));
        assert_eq!(
            api.calls(),
            vec![Call::Report {
                day_start: "2024-01-01".to_string(),
                day_end: "2024-01-07".to_string(),
                view_type: "summary".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_report_by_date_empty_bound() {
        let (api, model) = setup(MockApi::new().with_report("old"));
        model.report_by_date("2024-01-01", "2024-01-01", "summary").await.unwrap();
        api.clear_calls();

        let err = model.report_by_date("", "2024-01-01", "summary").await.unwrap_err();
        assert!(matches!(err, ViewError::EmptyDateRange));
        assert!(api.calls().is_empty());

        let state = model.snapshot().await;
        assert_eq!(state.report.as_deref(), Some("old"));
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_report_by_date_empty_end() {
        let (api, model) = setup(MockApi::new().with_report("old"));
        model.report_by_date("2024-01-01", "2024-01-01", "summary").await.unwrap();
        api.clear_calls();

        let err = model.report_by_date("2024-01-01", "", "summary").await.unwrap_err();
        assert!(matches!(err, ViewError::EmptyDateRange));
        assert!(api.calls().is_empty());

        let state = model.snapshot().await;
        assert_eq!(state.report.as_deref(), Some("old"));
        assert_eq!(
            state.error.as_deref(),
            Some("Query start and end must be specified.")
        );
    }

    #[tokio::test]
    async fn test_report_failure_keeps_report() {
        let (api, model) = setup(MockApi::new().with_report("old"));
        model.report().await.unwrap();
        api.fail(Endpoint::Report, 400);

        model.report().await.unwrap_err();
        let state = model.snapshot().await;
        assert_eq!(state.report.as_deref(), Some("old"));
        assert_eq!(state.error.as_deref(), Some("400"));
    }

    #[tokio::test]
    async fn test_report_uses_query_fields() {
        let (api, model) = setup(MockApi::new());
        model
            .set_query(QueryParams {
                day_start: "2024-02-01".to_string(),
                day_end: "2024-02-29".to_string(),
                view_type: "dist".to_string(),
            })
            .await;

        model.report().await.unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::Report {
                day_start: "2024-02-01".to_string(),
                day_end: "2024-02-29".to_string(),
                view_type: "dist".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_quick_report_today() {
        let (api, model) = setup(MockApi::new());

        model.quick_report(0, Some(1)).await.unwrap();

        let state = model.snapshot().await;
        assert_eq!(state.query.day_start, "2024-03-15");
        assert_eq!(state.query.day_end, "2024-03-15");
        assert_eq!(
            api.calls(),
            vec![Call::Report {
                day_start: "2024-03-15".to_string(),
                day_end: "2024-03-15".to_string(),
                view_type: "daily_detail".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_quick_report_last_seven_days() {
        let (_api, model) = setup(MockApi::new());

        model.quick_report(7, Some(7)).await.unwrap();

        let query = model.snapshot().await.query;
        assert_eq!(query.day_start, "2024-03-08");
        assert_eq!(query.day_end, "2024-03-14");
    }

    #[tokio::test]
    async fn test_quick_report_zero_window() {
        let (api, model) = setup(MockApi::new());

        model.quick_report(3, Some(0)).await.unwrap_err();
        let state = model.snapshot().await;
        assert!(state.error.is_some());
        assert_eq!(state.query.day_start, "2024-03-15");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_item_detail_empty_is_none() {
        let (_api, model) = setup(MockApi::new().with_detail("reading", "reading\n  ch. 3"));

        model.item_detail("reading").await.unwrap();
        assert_eq!(
            model.snapshot().await.detail.as_deref(),
            Some("reading\n  ch. 3")
        );

        model.item_detail("never-done").await.unwrap();
        assert_eq!(model.snapshot().await.detail, None);
    }

    #[tokio::test]
    async fn test_item_detail_failure_keeps_detail() {
        let (api, model) = setup(MockApi::new().with_detail("a", "detail of a"));
        model.item_detail("a").await.unwrap();
        api.fail(Endpoint::Latest, 404);

        model.item_detail("a").await.unwrap_err();
        let state = model.snapshot().await;
        assert_eq!(state.detail.as_deref(), Some("detail of a"));
        assert_eq!(state.error.as_deref(), Some("404"));
    }

    #[tokio::test]
    async fn test_custom_view_type() {
        let api = Arc::new(MockApi::new());
        let model = ViewModel::with_view_type(api, clock(), "summary");
        assert_eq!(model.snapshot().await.query.view_type, "summary");
    }
}
