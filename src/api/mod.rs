//! ticktock Backend API
//!
//! Typed access to the backend the view talks to.
//!
//! # Endpoints
//!
//! - `GET /api/recent/` - Recent task titles (JSON array)
//! - `GET /api/unfinished/` - Started but unfinished tasks (JSON)
//! - `POST /api/start/:title` - Start a task
//! - `POST /api/finish/:title` - Finish a task, raw notes as body
//! - `GET /api/report-by-date/:start/:end?view_type=` - Report text
//! - `GET /api/latest/:title` - Latest detail text of a task
//!
//! The view-model depends only on [`TicktockApi`]; [`ApiClient`] is the
//! `reqwest` implementation.

pub mod client;
pub mod dto;
pub mod error;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{ApiClient, ApiClientConfig, DEFAULT_API_BASE};
pub use dto::Task;
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

/// Operations offered by the ticktock backend
#[async_trait]
pub trait TicktockApi: Send + Sync {
    /// Titles of recently finished tasks, most recent first
    async fn recent_titles(&self) -> ApiResult<Vec<String>>;

    /// Tasks that have been started but not finished
    async fn unfinished(&self) -> ApiResult<Vec<Task>>;

    /// Start a task
    async fn start(&self, title: &str) -> ApiResult<()>;

    /// Finish a task, attaching `notes` verbatim
    async fn finish(&self, title: &str, notes: &str) -> ApiResult<()>;

    /// Report text for the inclusive day range
    async fn report_by_date(
        &self,
        day_start: &str,
        day_end: &str,
        view_type: &str,
    ) -> ApiResult<String>;

    /// Latest detail text of a task, empty when there is none
    async fn latest(&self, title: &str) -> ApiResult<String>;
}
