//! View Errors
//!
//! Everything that can go wrong in a view-model operation. The rendered
//! message is what lands in [`ViewState::error`](super::ViewState::error).

use thiserror::Error;

use crate::api::ApiError;

/// View-model error types
#[derive(Error, Debug)]
pub enum ViewError {
    /// Start requested without a title
    #[error("Empty title")]
    EmptyTitle,

    /// Report requested with a missing bound
    #[error("Query start and end must be specified.")]
    EmptyDateRange,

    /// Quick report with a zero-day window
    #[error("Report window must cover at least one day")]
    EmptyWindow,

    /// Day arithmetic left the representable calendar
    #[error("Day offset out of range: {0}")]
    OffsetOutOfRange(u32),

    /// Report window ran past the representable calendar
    #[error("Report window out of range: {0} days")]
    WindowOutOfRange(u32),

    /// Title is not among the ongoing tasks
    #[error("Not an ongoing task: {0}")]
    NotOngoing(String),

    /// Backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ViewError {
    /// Whether the error was raised locally, before any request was sent
    pub fn is_local(&self) -> bool {
        !matches!(self, ViewError::Api(_))
    }
}

/// Result type for view-model operations
pub type ViewResult<T> = Result<T, ViewError>;
