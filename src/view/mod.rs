//! ticktock View
//!
//! Client-side view of the time tracker.
//!
//! ## Architecture
//!
//! - **ViewState**: recent titles, ongoing tasks with local notes, report
//!   query, report text, task detail and the last error
//! - **ViewModel**: user actions; each one calls the backend and updates
//!   the state
//! - **Clock**: source of "today" for date-derived report queries

mod clock;
mod error;
mod model;
mod state;

pub use clock::{days_back_range, format_day, quick_range, Clock, FixedClock, SystemClock, DAY_FORMAT};
pub use error::{ViewError, ViewResult};
pub use model::ViewModel;
pub use state::{OngoingEntry, QueryParams, ViewState, DEFAULT_VIEW_TYPE};
