//! # ticktock
//!
//! Client-side view for a personal time tracker: list recent and ongoing
//! tasks, start and finish tasks, and fetch date-ranged reports from a
//! ticktock server.
//!
//! ## Modules
//!
//! - [`api`]: backend API trait and its `reqwest` client
//! - [`view`]: view state and the view-model driving it
//! - [`config`]: TOML config with environment overrides
//! - [`display`]: plain-text rendering of the view state
//! - [`prompt`]: interactive title picking and notes input
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ticktock::api::{ApiClient, ApiClientConfig};
//! use ticktock::view::{SystemClock, ViewModel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(ApiClient::new(ApiClientConfig::default())?);
//!     let view = ViewModel::new(api, Arc::new(SystemClock));
//!
//!     view.refresh().await?;
//!     view.start("code: ticktock").await?;
//!
//!     // Last seven days, ending yesterday
//!     view.quick_report(7, Some(7)).await?;
//!
//!     let state = view.snapshot().await;
//!     println!("{}", state.report.unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod display;
pub mod prompt;
pub mod view;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiClientConfig, ApiError, ApiResult, Task, TicktockApi};

pub use view::{
    Clock, FixedClock, OngoingEntry, QueryParams, SystemClock, ViewError, ViewModel, ViewResult,
    ViewState,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, ReportConfig};
