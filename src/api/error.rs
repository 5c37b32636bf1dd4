//! API Error Types
//!
//! Errors raised while talking to the ticktock backend. The `Display` text
//! is what ends up in the view's error slot, so a non-success status renders
//! as the bare status code.

use thiserror::Error;

/// Errors that can occur when calling the backend API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("{0}")]
    Status(u16),

    /// Connection, timeout or body-read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Configured base URL cannot be used
    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// HTTP status code, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status(code) => Some(*code),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
