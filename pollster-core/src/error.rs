//! Error types for polling

use thiserror::Error;

/// Failure of a single poll attempt
///
/// These are routed to the poller's `on_error` hook and never returned to
/// the code that started the poller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or no response was received
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived with a non-success status
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text, possibly empty
        body: String,
    },

    /// A success response whose body is not valid JSON
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code, when a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors raised synchronously when a poller cannot be started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollerError {
    #[error("poll url cannot be empty")]
    EmptyUrl,

    #[error("poll delay must be greater than zero")]
    InvalidDelay,

    #[error("no async runtime available to schedule polls on")]
    NoRuntime,
}
