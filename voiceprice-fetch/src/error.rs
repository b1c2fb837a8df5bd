//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for one logical backend call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The caller cancelled the call. Never shown to the visitor.
    #[error("Request cancelled")]
    Cancelled,

    /// A single attempt exceeded its timeout.
    #[error("Attempt {attempt} timed out after {after:?}")]
    Timeout {
        /// Attempt index, starting at 1.
        attempt: u32,
        /// Timeout that expired.
        after: Duration,
    },

    /// The backend answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The request could not be completed.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// All attempts failed.
    #[error("{last} (after {attempts} attempts)")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Failure of the final attempt.
        last: Box<FetchError>,
    },

    /// Invalid response from the backend.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] voiceprice_core::CoreError),
}

impl FetchError {
    /// Returns true if the call was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::Exhausted { last, .. } => last.is_cancelled(),
            _ => false,
        }
    }

    /// Returns true if this failure is a timeout of any kind.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Transport(TransportError::Timeout)
        )
    }

    /// Returns true if another attempt might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Status { .. } => true,
            Self::Transport(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns the HTTP status of the final failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Exhausted { last, .. } => last.status(),
            _ => None,
        }
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// Error raised by an [`HttpTransport`](crate::host::HttpTransport).
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Could not connect.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The transport's own timeout fired.
    #[error("Request timed out")]
    Timeout,

    /// Request error after connecting.
    #[error("Request error: {0}")]
    Request(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),
}

impl TransportError {
    /// Returns true if retrying the same request makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout | Self::Request(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
