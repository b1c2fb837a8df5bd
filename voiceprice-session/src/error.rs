//! Session error types.

use thiserror::Error;
use voiceprice_fetch::FetchError;

/// Errors that can occur while setting up a session.
///
/// Calculation and ingestion failures are not errors at this level: they
/// are rendered through the view and reported as a status.
#[derive(Debug, Error)]
pub enum SessionError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend client could not be created.
    #[error("Backend client error: {0}")]
    Fetch(#[from] FetchError),
}
