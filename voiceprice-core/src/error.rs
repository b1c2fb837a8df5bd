//! Core error types for `VoicePrice`.

use thiserror::Error;

/// Core error type for `VoicePrice` domain operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The quantity typed by the user is not a positive integer.
    #[error("Введите корректное значение.")]
    InvalidQuantity(String),

    /// Unknown service name.
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns true if this error comes from user input rather than the backend.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidQuantity(_) | Self::UnknownService(_))
    }
}
