//! # AppError
//!
//! Centralized error handling for Retro-Board.
//! Every failure of a board operation is one of these three kinds.

use thiserror::Error;

/// The primary error type for all rb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Board). Malformed ids land here too.
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Missing required input or an out-of-range index.
    #[error("{0}")]
    ValidationError(String),

    /// Persistence failure (e.g., DB down, write rejected)
    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn board_not_found(id: impl Into<String>) -> Self {
        AppError::NotFound("Board".to_string(), id.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Storage(format!("{err:#}"))
    }
}

/// A specialized Result type for Retro-Board logic.
pub type Result<T> = std::result::Result<T, AppError>;
