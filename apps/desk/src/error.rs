//! # Application Error Type
//!
//! Folds every library error into one type with a stable machine-readable
//! code next to the human-readable message. The code is what scripts match
//! on; the message is free to improve between releases.

use thiserror::Error;

use exim_core::error::{ComputationError, ValidationError};

/// Top-level application error.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Computation(#[from] ComputationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] exim_client::ClientError),

    #[error(transparent)]
    Render(#[from] exim_render::RenderError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {path}: {reason}")]
    BadInput { path: String, reason: String },

    #[error("background task failed: {0}")]
    Task(String),

    #[error("cancelled")]
    Cancelled,
}

impl AppError {
    /// Stable error code for scripting and log aggregation.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Computation(_) => "COMPUTATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Client(_) => "API_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::BadInput { .. } => "BAD_INPUT",
            AppError::Task(_) => "TASK_ERROR",
            AppError::Cancelled => "CANCELLED",
        }
    }
}

/// Result alias for application commands.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use exim_core::error::ItemField;

    #[test]
    fn test_codes_are_stable() {
        let err: AppError = ComputationError::NotFinite {
            field: ItemField::Quantity,
            item: 0,
        }
        .into();
        assert_eq!(err.code(), "COMPUTATION_ERROR");
        assert_eq!(AppError::Cancelled.code(), "CANCELLED");
    }

    #[test]
    fn test_computation_message_passes_through() {
        let err: AppError = ComputationError::NoItems.into();
        assert!(!err.to_string().is_empty());
    }
}
