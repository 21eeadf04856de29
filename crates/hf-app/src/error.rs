//! Error types for the hf-app service layer.

use hf_flowtest::FlowTestError;
use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Record error: {0}")]
    Record(String),

    #[error("Failed to read record file: {path}")]
    RecordFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported record format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Record validation failed: {0}")]
    Validation(String),

    #[error("Flow test rejected: {0}")]
    Evaluation(#[from] FlowTestError),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Result not found: {0}")]
    ResultNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for hf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Errors caused by what the caller sent, as opposed to storage or I/O
    /// failures. An HTTP front end answers these with a 4xx status.
    pub fn is_client_error(&self) -> bool {
        if let AppError::Evaluation(e) = self {
            // Calibration is the server's configuration, not the request.
            return !matches!(e, FlowTestError::InvalidSetting { .. });
        }
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidInput(_)
                | AppError::UnsupportedFormat { .. }
                | AppError::ResultNotFound(_)
        )
    }
}

// Conversions from backend error types
impl From<hf_record::RecordError> for AppError {
    fn from(err: hf_record::RecordError) -> Self {
        match err {
            hf_record::RecordError::Validation(hf_record::ValidationError::FlowTest(e)) => {
                AppError::Evaluation(e)
            }
            hf_record::RecordError::Validation(e) => AppError::Validation(e.to_string()),
            e @ (hf_record::RecordError::Json(_) | hf_record::RecordError::Yaml(_)) => {
                AppError::InvalidInput(e.to_string())
            }
            other => AppError::Record(other.to_string()),
        }
    }
}

impl From<hf_record::ValidationError> for AppError {
    fn from(err: hf_record::ValidationError) -> Self {
        match err {
            hf_record::ValidationError::FlowTest(e) => AppError::Evaluation(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<hf_results::ResultsError> for AppError {
    fn from(err: hf_results::ResultsError) -> Self {
        match err {
            hf_results::ResultsError::ResultNotFound { result_id } => {
                AppError::ResultNotFound(result_id)
            }
            other => AppError::Results(other.to_string()),
        }
    }
}
