//! Typed errors for submission and export.

use extractor_client::{ClientError, ServiceStatus};
use thiserror::Error;

/// Why a submission did not produce an outcome.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The last health observation was not `Online`
    #[error("extraction service unavailable ({status:?})")]
    ServiceUnavailable { status: ServiceStatus },

    /// Another submission is still in flight
    #[error("a submission is already in progress")]
    Busy,

    /// The request failed at the client boundary
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl SubmitError {
    /// Message suitable for the person who submitted the files.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::ServiceUnavailable { status: ServiceStatus::Checking } => {
                "The extraction service has not been checked yet. Wait for the health check to finish."
                    .to_string()
            }
            SubmitError::ServiceUnavailable { .. } => {
                "The extraction service is offline. Retry the connection check before submitting."
                    .to_string()
            }
            SubmitError::Busy => {
                "A submission is already being processed. Wait for it to finish.".to_string()
            }
            SubmitError::Client(e) => e.user_message(),
        }
    }
}

/// Serialization failure while building an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for submissions.
pub type SubmitResult<T> = std::result::Result<T, SubmitError>;

/// Result type alias for exports.
pub type ExportResult<T> = std::result::Result<T, ExportError>;
