//! Error types for the extractor client.

use std::time::Duration;

use thiserror::Error;

/// Result type for extractor client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Placeholder used when a failed response carries no readable body.
pub const NO_RESPONSE_BODY: &str = "(no response body)";

/// Classified failure of a call to the extraction service.
///
/// Every transport path ends in one of these; nothing escapes the client
/// as a panic.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be assembled (e.g. no files selected)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The deadline elapsed before the service answered
    #[error("request timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    /// No reachable transport (DNS, connection refused, offline)
    #[error("network error: {message}")]
    Network { message: String },

    /// The service answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The service answered 2xx but the body was not the expected JSON
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The call was cancelled by its token before completing
    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Message suitable for showing to the person who submitted the files.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::InvalidRequest(reason) => format!("Cannot submit: {}.", reason),
            ClientError::Timeout { after } => format!(
                "The extraction service did not respond within {} seconds. \
                 Try again with fewer or smaller files.",
                after.as_secs()
            ),
            ClientError::Network { .. } => {
                "Could not reach the extraction service. Check your network connection and the service URL."
                    .to_string()
            }
            ClientError::Http { status, body } => {
                format!("The extraction service returned HTTP {}: {}", status, body)
            }
            ClientError::Decode(detail) => format!(
                "The extraction service sent a response that could not be read ({}).",
                detail
            ),
            ClientError::Cancelled => "The request was cancelled.".to_string(),
        }
    }

    /// Classify a reqwest failure that happened before a status was available.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidRequest(err.to_string())
        } else {
            ClientError::Network {
                message: err.to_string(),
            }
        }
    }
}
