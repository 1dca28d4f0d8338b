//! Testing utilities including mock implementations.
//!
//! Useful for exercising submission logic without a running extraction
//! service.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use extractor_client::request::DOCUMENT_TYPE_FIELD;
use extractor_client::{
    Availability, ClientError, ExtractionRequest, Extractor, RawResponse, Result, ServiceStatus,
};

/// A mock extractor with scripted responses.
///
/// Responses are returned in the order they were queued. When the queue is
/// empty, `extract` fails with a network error.
#[derive(Clone, Default)]
pub struct MockExtractor {
    /// Status reported by every health check
    status: Arc<RwLock<Option<ServiceStatus>>>,

    /// Scripted extraction responses
    responses: Arc<RwLock<VecDeque<Result<RawResponse>>>>,

    /// Artificial latency applied to `extract`
    delay: Option<Duration>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockExtractorCall>>>,
}

/// Record of a call made to the mock extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum MockExtractorCall {
    CheckHealth,
    Extract {
        filenames: Vec<String>,
        rename: bool,
        document_type: Option<String>,
    },
}

impl MockExtractor {
    /// Create a mock that reports `Online`.
    pub fn new() -> Self {
        Self::default().with_status(ServiceStatus::Online)
    }

    /// Set the status reported by health checks.
    pub fn with_status(self, status: ServiceStatus) -> Self {
        self.set_status(status);
        self
    }

    /// Queue a response for the next `extract` call.
    pub fn with_response(self, response: RawResponse) -> Self {
        self.responses.write().unwrap().push_back(Ok(response));
        self
    }

    /// Queue an error for the next `extract` call.
    pub fn with_error(self, error: ClientError) -> Self {
        self.responses.write().unwrap().push_back(Err(error));
        self
    }

    /// Delay every `extract` call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Change the reported status after construction.
    pub fn set_status(&self, status: ServiceStatus) {
        *self.status.write().unwrap() = Some(status);
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<MockExtractorCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of `extract` calls made.
    pub fn extract_count(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MockExtractorCall::Extract { .. }))
            .count()
    }

    /// Clear recorded calls.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn check_health(&self) -> Availability {
        self.calls.write().unwrap().push(MockExtractorCall::CheckHealth);
        match *self.status.read().unwrap() {
            Some(status) => Availability::observed(status, Utc::now()),
            None => Availability::unknown(),
        }
    }

    async fn extract(&self, request: ExtractionRequest) -> Result<RawResponse> {
        self.calls.write().unwrap().push(MockExtractorCall::Extract {
            filenames: request.filenames(),
            rename: request.rename_enabled(),
            document_type: request.text_field(DOCUMENT_TYPE_FIELD).map(str::to_string),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ClientError::Network {
                    message: "no scripted response".to_string(),
                })
            })
    }
}
