//! Seam between the submission logic and the transport.

use async_trait::async_trait;

use crate::error::Result;
use crate::health::Availability;
use crate::request::ExtractionRequest;
use crate::types::RawResponse;

/// Something that can check the extraction service and run extractions.
///
/// Implemented by [`ExtractorClient`](crate::ExtractorClient); tests provide
/// in-memory doubles.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Observe whether the service is reachable right now.
    async fn check_health(&self) -> Availability;

    /// Send one extraction request and return the endpoint's response.
    async fn extract(&self, request: ExtractionRequest) -> Result<RawResponse>;
}
