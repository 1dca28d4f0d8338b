//! Client for the PDF document extractor service.
//!
//! The service parses scanned permit documents (SKTT, EVLN, ITAS, ITK,
//! Notifikasi, DKPTKA) and returns their fields as JSON. This crate only
//! speaks the HTTP contract; it does no PDF work itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use extractor_client::{DocumentType, ExtractionOptions, ExtractionRequest, ExtractorClient, FileBlob};
//!
//! let client = ExtractorClient::new("http://localhost:7860");
//!
//! if client.probe().await.is_online() {
//!     let files = vec![FileBlob::from_path("scan.pdf")?];
//!     let request = ExtractionRequest::build(files, ExtractionOptions::new(DocumentType::Sktt))?;
//!     let response = client.send(request).await?;
//! }
//! ```

pub mod error;
pub mod health;
pub mod request;
pub mod traits;
pub mod types;

pub use error::{ClientError, Result, NO_RESPONSE_BODY};
pub use health::{Availability, HealthProbe, ServiceStatus, DEFAULT_HEALTH_TIMEOUT};
pub use request::{Endpoint, ExtractionRequest, FileBlob, FormPart};
pub use traits::Extractor;
pub use types::{
    DocumentType, DocumentTypeInfo, ExtractionOptions, PlainResponse, RawFieldMap, RawResponse,
    RenameResponse, ResultItem, ResultStatus, ServiceInfo, UnknownDocumentType,
};

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use types::DocumentTypesResponse;

/// Default address of the extraction service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:7860";

/// Default hard limit on one extraction request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extraction service client.
#[derive(Clone)]
pub struct ExtractorClient {
    http_client: Client,
    base_url: String,
    request_timeout: Duration,
    probe: HealthProbe,
}

impl ExtractorClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    /// Create a client that reuses an existing reqwest client.
    pub fn with_http_client(http_client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            probe: HealthProbe::new(http_client.clone(), base_url.clone()),
            http_client,
            base_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the bound on health checks.
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.probe = self.probe.with_timeout(timeout);
        self
    }

    /// Set the hard limit on extraction requests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Check `GET /health`. Any failure, non-2xx or timeout reads as offline.
    pub async fn probe(&self) -> Availability {
        self.probe.probe().await
    }

    /// Send an extraction request with a fresh cancellation token.
    pub async fn send(&self, request: ExtractionRequest) -> Result<RawResponse> {
        self.send_with_cancel(request, CancellationToken::new()).await
    }

    /// Send an extraction request, racing it against the request timeout.
    ///
    /// When the timer wins, `cancel` is cancelled and the in-flight call is
    /// dropped. Cancelling `cancel` from outside aborts the call as well.
    pub async fn send_with_cancel(
        &self,
        request: ExtractionRequest,
        cancel: CancellationToken,
    ) -> Result<RawResponse> {
        let endpoint = request.endpoint;
        let url = format!("{}{}", self.base_url, endpoint.path());
        let file_count = request.filenames().len();
        let form = request.into_form()?;

        info!(url = %url, file_count, "Submitting files for extraction");

        let call = async {
            let resp = self
                .http_client
                .post(&url)
                .multipart(form)
                .send()
                .await
                .map_err(ClientError::from_transport)?;

            match endpoint {
                Endpoint::Extract => read_json(resp).await.map(RawResponse::Plain),
                Endpoint::ExtractWithRename => read_json(resp).await.map(RawResponse::Rename),
            }
        };

        let result = with_deadline(&cancel, self.request_timeout, call).await;
        match &result {
            Ok(_) => debug!(url = %url, "Extraction response received"),
            Err(e) => warn!(url = %url, error = %e, "Extraction request failed"),
        }
        result
    }

    /// Fetch the service banner from `GET /`.
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        self.get_json("/").await
    }

    /// Fetch the supported document types from `GET /document-types`.
    pub async fn document_types(&self) -> Result<Vec<DocumentTypeInfo>> {
        let resp: DocumentTypesResponse = self.get_json("/document-types").await?;
        Ok(resp.supported_types)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let call = async {
            let resp = self
                .http_client
                .get(&url)
                .send()
                .await
                .map_err(ClientError::from_transport)?;
            read_json(resp).await
        };
        with_deadline(&CancellationToken::new(), self.probe.timeout(), call).await
    }
}

#[async_trait]
impl Extractor for ExtractorClient {
    async fn check_health(&self) -> Availability {
        self.probe().await
    }

    async fn extract(&self, request: ExtractionRequest) -> Result<RawResponse> {
        self.send(request).await
    }
}

/// Race `call` against a timer; the loser is dropped.
async fn with_deadline<T, F>(cancel: &CancellationToken, limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        result = call => result,
        _ = tokio::time::sleep(limit) => {
            cancel.cancel();
            Err(ClientError::Timeout { after: limit })
        }
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
    }
}

/// Classify a response: non-2xx becomes `Http`, unparseable bodies `Decode`.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp
            .text()
            .await
            .ok()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| NO_RESPONSE_BODY.to_string());
        return Err(ClientError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = resp.bytes().await.map_err(ClientError::from_transport)?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
