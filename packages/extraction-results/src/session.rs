//! One user's working session against the extraction service.
//!
//! The session owns three pieces of state: the last observed availability,
//! a single in-flight gate, and the current outcome. A new submission
//! replaces the previous outcome wholesale; nothing is merged or queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use extractor_client::{
    Availability, DocumentType, ExtractionOptions, ExtractionRequest, Extractor, FileBlob,
    ServiceStatus,
};

use crate::error::{SubmitError, SubmitResult};
use crate::normalize::normalize;
use crate::outcome::ExtractionOutcome;

/// A finished submission and the type it was submitted as.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedSubmission {
    pub document_type: DocumentType,
    pub outcome: ExtractionOutcome,
    pub completed_at: DateTime<Utc>,
}

/// Submission state over an [`Extractor`].
pub struct ExtractionSession<E> {
    extractor: E,
    availability: RwLock<Availability>,
    in_flight: AtomicBool,
    current: RwLock<Option<Arc<CompletedSubmission>>>,
}

impl<E: Extractor> ExtractionSession<E> {
    /// Start a session. Availability is `Checking` until the first refresh.
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            availability: RwLock::new(Availability::unknown()),
            in_flight: AtomicBool::new(false),
            current: RwLock::new(None),
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Probe the service and store the observation.
    pub async fn refresh_availability(&self) -> Availability {
        let observed = self.extractor.check_health().await;
        info!(status = ?observed.status, "Service availability refreshed");
        *self.availability.write().await = observed;
        observed
    }

    /// Last stored observation.
    pub async fn availability(&self) -> Availability {
        *self.availability.read().await
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The outcome of the last successful submission, if any.
    pub async fn current_outcome(&self) -> Option<Arc<CompletedSubmission>> {
        self.current.read().await.clone()
    }

    /// Submit `files` and store the normalized outcome.
    ///
    /// Rejected without contacting the service when availability is not
    /// `Online` or another submission holds the gate. Once started, the
    /// previous outcome is discarded even if this submission fails.
    pub async fn submit(
        &self,
        files: Vec<FileBlob>,
        options: ExtractionOptions,
    ) -> SubmitResult<Arc<CompletedSubmission>> {
        let status = self.availability.read().await.status;
        if status != ServiceStatus::Online {
            return Err(SubmitError::ServiceUnavailable { status });
        }

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmitError::Busy)?;

        let request = ExtractionRequest::build(files, options)?;
        let requested = request.filenames();

        *self.current.write().await = None;

        let raw = match self.extractor.extract(request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Submission failed");
                return Err(e.into());
            }
        };

        let outcome = normalize(raw, &requested);
        info!(
            document_type = %options.document_type,
            total = outcome.total_files,
            processed = outcome.processed_files,
            failed = outcome.failed_files,
            "Submission completed"
        );

        let completed = Arc::new(CompletedSubmission {
            document_type: options.document_type,
            outcome,
            completed_at: Utc::now(),
        });
        *self.current.write().await = Some(completed.clone());
        Ok(completed)
    }
}

/// Holds the in-flight flag and releases it on drop, including on error
/// and cancellation paths.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
