//! Reachability probing for the extraction service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default bound on a health check.
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Tri-state reachability of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Not yet known, or a check is in progress
    Checking,
    Online,
    Offline,
}

/// Time-stamped availability observation used to gate submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub status: ServiceStatus,
    pub checked_at: Option<DateTime<Utc>>,
}

impl Availability {
    /// Nothing observed yet.
    pub fn unknown() -> Self {
        Self {
            status: ServiceStatus::Checking,
            checked_at: None,
        }
    }

    pub fn observed(status: ServiceStatus, at: DateTime<Utc>) -> Self {
        Self {
            status,
            checked_at: Some(at),
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == ServiceStatus::Online
    }
}

impl Default for Availability {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Checks `GET {base_url}/health` within a bounded wait.
///
/// Re-running a probe cancels the one still in flight, so at most one timer
/// and one request are alive per probe.
#[derive(Clone)]
pub struct HealthProbe {
    http_client: Client,
    base_url: String,
    timeout: Duration,
    in_flight: Arc<Mutex<InFlight>>,
}

/// The probe currently running, tagged with its sequence number.
#[derive(Default)]
struct InFlight {
    seq: u64,
    token: Option<CancellationToken>,
}

impl HealthProbe {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            timeout: DEFAULT_HEALTH_TIMEOUT,
            in_flight: Arc::new(Mutex::new(InFlight::default())),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe the service and return a fresh observation.
    ///
    /// A probe superseded by a newer one reports `Checking`.
    pub async fn probe(&self) -> Availability {
        let token = CancellationToken::new();
        let seq = {
            let mut slot = self.in_flight.lock().await;
            if let Some(previous) = slot.token.replace(token.clone()) {
                previous.cancel();
            }
            slot.seq += 1;
            slot.seq
        };

        let status = self.check(&token).await;

        let mut slot = self.in_flight.lock().await;
        if slot.seq == seq {
            slot.token = None;
        }
        drop(slot);

        Availability::observed(status, Utc::now())
    }

    async fn check(&self, cancel: &CancellationToken) -> ServiceStatus {
        let url = format!("{}/health", self.base_url);
        debug!(url = %url, timeout_secs = self.timeout.as_secs(), "Probing extraction service");

        tokio::select! {
            result = self.http_client.get(&url).send() => match result {
                Ok(resp) if resp.status().is_success() => ServiceStatus::Online,
                Ok(resp) => {
                    warn!(status = %resp.status(), "Health check returned non-success status");
                    ServiceStatus::Offline
                }
                Err(e) => {
                    warn!(error = %e, "Health check request failed");
                    ServiceStatus::Offline
                }
            },
            _ = tokio::time::sleep(self.timeout) => {
                cancel.cancel();
                warn!(timeout_secs = self.timeout.as_secs(), "Health check timed out");
                ServiceStatus::Offline
            }
            _ = cancel.cancelled() => {
                debug!("Health check superseded");
                ServiceStatus::Checking
            }
        }
    }
}
