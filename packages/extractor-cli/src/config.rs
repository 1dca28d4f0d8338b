use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use extractor_client::{ExtractorClient, DEFAULT_BASE_URL};

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub extractor_url: String,
    pub health_timeout: Duration,
    pub request_timeout: Duration,
    pub export_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            extractor_url: lookup("EXTRACTOR_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            health_timeout: Duration::from_secs(
                lookup("EXTRACTOR_HEALTH_TIMEOUT_SECS")
                    .unwrap_or_else(|| "5".to_string())
                    .parse()
                    .context("EXTRACTOR_HEALTH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            request_timeout: Duration::from_secs(
                lookup("EXTRACTOR_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("EXTRACTOR_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            export_dir: lookup("EXTRACTOR_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    /// Client configured with these settings.
    pub fn client(&self) -> ExtractorClient {
        ExtractorClient::new(self.extractor_url.clone())
            .with_health_timeout(self.health_timeout)
            .with_request_timeout(self.request_timeout)
    }
}
