//! Service reachability check

use std::future::Future;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{info, warn};

use extractor_client::{ExtractorClient, ServiceStatus};

use crate::render;

/// Probe once, or every `watch` interval until interrupted.
pub async fn run(client: &ExtractorClient, watch: Option<Duration>) -> Result<()> {
    let Some(every) = watch else {
        let availability = client.probe().await;
        println!("{}", render::availability(client.base_url(), &availability));
        if availability.status != ServiceStatus::Online {
            bail!("extraction service is not reachable at {}", client.base_url());
        }
        return Ok(());
    };

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
        }
    };
    watch_until(client, every, interrupted).await;
    Ok(())
}

/// Re-probe every `every` and print status changes until `shutdown` resolves.
///
/// `shutdown` is raced against the probe as well as the ticker.
pub async fn watch_until<F>(client: &ExtractorClient, every: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    info!(interval_secs = every.as_secs(), "Watching service availability");
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(every);
    let mut last = None;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let availability = tokio::select! {
                    availability = client.probe() => availability,
                    _ = &mut shutdown => break,
                };
                if last != Some(availability.status) {
                    println!("{}", render::availability(client.base_url(), &availability));
                    last = Some(availability.status);
                }
            }
            _ = &mut shutdown => break,
        }
    }
    info!("Stopped watching");
}
