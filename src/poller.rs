use crate::metrics::collector::{FAILED_SIZE, SiteStats};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Result of one GET attempt, as fed into [`SiteStats::update_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub duration: Duration,
    pub size: i64,
    pub success: bool,
}

impl PollOutcome {
    fn failed(duration: Duration) -> Self {
        Self {
            duration,
            size: FAILED_SIZE,
            success: false,
        }
    }
}

/// Polls a single URL until cancelled, one request at a time.
pub struct Poller {
    stats: Arc<SiteStats>,
    client: Client,
}

impl Poller {
    pub fn new(stats: Arc<SiteStats>, client: Client) -> Self {
        Self { stats, client }
    }

    /// Runs until `cancel` fires. Cancellation is only observed between
    /// requests, so an in-flight request always completes and is recorded.
    pub async fn run(self, cancel: CancellationToken) {
        log::debug!("Poller started for {}", self.stats.url());

        loop {
            if cancel.is_cancelled() {
                break;
            }

            if !self.stats.is_ready_for_request().await {
                let wake_at = self.stats.ready_at().await.unwrap_or_else(Instant::now);
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = sleep_until(wake_at) => continue,
                }
            }

            self.poll_once().await;
        }

        log::debug!("Poller stopped for {}", self.stats.url());
    }

    /// Issues one request and records its outcome.
    pub async fn poll_once(&self) -> PollOutcome {
        let outcome = self.fetch().await;
        self.stats
            .update_stats(outcome.duration, outcome.size, outcome.success)
            .await;
        outcome
    }

    async fn fetch(&self) -> PollOutcome {
        let url = self.stats.url();
        let start = Instant::now();

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Request to {} failed: {}", url, e);
                return PollOutcome::failed(start.elapsed());
            }
        };

        let status = response.status();

        // Duration covers draining the whole body, not just the headers.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                log::debug!("Reading body from {} failed: {}", url, e);
                return PollOutcome::failed(start.elapsed());
            }
        };
        let duration = start.elapsed();

        let success = (200..400).contains(&status.as_u16());
        log::debug!(
            "{} -> {} ({} bytes in {:?})",
            url,
            status,
            body.len(),
            duration
        );

        PollOutcome {
            duration,
            size: i64::try_from(body.len()).unwrap_or(i64::MAX),
            success,
        }
    }
}
