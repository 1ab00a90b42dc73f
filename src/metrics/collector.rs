use crate::metrics::snapshot::SiteSnapshot;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Marker size recorded for attempts that never produced a body.
pub const FAILED_SIZE: i64 = -1;

/// Aggregated request statistics for one monitored URL.
///
/// All fields live behind a single lock so a snapshot never observes a
/// half-applied update.
pub struct SiteStats {
    url: String,
    interval: Duration,
    inner: Mutex<StatsInner>,
}

#[derive(Debug, Default)]
struct StatsInner {
    min_duration: Duration,
    avg_duration: Duration,
    max_duration: Duration,
    min_size: i64,
    avg_size: i64,
    max_size: i64,
    success_count: u64,
    total_count: u64,
    /// `None` until the first attempt completes.
    last_request_at: Option<Instant>,
}

impl SiteStats {
    pub fn new(url: impl Into<String>, interval: Duration) -> Self {
        Self {
            url: url.into(),
            interval,
            inner: Mutex::new(StatsInner::default()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// True once `interval` has passed since the last completed attempt.
    pub async fn is_ready_for_request(&self) -> bool {
        match self.ready_at().await {
            Some(at) => Instant::now() >= at,
            None => true,
        }
    }

    /// When the readiness gate opens, or `None` if no attempt has completed yet.
    pub async fn ready_at(&self) -> Option<Instant> {
        let inner = self.inner.lock().await;
        inner.last_request_at.map(|last| last + self.interval)
    }

    /// Folds one completed attempt into the statistics.
    ///
    /// Failures only bump `total_count`; duration and size aggregates are
    /// computed from successful attempts alone.
    pub async fn update_stats(&self, duration: Duration, size: i64, success: bool) {
        let mut inner = self.inner.lock().await;

        inner.total_count += 1;
        if success {
            inner.success_count += 1;
            let n = inner.success_count;

            if n == 1 {
                inner.min_duration = duration;
                inner.max_duration = duration;
                inner.min_size = size;
                inner.max_size = size;
            } else {
                inner.min_duration = inner.min_duration.min(duration);
                inner.max_duration = inner.max_duration.max(duration);
                inner.min_size = inner.min_size.min(size);
                inner.max_size = inner.max_size.max(size);
            }

            inner.avg_duration = running_mean_duration(inner.avg_duration, duration, n);
            inner.avg_size = running_mean_size(inner.avg_size, size, n);
        }

        inner.last_request_at = Some(Instant::now());
    }

    /// Makes the next poll immediately eligible.
    pub async fn force_ready(&self) {
        self.inner.lock().await.last_request_at = None;
    }

    pub async fn snapshot(&self) -> SiteSnapshot {
        let inner = self.inner.lock().await;
        SiteSnapshot {
            url: self.url.clone(),
            min_duration: inner.min_duration,
            avg_duration: inner.avg_duration,
            max_duration: inner.max_duration,
            min_size: inner.min_size,
            avg_size: inner.avg_size,
            max_size: inner.max_size,
            success_count: inner.success_count,
            total_count: inner.total_count,
        }
    }
}

// `n` is the success count including the new value, so `n - 1` weights the
// previous average.
fn running_mean_duration(avg: Duration, value: Duration, n: u64) -> Duration {
    let n = u128::from(n);
    let nanos = (avg.as_nanos() * (n - 1) + value.as_nanos()) / n;
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn running_mean_size(avg: i64, value: i64, n: u64) -> i64 {
    let n = i128::from(n);
    ((i128::from(avg) * (n - 1) + i128::from(value)) / n) as i64
}
