use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder shown for a statistic that has no data yet.
pub const NOT_AVAILABLE: &str = "n/a";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub url: String,
    #[serde(rename = "min_duration_ms", with = "millis")]
    pub min_duration: Duration,
    #[serde(rename = "avg_duration_ms", with = "millis")]
    pub avg_duration: Duration,
    #[serde(rename = "max_duration_ms", with = "millis")]
    pub max_duration: Duration,
    pub min_size: i64,
    pub avg_size: i64,
    pub max_size: i64,
    pub success_count: u64,
    pub total_count: u64,
}

impl SiteSnapshot {
    /// Display cells in table column order: URL, min/avg/max duration,
    /// min/avg/max size, then `success/total`.
    pub fn fields(&self) -> Vec<String> {
        vec![
            self.url.clone(),
            format_duration(self.min_duration),
            format_duration(self.avg_duration),
            format_duration(self.max_duration),
            format_size(self.min_size),
            format_size(self.avg_size),
            format_size(self.max_size),
            format!("{}/{}", self.success_count, self.total_count),
        ]
    }
}

// A zero duration or non-positive size is indistinguishable from "no data".
fn format_duration(d: Duration) -> String {
    if d.is_zero() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2} ms", d.as_millis() as f64)
}

fn format_size(bytes: i64) -> String {
    if bytes <= 0 {
        return NOT_AVAILABLE.to_string();
    }
    format!("{} B", bytes)
}

/// Durations as fractional milliseconds, e.g. `150.25`.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(d.as_nanos() as f64 / 1_000_000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(deserializer)?;
        if !ms.is_finite() || ms < 0.0 {
            return Err(serde::de::Error::custom(format!("invalid duration: {ms} ms")));
        }
        Ok(Duration::from_nanos((ms * 1_000_000.0).round() as u64))
    }
}
