use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MonitorConfig {
    /// URLs to poll, in the order they are rendered
    #[serde(default)]
    #[validate(length(min = 1))]
    pub urls: Vec<String>,

    /// Minimum gap between the end of one request and the start of the next
    #[serde(default = "default_interval")]
    #[validate(range(min = 1))]
    pub interval_secs: u64,

    #[serde(default = "default_timeout")]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,

    /// Table refresh period
    #[serde(default = "default_refresh")]
    #[validate(range(min = 100))]
    pub refresh_ms: u64,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_user_agent")]
    #[validate(length(min = 1))]
    pub user_agent: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            interval_secs: default_interval(),
            timeout_secs: default_timeout(),
            refresh_ms: default_refresh(),
            format: OutputFormat::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl MonitorConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered table, redrawn in place
    #[default]
    Table,
    /// One JSON object per frame
    Json,
}

fn default_interval() -> u64 {
    5
}

fn default_timeout() -> u64 {
    10
}

fn default_refresh() -> u64 {
    1000
}

fn default_user_agent() -> String {
    concat!("sitewatch/", env!("CARGO_PKG_VERSION")).to_string()
}
