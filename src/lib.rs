pub mod config;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod output;
pub mod poller;

pub use config::{ConfigLoader, MonitorConfig, OutputFormat};
pub use error::{Error, Result};
pub use metrics::collector::SiteStats;
pub use metrics::snapshot::SiteSnapshot;
pub use monitor::{Monitor, MonitorState};
pub use output::RenderSink;
