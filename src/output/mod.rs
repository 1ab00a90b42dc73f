use crate::config::OutputFormat;
use crate::error::Result;
use crate::metrics::snapshot::SiteSnapshot;
use async_trait::async_trait;

pub mod console;
pub mod json;

/// Receives one frame of per-site statistics at a time.
#[async_trait]
pub trait RenderSink: Send + Sync {
    /// `clear_screen_first` is set for periodic refreshes and unset for the
    /// final frame, which must stay visible.
    async fn render(&mut self, rows: &[SiteSnapshot], clear_screen_first: bool) -> Result<()>;
}

pub fn sink_for(format: OutputFormat) -> Box<dyn RenderSink> {
    match format {
        OutputFormat::Table => Box::new(console::ConsoleOutput::default()),
        OutputFormat::Json => Box::new(json::JsonOutput::default()),
    }
}
