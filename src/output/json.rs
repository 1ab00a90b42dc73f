use super::RenderSink;
use crate::error::Result;
use crate::metrics::snapshot::SiteSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Writes each frame as a single line of JSON, for piping into other tools.
pub struct JsonOutput {
    out: Box<dyn Write + Send + Sync>,
}

#[derive(Serialize)]
struct Frame<'a> {
    generated_at: DateTime<Utc>,
    #[serde(rename = "final")]
    is_final: bool,
    sites: &'a [SiteSnapshot],
}

impl JsonOutput {
    pub fn new(out: Box<dyn Write + Send + Sync>) -> Self {
        Self { out }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

#[async_trait]
impl RenderSink for JsonOutput {
    async fn render(&mut self, rows: &[SiteSnapshot], clear_screen_first: bool) -> Result<()> {
        // A stream of lines has nothing to clear; the hint only marks the last frame.
        let frame = Frame {
            generated_at: Utc::now(),
            is_final: !clear_screen_first,
            sites: rows,
        };

        serde_json::to_writer(&mut self.out, &frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
