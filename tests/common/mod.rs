//! Helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use sitewatch::{MonitorConfig, RenderSink, SiteSnapshot};
use std::sync::{Arc, Mutex};

/// One `render` call as seen by the sink.
#[derive(Debug, Clone)]
pub struct Frame {
    pub rows: Vec<SiteSnapshot>,
    pub clear_screen_first: bool,
}

/// Sink that keeps every frame in memory instead of drawing it.
#[derive(Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingSink {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderSink for RecordingSink {
    async fn render(&mut self, rows: &[SiteSnapshot], clear_screen_first: bool) -> sitewatch::Result<()> {
        self.frames.lock().unwrap().push(Frame {
            rows: rows.to_vec(),
            clear_screen_first,
        });
        Ok(())
    }
}

pub fn config_for(urls: &[String]) -> MonitorConfig {
    MonitorConfig {
        urls: urls.to_vec(),
        ..Default::default()
    }
}

/// Parses the `success/total` column.
pub fn counts(row: &SiteSnapshot) -> (u64, u64) {
    let fields = row.fields();
    let (ok, total) = fields[7].split_once('/').unwrap();
    (ok.parse().unwrap(), total.parse().unwrap())
}
