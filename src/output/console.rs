use super::RenderSink;
use crate::error::Result;
use crate::metrics::snapshot::SiteSnapshot;
use async_trait::async_trait;
use comfy_table::{ContentArrangement, Table};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

pub const HEADERS: [&str; 8] = [
    "URL",
    "Min Duration",
    "Avg Duration",
    "Max Duration",
    "Min Size",
    "Avg Size",
    "Max Size",
    "OK",
];

// `+---+` outer borders, `|` between columns, one rule under the header and
// no rules between data rows.
const ASCII_BORDERS: &str = "||--+--+|    ++++++";

/// Draws a bordered table to a terminal (stdout by default).
pub struct ConsoleOutput {
    out: Box<dyn Write + Send + Sync>,
}

impl ConsoleOutput {
    pub fn new(out: Box<dyn Write + Send + Sync>) -> Self {
        Self { out }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

#[async_trait]
impl RenderSink for ConsoleOutput {
    async fn render(&mut self, rows: &[SiteSnapshot], clear_screen_first: bool) -> Result<()> {
        if clear_screen_first {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        }
        writeln!(self.out, "{}", render_table(rows))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Builds the statistics table with every column as wide as its widest cell.
pub fn render_table(rows: &[SiteSnapshot]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_BORDERS)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(HEADERS);

    for row in rows {
        table.add_row(row.fields());
    }

    table.to_string()
}
