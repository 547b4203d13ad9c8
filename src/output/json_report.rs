//! JSON chunk report writer.

use crate::error::{Error, Result};
use crate::output::{ReportRow, ReportWriter, RunSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON report file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    /// Run settings and audio facts.
    #[serde(flatten)]
    pub summary: RunSummary,
    /// Report timestamp.
    pub generated_at: DateTime<Utc>,
    /// Number of chunks.
    pub chunk_count: usize,
    /// Chunks in sorted order.
    pub chunks: Vec<ReportRow>,
}

/// Writer for JSON chunk reports.
///
/// Rows are buffered and the whole document is written on finalize.
pub struct JsonReportWriter {
    rows: Vec<ReportRow>,
    summary: RunSummary,
    output_path: PathBuf,
}

impl JsonReportWriter {
    /// Create a new JSON report writer.
    pub fn new(path: &Path, summary: RunSummary) -> Self {
        Self {
            rows: Vec::new(),
            summary,
            output_path: path.to_path_buf(),
        }
    }
}

impl ReportWriter for JsonReportWriter {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let chunks = std::mem::take(&mut self.rows);
        let report = JsonReport {
            summary: self.summary.clone(),
            generated_at: Utc::now(),
            chunk_count: chunks.len(),
            chunks,
        };

        let file = File::create(&self.output_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })?;
        writer.flush()?;
        Ok(())
    }
}
