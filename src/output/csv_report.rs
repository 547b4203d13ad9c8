//! CSV chunk report writer.

use crate::error::{Error, Result};
use crate::output::{ReportRow, ReportWriter};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Column headers, in [`ReportRow`] field order.
const HEADER: [&str; 5] = [
    "rank",
    "chunk_index",
    "start_time",
    "end_time",
    "dominant_frequency_hz",
];

/// CSV format report writer.
pub struct CsvReportWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvReportWriter {
    /// Create a new CSV writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    fn csv_error(&self, source: csv::Error) -> Error {
        Error::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(HEADER)
            .map_err(|e| self.csv_error(e))
    }

    fn write_row(&mut self, row: &ReportRow) -> Result<()> {
        self.writer.serialize(row).map_err(|e| self.csv_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_writer_basic() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvReportWriter::new(file.path()).unwrap();

        writer.write_header().unwrap();
        writer
            .write_row(&ReportRow {
                rank: 0,
                chunk_index: 3,
                start_time: 1.5,
                end_time: 2.0,
                dominant_frequency: 440.25,
            })
            .unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines[0],
            "rank,chunk_index,start_time,end_time,dominant_frequency_hz"
        );
        assert_eq!(lines[1], "0,3,1.5,2.0,440.25");
    }

    #[test]
    fn test_csv_header_only_when_no_rows() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = CsvReportWriter::new(file.path()).unwrap();
        writer.write_header().unwrap();
        writer.finalize().unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}
