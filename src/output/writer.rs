//! Report writer trait definition.

use crate::error::Result;
use crate::output::ReportRow;

/// Trait for writing chunk reports.
pub trait ReportWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single sorted chunk.
    fn write_row(&mut self, row: &ReportRow) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
