//! Plot rendering, chunk reports, and progress display.

mod csv_report;
mod json_report;
mod plot;
pub mod progress;
mod types;
mod writer;

pub use csv_report::CsvReportWriter;
pub use json_report::{JsonReport, JsonReportWriter};
pub use plot::SvgPlotter;
pub use types::{ReportRow, RunSummary};
pub use writer::ReportWriter;
