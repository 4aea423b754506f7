//! Writers for run outcomes.

mod report;

pub use report::{CsvReportWriter, ReportWriter, TextReportWriter};
