//! Report error types.

use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// CSV serialization failed.
    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),
}
