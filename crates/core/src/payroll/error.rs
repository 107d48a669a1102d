//! Payroll error types.

use thiserror::Error;

/// Payroll estimation errors.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
}
