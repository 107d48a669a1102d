//! Derived financial views.
//!
//! Pure aggregation over already-loaded records:
//! - Financial summary (revenue, costs, margin)
//! - Cost breakdown by category
//! - Receivables from boletos
//! - CSV export of the summary

pub mod error;
pub mod export;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use export::financial_summary_csv;
pub use service::ReportService;
pub use types::*;
