//! Payroll charge estimator.
//!
//! Simplified employer-cost and net-salary projections for Brazilian
//! CLT employees. These are estimates: no progressive INSS brackets, no
//! legal ceilings, no IRRF. Every output carries `is_estimate: true`.
//!
//! # Example
//!
//! ```
//! use gestao_core::payroll::{PayrollRates, PayrollService};
//! use rust_decimal::Decimal;
//!
//! let charges = PayrollService::estimate_charges(
//!     Decimal::new(3000, 0),
//!     true,
//!     false,
//!     21,
//!     &PayrollRates::default(),
//! );
//! assert_eq!(charges.fgts, Decimal::new(240, 0));
//! assert_eq!(charges.meal_voucher_cost, Decimal::new(315, 0));
//! ```

pub mod calendar;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use calendar::{business_days_in_month, month_bounds};
pub use error::PayrollError;
pub use service::PayrollService;
pub use types::{EmployeePayroll, NetSalaryEstimate, PayrollCharges, PayrollRates, TeamPayrollSummary};
