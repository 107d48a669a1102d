//! Boletos: receivables split into installments (parcelas).
//!
//! - [`schedule`] splits a total into installments 30 days apart.
//! - [`status`] holds the installment state machine and the aggregate
//!   status shown in listings.
//! - [`service`] plans a new boleto from a request.

pub mod error;
pub mod schedule;
pub mod service;
pub mod status;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BoletoError;
pub use schedule::{generate_schedule, INSTALLMENT_INTERVAL_DAYS, MAX_INSTALLMENTS};
pub use service::BoletoService;
pub use status::{aggregate_status, refresh_overdue};
pub use types::{
    Boleto, BoletoParcela, BoletoStatus, BoletoWithStatus, NewBoleto, ParcelaEdit, ParcelaStatus,
    ScheduledInstallment,
};
