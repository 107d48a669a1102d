//! Boleto error types.

use thiserror::Error;

use super::types::ParcelaStatus;

/// Boleto-related errors.
#[derive(Debug, Error)]
pub enum BoletoError {
    /// Total amount must be positive.
    #[error("Total amount must be greater than zero")]
    NonPositiveTotal,

    /// Installment count outside the accepted range.
    #[error("Installment count must be between 1 and {max}, got {count}")]
    InstallmentCountOutOfRange {
        /// Requested count.
        count: i32,
        /// Upper bound.
        max: i32,
    },

    /// Installment value below zero.
    #[error("Installment value cannot be negative")]
    NegativeValue,

    /// Transition not allowed by the installment state machine.
    #[error("Cannot change installment from {from} to {to}")]
    IllegalTransition {
        /// Current status.
        from: ParcelaStatus,
        /// Requested status.
        to: ParcelaStatus,
    },

    /// No installment with that number.
    #[error("Installment {0} not found")]
    ParcelaNotFound(u32),

    /// Status outside the closed set.
    #[error("Unknown installment status: {0}")]
    UnknownStatus(String),
}
