//! Budget error types.

use gestao_shared::types::ProductId;
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// A budget needs at least one item.
    #[error("Budget must have at least one item")]
    NoItems,

    /// Item quantity must be positive.
    #[error("Item quantity must be greater than zero")]
    NonPositiveQuantity,

    /// Monetary field below zero.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),

    /// Discount larger than everything it could be taken from.
    #[error("Discount exceeds the budget total")]
    DiscountExceedsTotal,

    /// Item references a product missing from the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Status outside the closed set.
    #[error("Unknown budget status: {0}")]
    UnknownStatus(String),
}
