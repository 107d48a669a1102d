//! Budgets (quotes) and their priced items.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    Budget, BudgetAdjustments, BudgetDraft, BudgetItem, BudgetItemInput, BudgetStatus, BudgetTotals,
};
