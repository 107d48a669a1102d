//! Fixed (recurring) and variable (one-off) cost records.

use chrono::{DateTime, NaiveDate, Utc};
use gestao_shared::types::{FixedCostId, VariableCostId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cost category tag, shared by fixed and variable costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Rent and condominium fees.
    Rent,
    /// Power, water, internet, phone.
    Utilities,
    /// Salaries and payroll charges.
    Payroll,
    /// Materials and supplies.
    Material,
    /// Fuel, freight and travel.
    Transport,
    /// Advertising.
    Marketing,
    /// Taxes and fees.
    Taxes,
    /// Repairs and upkeep.
    Maintenance,
    /// Outsourced services.
    Services,
    /// Anything else.
    Other,
}

impl CostCategory {
    /// Every category.
    pub const ALL: [Self; 10] = [
        Self::Rent,
        Self::Utilities,
        Self::Payroll,
        Self::Material,
        Self::Transport,
        Self::Marketing,
        Self::Taxes,
        Self::Maintenance,
        Self::Services,
        Self::Other,
    ];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Utilities => "utilities",
            Self::Payroll => "payroll",
            Self::Material => "material",
            Self::Transport => "transport",
            Self::Marketing => "marketing",
            Self::Taxes => "taxes",
            Self::Maintenance => "maintenance",
            Self::Services => "services",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CostCategory {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CostError::UnknownCategory(s.to_string()))
    }
}

/// Cost-related errors.
#[derive(Debug, Error)]
pub enum CostError {
    /// Amount below zero.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Category outside the closed set.
    #[error("Unknown cost category: {0}")]
    UnknownCategory(String),
}

/// A recurring monthly expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedCost {
    /// Cost ID.
    pub id: FixedCostId,
    /// Description.
    pub description: String,
    /// Category tag.
    pub category: CostCategory,
    /// Monthly amount.
    pub amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A one-off expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableCost {
    /// Cost ID.
    pub id: VariableCostId,
    /// Description.
    pub description: String,
    /// Category tag.
    pub category: CostCategory,
    /// Amount.
    pub amount: Decimal,
    /// Date the expense occurred.
    pub date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Editable cost fields. `date` is required for variable costs and ignored for fixed ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostInput {
    /// Description.
    pub description: String,
    /// Category tag.
    pub category: CostCategory,
    /// Amount.
    pub amount: Decimal,
    /// Date the expense occurred.
    pub date: Option<NaiveDate>,
}

impl CostInput {
    /// Validates monetary fields.
    ///
    /// # Errors
    ///
    /// Returns `CostError::NegativeAmount` if the amount is negative.
    pub fn validate(&self) -> Result<(), CostError> {
        if self.amount < Decimal::ZERO {
            return Err(CostError::NegativeAmount);
        }
        Ok(())
    }
}

/// Anything that contributes an amount to a cost category.
pub trait CategorizedCost {
    /// Category tag.
    fn category(&self) -> CostCategory;
    /// Amount.
    fn amount(&self) -> Decimal;
}

impl CategorizedCost for FixedCost {
    fn category(&self) -> CostCategory {
        self.category
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl CategorizedCost for VariableCost {
    fn category(&self) -> CostCategory {
        self.category
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}
