//! Product catalog.

use chrono::{DateTime, Utc};
use gestao_shared::types::{ProductId, money::percent_of};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Raw material resold or consumed in a job.
    Material,
    /// Labour or service.
    Service,
    /// Equipment or tools.
    Equipment,
    /// Anything else.
    Other,
}

impl ProductCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [Self::Material, Self::Service, Self::Equipment, Self::Other];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Service => "service",
            Self::Equipment => "equipment",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProductError::UnknownCategory(s.to_string()))
    }
}

/// Product-related errors.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Price below zero.
    #[error("{0} cannot be negative")]
    NegativePrice(&'static str),

    /// Category outside the closed set.
    #[error("Unknown product category: {0}")]
    UnknownCategory(String),
}

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Category tag.
    pub category: ProductCategory,
    /// Public sale price.
    pub sale_price: Decimal,
    /// Internal cost price.
    pub cost_price: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Markup of the sale price over the cost price, in percent.
    #[must_use]
    pub fn markup_percent(&self) -> Decimal {
        percent_of(self.sale_price - self.cost_price, self.cost_price)
    }
}

/// Editable product fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    /// Product name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Category tag.
    pub category: ProductCategory,
    /// Public sale price.
    pub sale_price: Decimal,
    /// Internal cost price.
    pub cost_price: Decimal,
}

impl ProductInput {
    /// Validates monetary fields.
    ///
    /// # Errors
    ///
    /// Returns `ProductError::NegativePrice` if either price is negative.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.sale_price < Decimal::ZERO {
            return Err(ProductError::NegativePrice("Sale price"));
        }
        if self.cost_price < Decimal::ZERO {
            return Err(ProductError::NegativePrice("Cost price"));
        }
        Ok(())
    }
}
