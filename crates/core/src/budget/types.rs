//! Budget data types.

use chrono::{DateTime, NaiveDate, Utc};
use gestao_shared::types::{BudgetId, ClientId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;

/// Budget status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Being written.
    Draft,
    /// Sent to the client.
    Sent,
    /// Accepted by the client; counts as revenue.
    Approved,
    /// Declined by the client.
    Rejected,
}

impl BudgetStatus {
    /// Every status.
    pub const ALL: [Self; 4] = [Self::Draft, Self::Sent, Self::Approved, Self::Rejected];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BudgetStatus {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BudgetError::UnknownStatus(s.to_string()))
    }
}

/// A priced line of a budget.
///
/// Prices are snapshots taken when the item was added, so later catalog
/// changes do not alter issued quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    /// Catalog product.
    pub product_id: ProductId,
    /// Product name at pricing time.
    pub product_name: String,
    /// Quantity (may be fractional, e.g. square meters).
    pub quantity: Decimal,
    /// Unit sale price snapshot.
    pub unit_price: Decimal,
    /// Unit cost price snapshot.
    pub unit_cost: Decimal,
    /// `unit_price × quantity`.
    pub total_price: Decimal,
}

/// Requested item before pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItemInput {
    /// Catalog product.
    pub product_id: ProductId,
    /// Quantity.
    pub quantity: Decimal,
    /// Negotiated unit price; the catalog sale price is used when absent.
    pub unit_price: Option<Decimal>,
}

/// Discount, shipping and tax applied over the item subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAdjustments {
    /// Amount taken off the subtotal.
    #[serde(default)]
    pub discount: Decimal,
    /// Freight charged to the client.
    #[serde(default)]
    pub shipping: Decimal,
    /// Taxes charged to the client.
    #[serde(default)]
    pub tax: Decimal,
}

/// Derived budget amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTotals {
    /// Sum of item totals.
    pub subtotal: Decimal,
    /// `subtotal − discount + shipping + tax`.
    pub total_amount: Decimal,
    /// Internal cost of the items.
    pub material_cost: Decimal,
}

/// Everything an operator submits when creating or revising a budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDraft {
    /// Client the quote is for.
    pub client_id: ClientId,
    /// Short title.
    pub title: String,
    /// Requested items, priced against the catalog.
    pub items: Vec<BudgetItemInput>,
    /// Adjustments.
    #[serde(flatten)]
    pub adjustments: BudgetAdjustments,
    /// Quote validity.
    pub valid_until: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// A budget record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Client the quote is for.
    pub client_id: ClientId,
    /// Short title.
    pub title: String,
    /// Status.
    pub status: BudgetStatus,
    /// Ordered items.
    pub items: Vec<BudgetItem>,
    /// Adjustments.
    #[serde(flatten)]
    pub adjustments: BudgetAdjustments,
    /// Derived totals.
    #[serde(flatten)]
    pub totals: BudgetTotals,
    /// Quote validity.
    pub valid_until: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the budget was approved, if it is.
    pub approved_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Whether the budget counts as revenue.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == BudgetStatus::Approved
    }

    /// Date used to place the budget in a reporting month.
    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.approved_at.unwrap_or(self.created_at).date_naive()
    }
}
