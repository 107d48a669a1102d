//! Budget pricing and totals.

use chrono::{DateTime, Utc};
use gestao_shared::types::BudgetId;
use gestao_shared::types::money::round_money;
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{
    Budget, BudgetAdjustments, BudgetDraft, BudgetItem, BudgetItemInput, BudgetStatus,
    BudgetTotals,
};
use crate::product::Product;

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Prices one item from its catalog product.
    ///
    /// `total_price = unit_price × quantity`, rounded to cents.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NonPositiveQuantity` for zero or negative quantities.
    /// Returns `BudgetError::NegativeAmount` for a negative negotiated price.
    pub fn price_item(product: &Product, input: &BudgetItemInput) -> Result<BudgetItem, BudgetError> {
        if input.quantity <= Decimal::ZERO {
            return Err(BudgetError::NonPositiveQuantity);
        }

        let unit_price = input.unit_price.unwrap_or(product.sale_price);
        if unit_price < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount("Unit price"));
        }

        Ok(BudgetItem {
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: input.quantity,
            unit_price,
            unit_cost: product.cost_price,
            total_price: round_money(unit_price * input.quantity),
        })
    }

    /// Prices every requested item against the catalog, keeping input order.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NoItems` for an empty request,
    /// `BudgetError::ProductNotFound` for unknown products, and any
    /// error from [`Self::price_item`].
    pub fn price_items(
        inputs: &[BudgetItemInput],
        catalog: &[Product],
    ) -> Result<Vec<BudgetItem>, BudgetError> {
        if inputs.is_empty() {
            return Err(BudgetError::NoItems);
        }

        inputs
            .iter()
            .map(|input| {
                let product = catalog
                    .iter()
                    .find(|p| p.id == input.product_id)
                    .ok_or(BudgetError::ProductNotFound(input.product_id))?;
                Self::price_item(product, input)
            })
            .collect()
    }

    /// Computes subtotal, total amount and material cost.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NegativeAmount` for negative adjustments and
    /// `BudgetError::DiscountExceedsTotal` when the total would go below zero.
    pub fn compute_totals(
        items: &[BudgetItem],
        adjustments: &BudgetAdjustments,
    ) -> Result<BudgetTotals, BudgetError> {
        for (name, value) in [
            ("Discount", adjustments.discount),
            ("Shipping", adjustments.shipping),
            ("Tax", adjustments.tax),
        ] {
            if value < Decimal::ZERO {
                return Err(BudgetError::NegativeAmount(name));
            }
        }

        let subtotal: Decimal = items.iter().map(|i| i.total_price).sum();
        let material_cost = round_money(items.iter().map(|i| i.unit_cost * i.quantity).sum());
        let total_amount = subtotal - adjustments.discount + adjustments.shipping + adjustments.tax;

        if total_amount < Decimal::ZERO {
            return Err(BudgetError::DiscountExceedsTotal);
        }

        Ok(BudgetTotals {
            subtotal,
            total_amount,
            material_cost,
        })
    }

    /// Prices a draft into a new budget in `Draft` status.
    ///
    /// # Errors
    ///
    /// Returns any pricing or totals error.
    pub fn create(
        draft: BudgetDraft,
        catalog: &[Product],
        now: DateTime<Utc>,
    ) -> Result<Budget, BudgetError> {
        let items = Self::price_items(&draft.items, catalog)?;
        let totals = Self::compute_totals(&items, &draft.adjustments)?;

        Ok(Budget {
            id: BudgetId::new(),
            client_id: draft.client_id,
            title: draft.title.trim().to_string(),
            status: BudgetStatus::Draft,
            items,
            adjustments: draft.adjustments,
            totals,
            valid_until: draft.valid_until,
            notes: draft.notes,
            approved_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces items, adjustments and details of an existing budget.
    ///
    /// Identity, status and approval date are kept.
    ///
    /// # Errors
    ///
    /// Returns any pricing or totals error.
    pub fn revise(
        existing: &Budget,
        draft: BudgetDraft,
        catalog: &[Product],
        now: DateTime<Utc>,
    ) -> Result<Budget, BudgetError> {
        let revised = Self::create(draft, catalog, now)?;

        Ok(Budget {
            id: existing.id,
            status: existing.status,
            approved_at: existing.approved_at,
            created_at: existing.created_at,
            ..revised
        })
    }

    /// Moves a budget to `status`, stamping or clearing the approval date.
    pub fn change_status(budget: &mut Budget, status: BudgetStatus, now: DateTime<Utc>) {
        budget.approved_at = Self::approval_timestamp(budget.approved_at, status, now);
        budget.status = status;
        budget.updated_at = now;
    }

    /// Approval timestamp after a status change.
    ///
    /// Entering `Approved` stamps `now` unless already approved; leaving it clears the stamp.
    #[must_use]
    pub fn approval_timestamp(
        previous: Option<DateTime<Utc>>,
        status: BudgetStatus,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        match status {
            BudgetStatus::Approved => Some(previous.unwrap_or(now)),
            _ => None,
        }
    }
}
