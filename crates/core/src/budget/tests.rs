//! Property-based tests for budget pricing.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use gestao_shared::types::ProductId;

use super::service::BudgetService;
use super::types::{BudgetAdjustments, BudgetItemInput};
use crate::product::{Product, ProductCategory};

fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn product(sale: Decimal, cost: Decimal) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId::new(),
        name: "Item".to_string(),
        description: None,
        category: ProductCategory::Other,
        sale_price: sale,
        cost_price: cost,
        created_at: now,
        updated_at: now,
    }
}

proptest! {
    /// Every item total equals unit price times quantity for whole quantities.
    #[test]
    fn prop_item_total_is_price_times_quantity(
        price in cents(),
        cost in cents(),
        quantity in 1i64..1_000,
    ) {
        let p = product(price, cost);
        let input = BudgetItemInput {
            product_id: p.id,
            quantity: Decimal::from(quantity),
            unit_price: None,
        };

        let item = BudgetService::price_item(&p, &input).unwrap();
        prop_assert_eq!(item.total_price, price * Decimal::from(quantity));
    }

    /// Total amount is subtotal minus discount plus shipping and tax.
    #[test]
    fn prop_total_identity(
        prices in prop::collection::vec((cents(), 1i64..50), 1..10),
        shipping in cents(),
        tax in cents(),
        discount_share in 0u32..=100,
    ) {
        let catalog: Vec<Product> = prices.iter().map(|(p, _)| product(*p, Decimal::ZERO)).collect();
        let inputs: Vec<BudgetItemInput> = catalog
            .iter()
            .zip(&prices)
            .map(|(p, (_, q))| BudgetItemInput {
                product_id: p.id,
                quantity: Decimal::from(*q),
                unit_price: None,
            })
            .collect();

        let items = BudgetService::price_items(&inputs, &catalog).unwrap();
        let subtotal: Decimal = items.iter().map(|i| i.total_price).sum();
        let discount = (subtotal * Decimal::from(discount_share) / Decimal::ONE_HUNDRED).round_dp(2);
        let adjustments = BudgetAdjustments { discount, shipping, tax };

        let totals = BudgetService::compute_totals(&items, &adjustments).unwrap();

        prop_assert_eq!(totals.subtotal, subtotal);
        prop_assert_eq!(totals.total_amount, subtotal - discount + shipping + tax);
        prop_assert!(totals.total_amount >= Decimal::ZERO);
    }
}
