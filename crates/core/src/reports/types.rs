//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cost::CostCategory;

/// Which bucket of the grand total a share refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostBucket {
    /// Cost of materials in approved budgets.
    Material,
    /// Recurring monthly costs.
    Fixed,
    /// One-off costs.
    Variable,
}

impl CostBucket {
    /// Portuguese label used in exports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Material => "Custo de material",
            Self::Fixed => "Custos fixos",
            Self::Variable => "Custos variáveis",
        }
    }
}

/// Share of one bucket in the grand total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostShare {
    pub bucket: CostBucket,
    pub amount: Decimal,
    /// Percent of the grand total, 2 decimals.
    pub percent: Decimal,
}

/// Revenue, cost and margin summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Reference month.
    pub year: i32,
    pub month: u32,

    /// Approved budgets, all time.
    pub approved_budget_count: usize,
    pub total_revenue: Decimal,

    /// Approved budgets in the reference month.
    pub month_budget_count: usize,
    pub month_revenue: Decimal,

    pub material_cost: Decimal,
    /// Sum of recurring monthly costs.
    pub fixed_costs: Decimal,
    pub variable_costs: Decimal,
    /// Variable costs dated in the reference month.
    pub month_variable_costs: Decimal,
    /// `material_cost + fixed_costs + variable_costs`.
    pub grand_total_cost: Decimal,

    /// `total_revenue - grand_total_cost`.
    pub gross_margin: Decimal,
    /// Margin over revenue, zero without revenue.
    pub margin_percent: Decimal,
    /// Grand total cost per approved budget.
    pub average_cost_per_project: Decimal,

    pub cost_shares: Vec<CostShare>,
}

/// Fixed plus variable amount of one cost category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: CostCategory,
    pub fixed: Decimal,
    pub variable: Decimal,
    /// `fixed + variable`.
    pub amount: Decimal,
    /// Percent of the report total, 2 decimals.
    pub percent: Decimal,
}

/// Costs grouped by category, largest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReport {
    pub total: Decimal,
    pub categories: Vec<CategoryBreakdown>,
}

/// What is owed across a set of boletos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivablesSummary {
    pub as_of: Option<NaiveDate>,
    pub boleto_count: usize,
    pub installment_count: usize,
    /// Every installment not cancelled.
    pub total_receivable: Decimal,
    /// Paid installments.
    pub total_received: Decimal,
    /// Unpaid installments past due.
    pub total_overdue: Decimal,
    /// Unpaid installments not yet due.
    pub total_open: Decimal,
    /// Cancelled installments.
    pub total_cancelled: Decimal,
}
