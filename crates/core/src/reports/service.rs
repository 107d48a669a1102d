//! Report generation service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use gestao_shared::types::money::{percent_of, round_money};
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    CategoryBreakdown, CostBucket, CostReport, CostShare, FinancialSummary, ReceivablesSummary,
};
use crate::boleto::{Boleto, ParcelaStatus};
use crate::budget::Budget;
use crate::cost::{CategorizedCost, CostCategory, FixedCost, VariableCost};
use crate::payroll::month_bounds;

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Builds the revenue/cost/margin summary.
    ///
    /// Only approved budgets count. A budget belongs to the month of its
    /// approval date, or of its creation date when it has none.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` if `year`/`month` is not a calendar month.
    pub fn financial_summary(
        budgets: &[Budget],
        fixed_costs: &[FixedCost],
        variable_costs: &[VariableCost],
        year: i32,
        month: u32,
    ) -> Result<FinancialSummary, ReportError> {
        let (first, last) =
            month_bounds(year, month).ok_or(ReportError::InvalidMonth { year, month })?;
        let in_month = |d: NaiveDate| d >= first && d <= last;

        let approved: Vec<&Budget> = budgets.iter().filter(|b| b.is_approved()).collect();
        let month_budgets: Vec<&&Budget> = approved
            .iter()
            .filter(|b| in_month(b.reference_date()))
            .collect();

        let total_revenue: Decimal = approved.iter().map(|b| b.totals.total_amount).sum();
        let month_revenue: Decimal = month_budgets.iter().map(|b| b.totals.total_amount).sum();
        let material_cost: Decimal = approved.iter().map(|b| b.totals.material_cost).sum();

        let fixed: Decimal = fixed_costs.iter().map(|c| c.amount).sum();
        let variable: Decimal = variable_costs.iter().map(|c| c.amount).sum();
        let month_variable_costs: Decimal = variable_costs
            .iter()
            .filter(|c| in_month(c.date))
            .map(|c| c.amount)
            .sum();

        let grand_total_cost = material_cost + fixed + variable;
        let gross_margin = total_revenue - grand_total_cost;

        let average_cost_per_project = if approved.is_empty() {
            Decimal::ZERO
        } else {
            round_money(grand_total_cost / Decimal::from(approved.len()))
        };

        let cost_shares = [
            (CostBucket::Material, material_cost),
            (CostBucket::Fixed, fixed),
            (CostBucket::Variable, variable),
        ]
        .into_iter()
        .map(|(bucket, amount)| CostShare {
            bucket,
            amount,
            percent: percent_of(amount, grand_total_cost),
        })
        .collect();

        Ok(FinancialSummary {
            year,
            month,
            approved_budget_count: approved.len(),
            total_revenue,
            month_budget_count: month_budgets.len(),
            month_revenue,
            material_cost,
            fixed_costs: fixed,
            variable_costs: variable,
            month_variable_costs,
            grand_total_cost,
            gross_margin,
            margin_percent: percent_of(gross_margin, total_revenue),
            average_cost_per_project,
            cost_shares,
        })
    }

    /// Groups fixed and variable costs by category, largest amount first.
    ///
    /// Categories without costs are omitted.
    #[must_use]
    pub fn cost_breakdown(fixed_costs: &[FixedCost], variable_costs: &[VariableCost]) -> CostReport {
        let mut by_category: BTreeMap<CostCategory, (Decimal, Decimal)> = BTreeMap::new();

        for cost in fixed_costs {
            by_category.entry(cost.category()).or_default().0 += cost.amount();
        }
        for cost in variable_costs {
            by_category.entry(cost.category()).or_default().1 += cost.amount();
        }

        let total: Decimal = by_category.values().map(|(f, v)| f + v).sum();

        let mut categories: Vec<CategoryBreakdown> = by_category
            .into_iter()
            .map(|(category, (fixed, variable))| CategoryBreakdown {
                category,
                fixed,
                variable,
                amount: fixed + variable,
                percent: percent_of(fixed + variable, total),
            })
            .collect();

        // Stable sort keeps category order among equal amounts.
        categories.sort_by(|a, b| b.amount.cmp(&a.amount));

        CostReport { total, categories }
    }

    /// Sums installments by collection state as of `today`.
    ///
    /// A `pendente` installment already past due counts as overdue even
    /// before its status is refreshed.
    #[must_use]
    pub fn receivables(boletos: &[Boleto], today: NaiveDate) -> ReceivablesSummary {
        let mut summary = ReceivablesSummary {
            as_of: Some(today),
            boleto_count: boletos.len(),
            ..ReceivablesSummary::default()
        };

        for parcela in boletos.iter().flat_map(|b| &b.parcelas) {
            summary.installment_count += 1;
            match parcela.status {
                ParcelaStatus::Cancelado => summary.total_cancelled += parcela.value,
                ParcelaStatus::Pago => summary.total_received += parcela.value,
                ParcelaStatus::Vencido => summary.total_overdue += parcela.value,
                ParcelaStatus::Pendente if parcela.due_date < today => {
                    summary.total_overdue += parcela.value;
                }
                ParcelaStatus::Pendente => summary.total_open += parcela.value,
            }
        }

        summary.total_receivable =
            summary.total_received + summary.total_overdue + summary.total_open;
        summary
    }
}
