//! CSV export of the financial summary.
//!
//! `;`-separated with a UTF-8 BOM and comma decimals so spreadsheet tools
//! in pt-BR locales open it directly.

use gestao_shared::types::money::round_money;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{CostReport, FinancialSummary};

const BOM: &[u8] = b"\xEF\xBB\xBF";

fn decimal_br(value: Decimal) -> String {
    format!("{:.2}", round_money(value)).replace('.', ",")
}

/// Renders the summary and cost breakdown as CSV bytes.
///
/// # Errors
///
/// Returns `ReportError::Export` if a record cannot be written.
pub fn financial_summary_csv(
    summary: &FinancialSummary,
    costs: &CostReport,
) -> Result<Vec<u8>, ReportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_writer(BOM.to_vec());

    wtr.write_record(["Indicador", "Valor"])?;

    let period = format!("{:02}/{}", summary.month, summary.year);
    wtr.write_record(["Período", period.as_str()])?;

    let counts = [
        ("Orçamentos aprovados", summary.approved_budget_count),
        ("Orçamentos aprovados no mês", summary.month_budget_count),
    ];
    for (label, count) in counts {
        wtr.write_record([label, count.to_string().as_str()])?;
    }

    let amounts = [
        ("Receita total", summary.total_revenue),
        ("Receita do mês", summary.month_revenue),
        ("Custo de material", summary.material_cost),
        ("Custos fixos", summary.fixed_costs),
        ("Custos variáveis", summary.variable_costs),
        ("Custos variáveis do mês", summary.month_variable_costs),
        ("Custo total", summary.grand_total_cost),
        ("Margem bruta", summary.gross_margin),
        ("Margem (%)", summary.margin_percent),
        ("Custo médio por projeto", summary.average_cost_per_project),
    ];
    for (label, value) in amounts {
        wtr.write_record([label, decimal_br(value).as_str()])?;
    }

    for share in &summary.cost_shares {
        let label = format!("{} (%)", share.bucket.label());
        wtr.write_record([label.as_str(), decimal_br(share.percent).as_str()])?;
    }

    wtr.write_record(["", ""])?;
    wtr.write_record(["Categoria", "Fixo", "Variável", "Total", "%"])?;
    for c in &costs.categories {
        wtr.write_record([
            c.category.as_str().to_string(),
            decimal_br(c.fixed),
            decimal_br(c.variable),
            decimal_br(c.amount),
            decimal_br(c.percent),
        ])?;
    }

    wtr.into_inner()
        .map_err(|e| ReportError::Export(csv::Error::from(e.into_error())))
}
