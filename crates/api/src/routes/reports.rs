//! Financial report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use tracing::info;

use super::{MonthQuery, today};
use crate::AppState;
use crate::error::ApiResult;
use gestao_core::budget::BudgetStatus;
use gestao_core::reports::{
    CostReport, FinancialSummary, ReceivablesSummary, ReportService, financial_summary_csv,
};
use gestao_db::{
    BoletoRepository, BudgetFilter, BudgetRepository, CostRepository, VariableCostFilter,
};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/financial", get(financial))
        .route("/reports/financial.csv", get(financial_csv))
        .route("/reports/costs", get(costs))
        .route("/reports/receivables", get(receivables))
}

/// Loads everything the summary needs and builds it.
async fn build_summary(
    state: &AppState,
    query: MonthQuery,
) -> ApiResult<(FinancialSummary, CostReport)> {
    let (year, month) = query.resolve(today());

    let budgets = BudgetRepository::new(state.conn())
        .list(BudgetFilter {
            status: Some(BudgetStatus::Approved),
            client_id: None,
        })
        .await?;
    let cost_repo = CostRepository::new(state.conn());
    let fixed = cost_repo.list_fixed(None).await?;
    let variable = cost_repo
        .list_variable(VariableCostFilter::default())
        .await?;

    let summary = ReportService::financial_summary(&budgets, &fixed, &variable, year, month)?;
    let breakdown = ReportService::cost_breakdown(&fixed, &variable);
    Ok((summary, breakdown))
}

/// GET /reports/financial - Revenue, cost and margin summary.
async fn financial(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<FinancialSummary>> {
    let (summary, _) = build_summary(&state, query).await?;
    Ok(Json(summary))
}

/// GET /reports/financial.csv - Summary and cost breakdown as a spreadsheet.
async fn financial_csv(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<impl IntoResponse> {
    let (summary, breakdown) = build_summary(&state, query).await?;
    let bytes = financial_summary_csv(&summary, &breakdown)?;

    let filename = format!(
        "resumo-financeiro-{}-{:02}.csv",
        summary.year, summary.month
    );
    info!(file = %filename, size = bytes.len(), "Financial summary exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}

/// GET /reports/costs - Fixed and variable costs by category.
async fn costs(State(state): State<AppState>) -> ApiResult<Json<CostReport>> {
    let cost_repo = CostRepository::new(state.conn());
    let fixed = cost_repo.list_fixed(None).await?;
    let variable = cost_repo
        .list_variable(VariableCostFilter::default())
        .await?;

    Ok(Json(ReportService::cost_breakdown(&fixed, &variable)))
}

/// GET /reports/receivables - Installments by collection state.
async fn receivables(State(state): State<AppState>) -> ApiResult<Json<ReceivablesSummary>> {
    let today = today();
    let boletos = BoletoRepository::new(state.conn()).list(None, today).await?;

    Ok(Json(ReportService::receivables(&boletos, today)))
}
