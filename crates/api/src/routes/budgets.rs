//! Budget (quote) routes.
//!
//! Items are priced against the current catalog when a budget is created
//! or revised; later catalog changes do not touch stored budgets.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use gestao_core::budget::{
    Budget, BudgetAdjustments, BudgetDraft, BudgetItemInput, BudgetService, BudgetStatus,
};
use gestao_core::product::Product;
use gestao_db::{BudgetFilter, BudgetRepository, ProductRepository};
use gestao_shared::types::{BudgetId, ClientId, ProductId};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
        .route("/budgets/{id}/status", put(change_status))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing budgets.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetListQuery {
    /// Only this status.
    pub status: Option<BudgetStatus>,
    /// Only this client's budgets.
    pub client_id: Option<ClientId>,
}

/// Request body for creating or revising a budget.
#[derive(Debug, Deserialize, Validate)]
pub struct BudgetRequest {
    /// Client the quote is for.
    pub client_id: ClientId,
    /// Short title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Requested items.
    #[validate(length(min = 1, message = "Budget must have at least one item"))]
    pub items: Vec<BudgetItemInput>,
    /// Discount, shipping and tax.
    #[serde(flatten)]
    pub adjustments: BudgetAdjustments,
    /// Quote validity.
    pub valid_until: Option<NaiveDate>,
    /// Free-form notes.
    #[validate(length(max = 4000))]
    pub notes: Option<String>,
}

impl BudgetRequest {
    fn into_draft(self) -> ApiResult<BudgetDraft> {
        self.validate()?;
        Ok(BudgetDraft {
            client_id: self.client_id,
            title: self.title,
            items: self.items,
            adjustments: self.adjustments,
            valid_until: self.valid_until,
            notes: self.notes,
        })
    }
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    /// Target status.
    pub status: BudgetStatus,
}

/// Loads the catalog entries a draft refers to.
async fn catalog_for(state: &AppState, draft: &BudgetDraft) -> ApiResult<Vec<Product>> {
    let ids: Vec<ProductId> = draft.items.iter().map(|i| i.product_id).collect();
    Ok(ProductRepository::new(state.conn()).find_many(&ids).await?)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /budgets - Newest first, with items.
async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<BudgetListQuery>,
) -> ApiResult<Json<Vec<Budget>>> {
    let filter = BudgetFilter {
        status: query.status,
        client_id: query.client_id,
    };
    Ok(Json(BudgetRepository::new(state.conn()).list(filter).await?))
}

/// GET /budgets/{id}
async fn get_budget(
    State(state): State<AppState>,
    Path(id): Path<BudgetId>,
) -> ApiResult<Json<Budget>> {
    Ok(Json(BudgetRepository::new(state.conn()).get(id).await?))
}

/// POST /budgets - Prices the items and links the budget to its client.
async fn create_budget(
    State(state): State<AppState>,
    Json(payload): Json<BudgetRequest>,
) -> ApiResult<(StatusCode, Json<Budget>)> {
    let draft = payload.into_draft()?;
    let catalog = catalog_for(&state, &draft).await?;
    let budget = BudgetService::create(draft, &catalog, Utc::now())?;

    let stored = BudgetRepository::new(state.conn()).create(&budget).await?;
    info!(
        budget_id = %stored.id,
        client_id = %stored.client_id,
        total = %stored.totals.total_amount,
        "Budget created"
    );

    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /budgets/{id} - Replaces items, adjustments and details.
async fn update_budget(
    State(state): State<AppState>,
    Path(id): Path<BudgetId>,
    Json(payload): Json<BudgetRequest>,
) -> ApiResult<Json<Budget>> {
    let draft = payload.into_draft()?;
    let repo = BudgetRepository::new(state.conn());
    let existing = repo.get(id).await?;

    let catalog = catalog_for(&state, &draft).await?;
    let revised = BudgetService::revise(&existing, draft, &catalog, Utc::now())?;

    let stored = repo.update(&revised, existing.client_id).await?;
    info!(budget_id = %id, total = %stored.totals.total_amount, "Budget updated");

    Ok(Json(stored))
}

/// PUT /budgets/{id}/status - Approval stamps `approved_at`.
async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<BudgetId>,
    Json(payload): Json<StatusRequest>,
) -> ApiResult<Json<Budget>> {
    let repo = BudgetRepository::new(state.conn());
    let mut budget = repo.get(id).await?;
    let previous = budget.status;

    BudgetService::change_status(&mut budget, payload.status, Utc::now());
    repo.save_status(&budget).await?;
    info!(budget_id = %id, from = %previous, to = %budget.status, "Budget status changed");

    Ok(Json(budget))
}

/// DELETE /budgets/{id}
async fn delete_budget(
    State(state): State<AppState>,
    Path(id): Path<BudgetId>,
) -> ApiResult<StatusCode> {
    BudgetRepository::new(state.conn()).delete(id).await?;
    info!(budget_id = %id, "Budget deleted");

    Ok(StatusCode::NO_CONTENT)
}
