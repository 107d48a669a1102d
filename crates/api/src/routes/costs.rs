//! Fixed and variable cost routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use gestao_core::cost::{CostCategory, CostInput, FixedCost, VariableCost};
use gestao_db::{CostRepository, VariableCostFilter};
use gestao_shared::types::{FixedCostId, VariableCostId};

/// Creates the cost routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fixed-costs", get(list_fixed).post(create_fixed))
        .route(
            "/fixed-costs/{id}",
            get(get_fixed).put(update_fixed).delete(delete_fixed),
        )
        .route("/variable-costs", get(list_variable).post(create_variable))
        .route(
            "/variable-costs/{id}",
            get(get_variable).put(update_variable).delete(delete_variable),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing fixed costs.
#[derive(Debug, Default, Deserialize)]
pub struct FixedCostQuery {
    /// Only this category.
    pub category: Option<CostCategory>,
}

/// Query parameters for listing variable costs. Date bounds are inclusive.
#[derive(Debug, Default, Deserialize)]
pub struct VariableCostQuery {
    /// Earliest date.
    pub from: Option<NaiveDate>,
    /// Latest date.
    pub to: Option<NaiveDate>,
    /// Only this category.
    pub category: Option<CostCategory>,
}

/// Request body for creating or updating a cost.
#[derive(Debug, Deserialize, Validate)]
pub struct CostRequest {
    /// Description.
    #[validate(length(min = 1, max = 300))]
    pub description: String,
    /// Category tag.
    pub category: CostCategory,
    /// Amount.
    pub amount: Decimal,
    /// Date of a variable cost; defaults to today on create.
    pub date: Option<NaiveDate>,
}

impl CostRequest {
    fn into_input(self) -> ApiResult<CostInput> {
        self.validate()?;
        let input = CostInput {
            description: self.description,
            category: self.category,
            amount: self.amount,
            date: self.date,
        };
        input.validate()?;
        Ok(input)
    }
}

// ============================================================================
// Fixed costs
// ============================================================================

/// GET /fixed-costs
async fn list_fixed(
    State(state): State<AppState>,
    Query(query): Query<FixedCostQuery>,
) -> ApiResult<Json<Vec<FixedCost>>> {
    Ok(Json(
        CostRepository::new(state.conn())
            .list_fixed(query.category)
            .await?,
    ))
}

/// GET /fixed-costs/{id}
async fn get_fixed(
    State(state): State<AppState>,
    Path(id): Path<FixedCostId>,
) -> ApiResult<Json<FixedCost>> {
    Ok(Json(CostRepository::new(state.conn()).get_fixed(id).await?))
}

/// POST /fixed-costs
async fn create_fixed(
    State(state): State<AppState>,
    Json(payload): Json<CostRequest>,
) -> ApiResult<(StatusCode, Json<FixedCost>)> {
    let cost = CostRepository::new(state.conn())
        .create_fixed(payload.into_input()?)
        .await?;
    info!(fixed_cost_id = %cost.id, "Fixed cost created");

    Ok((StatusCode::CREATED, Json(cost)))
}

/// PUT /fixed-costs/{id}
async fn update_fixed(
    State(state): State<AppState>,
    Path(id): Path<FixedCostId>,
    Json(payload): Json<CostRequest>,
) -> ApiResult<Json<FixedCost>> {
    let cost = CostRepository::new(state.conn())
        .update_fixed(id, payload.into_input()?)
        .await?;
    info!(fixed_cost_id = %id, "Fixed cost updated");

    Ok(Json(cost))
}

/// DELETE /fixed-costs/{id}
async fn delete_fixed(
    State(state): State<AppState>,
    Path(id): Path<FixedCostId>,
) -> ApiResult<StatusCode> {
    CostRepository::new(state.conn()).delete_fixed(id).await?;
    info!(fixed_cost_id = %id, "Fixed cost deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Variable costs
// ============================================================================

/// GET /variable-costs
async fn list_variable(
    State(state): State<AppState>,
    Query(query): Query<VariableCostQuery>,
) -> ApiResult<Json<Vec<VariableCost>>> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(ApiError::validation("'from' must not be after 'to'"));
    }

    let filter = VariableCostFilter {
        from: query.from,
        to: query.to,
        category: query.category,
    };
    Ok(Json(
        CostRepository::new(state.conn())
            .list_variable(filter)
            .await?,
    ))
}

/// GET /variable-costs/{id}
async fn get_variable(
    State(state): State<AppState>,
    Path(id): Path<VariableCostId>,
) -> ApiResult<Json<VariableCost>> {
    Ok(Json(CostRepository::new(state.conn()).get_variable(id).await?))
}

/// POST /variable-costs
async fn create_variable(
    State(state): State<AppState>,
    Json(payload): Json<CostRequest>,
) -> ApiResult<(StatusCode, Json<VariableCost>)> {
    let cost = CostRepository::new(state.conn())
        .create_variable(payload.into_input()?)
        .await?;
    info!(variable_cost_id = %cost.id, date = %cost.date, "Variable cost created");

    Ok((StatusCode::CREATED, Json(cost)))
}

/// PUT /variable-costs/{id}
async fn update_variable(
    State(state): State<AppState>,
    Path(id): Path<VariableCostId>,
    Json(payload): Json<CostRequest>,
) -> ApiResult<Json<VariableCost>> {
    let cost = CostRepository::new(state.conn())
        .update_variable(id, payload.into_input()?)
        .await?;
    info!(variable_cost_id = %id, "Variable cost updated");

    Ok(Json(cost))
}

/// DELETE /variable-costs/{id}
async fn delete_variable(
    State(state): State<AppState>,
    Path(id): Path<VariableCostId>,
) -> ApiResult<StatusCode> {
    CostRepository::new(state.conn()).delete_variable(id).await?;
    info!(variable_cost_id = %id, "Variable cost deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cost_request_validation() {
        let request = CostRequest {
            description: String::new(),
            category: CostCategory::Rent,
            amount: dec!(1800),
            date: None,
        };
        assert!(request.into_input().is_err());

        let request = CostRequest {
            description: "Combustível".to_string(),
            category: CostCategory::Transport,
            amount: dec!(-50),
            date: None,
        };
        assert!(request.into_input().is_err());
    }
}
