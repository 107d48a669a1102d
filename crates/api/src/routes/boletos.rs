//! Boleto and installment routes.
//!
//! Reads refresh overdue installments before the aggregate status is
//! derived, so listings always reflect today's date.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::today;
use crate::AppState;
use crate::error::ApiResult;
use gestao_core::boleto::status::{apply_edit, cancel, pay};
use gestao_core::boleto::{
    BoletoError, BoletoParcela, BoletoService, BoletoWithStatus, NewBoleto, ParcelaEdit,
};
use gestao_db::BoletoRepository;
use gestao_shared::types::{BoletoId, ClientId};

/// Creates the boleto routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/boletos", get(list_boletos).post(create_boleto))
        .route("/boletos/{id}", get(get_boleto).delete(delete_boleto))
        .route("/boletos/{id}/parcelas/{number}", put(edit_parcela))
        .route("/boletos/{id}/parcelas/{number}/pay", post(pay_parcela))
        .route("/boletos/{id}/parcelas/{number}/cancel", post(cancel_parcela))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing boletos.
#[derive(Debug, Default, Deserialize)]
pub struct BoletoListQuery {
    /// Only this client's boletos.
    pub client_id: Option<ClientId>,
}

/// Request body for creating a boleto.
#[derive(Debug, Deserialize, Validate)]
pub struct BoletoRequest {
    /// Payer.
    pub client_id: ClientId,
    /// What is being charged.
    #[validate(length(min = 1, max = 300))]
    pub description: String,
    /// Amount split across the installments.
    pub total_amount: Decimal,
    /// Number of installments.
    #[validate(range(min = 1, max = 36))]
    pub installment_count: i32,
    /// Due date of installment 1; the rest follow every 30 days.
    pub first_due_date: NaiveDate,
}

impl From<BoletoRequest> for NewBoleto {
    fn from(r: BoletoRequest) -> Self {
        Self {
            client_id: r.client_id,
            description: r.description,
            total_amount: r.total_amount,
            installment_count: r.installment_count,
            first_due_date: r.first_due_date,
        }
    }
}

/// Query parameters for paying an installment.
#[derive(Debug, Default, Deserialize)]
pub struct PayQuery {
    /// Defaults to today.
    pub payment_date: Option<NaiveDate>,
}

/// Loads a boleto, changes one installment and persists it with the
/// re-derived total.
async fn update_parcela<F>(
    state: &AppState,
    id: BoletoId,
    number: u32,
    change: F,
) -> ApiResult<Json<BoletoWithStatus>>
where
    F: FnOnce(&mut BoletoParcela) -> Result<(), BoletoError>,
{
    let today = today();
    let repo = BoletoRepository::new(state.conn());
    let mut boleto = repo.get(id, today).await?;

    boleto.update_parcela(number, change)?;
    repo.save_parcela(&boleto, number).await?;
    info!(boleto_id = %id, number, total = %boleto.total_amount, "Installment updated");

    Ok(Json(BoletoWithStatus::new(boleto, today)))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /boletos - Newest first, with aggregate status.
async fn list_boletos(
    State(state): State<AppState>,
    Query(query): Query<BoletoListQuery>,
) -> ApiResult<Json<Vec<BoletoWithStatus>>> {
    let today = today();
    let boletos = BoletoRepository::new(state.conn())
        .list(query.client_id, today)
        .await?;

    Ok(Json(
        boletos
            .into_iter()
            .map(|b| BoletoWithStatus::new(b, today))
            .collect(),
    ))
}

/// GET /boletos/{id}
async fn get_boleto(
    State(state): State<AppState>,
    Path(id): Path<BoletoId>,
) -> ApiResult<Json<BoletoWithStatus>> {
    let today = today();
    let boleto = BoletoRepository::new(state.conn()).get(id, today).await?;
    Ok(Json(BoletoWithStatus::new(boleto, today)))
}

/// POST /boletos - Generates the installment schedule and stores it.
async fn create_boleto(
    State(state): State<AppState>,
    Json(payload): Json<BoletoRequest>,
) -> ApiResult<(StatusCode, Json<BoletoWithStatus>)> {
    payload.validate()?;

    let boleto = BoletoService::plan(&payload.into(), Utc::now())?;
    let stored = BoletoRepository::new(state.conn()).create(&boleto).await?;
    info!(
        boleto_id = %stored.id,
        client_id = %stored.client_id,
        total = %stored.total_amount,
        installments = stored.installment_count,
        "Boleto created"
    );

    Ok((
        StatusCode::CREATED,
        Json(BoletoWithStatus::new(stored, today())),
    ))
}

/// DELETE /boletos/{id}
async fn delete_boleto(
    State(state): State<AppState>,
    Path(id): Path<BoletoId>,
) -> ApiResult<StatusCode> {
    BoletoRepository::new(state.conn()).delete(id).await?;
    info!(boleto_id = %id, "Boleto deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /boletos/{id}/parcelas/{number}/pay
async fn pay_parcela(
    State(state): State<AppState>,
    Path((id, number)): Path<(BoletoId, u32)>,
    Query(query): Query<PayQuery>,
) -> ApiResult<Json<BoletoWithStatus>> {
    let on = query.payment_date.unwrap_or_else(today);
    update_parcela(&state, id, number, |p| pay(p, on)).await
}

/// POST /boletos/{id}/parcelas/{number}/cancel
async fn cancel_parcela(
    State(state): State<AppState>,
    Path((id, number)): Path<(BoletoId, u32)>,
) -> ApiResult<Json<BoletoWithStatus>> {
    update_parcela(&state, id, number, cancel).await
}

/// PUT /boletos/{id}/parcelas/{number} - Operator edit; any status may be set.
/// A value change moves the boleto total with it.
async fn edit_parcela(
    State(state): State<AppState>,
    Path((id, number)): Path<(BoletoId, u32)>,
    Json(edit): Json<ParcelaEdit>,
) -> ApiResult<Json<BoletoWithStatus>> {
    let today = today();
    update_parcela(&state, id, number, |p| apply_edit(p, &edit, today)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn request(count: i32) -> BoletoRequest {
        BoletoRequest {
            client_id: ClientId::new(),
            description: "Reforma do telhado".to_string(),
            total_amount: dec!(1000),
            installment_count: count,
            first_due_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(36, true)]
    #[case(37, false)]
    fn test_installment_count_range(#[case] count: i32, #[case] valid: bool) {
        assert_eq!(request(count).validate().is_ok(), valid);
    }

    #[test]
    fn test_request_plans_schedule() {
        let boleto = BoletoService::plan(&request(3).into(), Utc::now()).unwrap();
        let values: Vec<Decimal> = boleto.parcelas.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![dec!(333.33), dec!(333.33), dec!(333.34)]);
    }
}
