//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the back-office collections and reports
//! - Authentication middleware
//! - Mapping of domain errors to JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use axum::Router;
use gestao_core::payroll::PayrollRates;
use gestao_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for session tokens.
    pub jwt_service: Arc<JwtService>,
    /// Voucher rates used by the payroll estimator.
    pub payroll_rates: PayrollRates,
}

impl AppState {
    /// Clones the connection handle for a repository.
    #[must_use]
    pub fn conn(&self) -> DatabaseConnection {
        (*self.db).clone()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::AUTHORIZATION},
    };
    use chrono::{NaiveDate, Utc};
    use gestao_db::entities::{boleto_parcelas, boletos, sea_orm_active_enums::ParcelaStatus};
    use gestao_shared::{JwtConfig, types::UserId};
    use http_body_util::BodyExt;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;
    use uuid::Uuid;

    fn state(db: DatabaseConnection) -> AppState {
        AppState {
            db: Arc::new(db),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
            payroll_rates: PayrollRates::default(),
        }
    }

    fn empty_state() -> AppState {
        state(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn bearer(state: &AppState) -> String {
        let session = state
            .jwt_service
            .issue_session(UserId::new().into_inner(), "ops@example.com")
            .unwrap();
        format!("Bearer {}", session.token)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = create_router(empty_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let app = create_router(empty_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/clients")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"], "missing_token");
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let app = create_router(empty_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/reports/costs")
                    .header(AUTHORIZATION, "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"], "invalid_token");
    }

    #[tokio::test]
    async fn test_create_boleto_rejects_too_many_installments() {
        let state = empty_state();
        let token = bearer(&state);
        let app = create_router(state);

        let body = serde_json::json!({
            "client_id": Uuid::now_v7(),
            "description": "Mobília",
            "total_amount": "1200.00",
            "installment_count": 48,
            "first_due_date": "2025-05-10"
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/boletos")
                    .header(AUTHORIZATION, token)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_boleto_with_aggregate_status() {
        let id = Uuid::now_v7();
        let now = Utc::now().into();
        let due = |m| NaiveDate::from_ymd_opt(2099, m, 10).unwrap();
        let parcela = |number: i32, status: ParcelaStatus, payment_date: Option<NaiveDate>| {
            boleto_parcelas::Model {
                id: Uuid::now_v7(),
                boleto_id: id,
                number,
                value: dec!(250),
                due_date: due(u32::try_from(number).unwrap()),
                status,
                payment_date,
            }
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![boletos::Model {
                id,
                client_id: Uuid::now_v7(),
                description: "Cozinha planejada".to_string(),
                total_amount: dec!(500),
                installment_count: 2,
                first_due_date: due(1),
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([vec![
                parcela(1, ParcelaStatus::Pago, Some(due(1))),
                parcela(2, ParcelaStatus::Pendente, None),
            ]])
            .into_connection();
        let state = state(db);
        let token = bearer(&state);
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/boletos/{id}"))
                    .header(AUTHORIZATION, token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["aggregate_status"]["status"], "proximo_vencimento");
        assert_eq!(body["aggregate_status"]["due_date"], "2099-02-10");
        assert_eq!(body["status_label"], "Vence em 10/02/2099");
        assert_eq!(body["parcelas"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_parcela_value_moves_total() {
        let id = Uuid::now_v7();
        let now = Utc::now().into();
        let boleto = boletos::Model {
            id,
            client_id: Uuid::now_v7(),
            description: "Reforma do banheiro".to_string(),
            total_amount: dec!(500),
            installment_count: 2,
            first_due_date: NaiveDate::from_ymd_opt(2099, 1, 10).unwrap(),
            created_at: now,
            updated_at: now,
        };
        let parcelas: Vec<boleto_parcelas::Model> = (1..=2u32)
            .map(|number| boleto_parcelas::Model {
                id: Uuid::now_v7(),
                boleto_id: id,
                number: i32::try_from(number).unwrap(),
                value: dec!(250),
                due_date: NaiveDate::from_ymd_opt(2099, number, 10).unwrap(),
                status: ParcelaStatus::Pendente,
                payment_date: None,
            })
            .collect();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![boleto.clone()]])
            .append_query_results([parcelas.clone()])
            .append_query_results([vec![parcelas[1].clone()]])
            .append_query_results([vec![boleto]])
            .into_connection();
        let state = state(db);
        let token = bearer(&state);
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/v1/boletos/{id}/parcelas/2"))
                    .header(AUTHORIZATION, token)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value": "400.00"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["parcelas"][1]["value"], "400.00");
        assert_eq!(body["total_amount"], "650.00");
    }
}
