//! Conversion of domain errors into JSON error responses.
//!
//! Every handler returns `Result<_, ApiError>`. The body always has the
//! shape `{"error": <code>, "message": <text>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

use gestao_core::auth::PasswordError;
use gestao_core::boleto::BoletoError;
use gestao_core::budget::BudgetError;
use gestao_core::cost::CostError;
use gestao_core::employee::EmployeeError;
use gestao_core::payroll::PayrollError;
use gestao_core::product::ProductError;
use gestao_core::reports::ReportError;
use gestao_db::RepositoryError;
use gestao_shared::{AppError, JwtError};

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by route handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Shorthand for a 400 with a custom message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// Shorthand for a 404 on a named collection.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self(AppError::not_found(entity, id))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_internal() {
            error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        Self(match e {
            RepositoryError::NotFound { entity, id } => AppError::not_found(entity, id),
            RepositoryError::Conflict(msg) => AppError::Conflict(msg),
            RepositoryError::Corrupt(msg) => AppError::Internal(format!("corrupt row: {msg}")),
            RepositoryError::Database(db) => AppError::Database(db.to_string()),
        })
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self(AppError::Database(e.to_string()))
    }
}

impl From<BudgetError> for ApiError {
    fn from(e: BudgetError) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<BoletoError> for ApiError {
    fn from(e: BoletoError) -> Self {
        Self(match e {
            BoletoError::IllegalTransition { .. } => AppError::BusinessRule(e.to_string()),
            BoletoError::ParcelaNotFound(number) => AppError::not_found("Parcela", number),
            _ => AppError::Validation(e.to_string()),
        })
    }
}

impl From<PayrollError> for ApiError {
    fn from(e: PayrollError) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        Self(match e {
            ReportError::InvalidMonth { .. } => AppError::Validation(e.to_string()),
            ReportError::Export(_) => AppError::Internal(e.to_string()),
        })
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<CostError> for ApiError {
    fn from(e: CostError) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<EmployeeError> for ApiError {
    fn from(e: EmployeeError) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self(AppError::Internal(e.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(e: JwtError) -> Self {
        Self(AppError::Internal(e.to_string()))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestao_core::boleto::ParcelaStatus;
    use http_body_util::BodyExt;
    use rstest::rstest;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) =
            body_json(RepositoryError::not_found("Client", "abc").into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Not found: Client abc");
    }

    #[tokio::test]
    async fn test_database_error_is_hidden() {
        let err = RepositoryError::Database(sea_orm::DbErr::Custom("password=secret".into()));
        let (status, body) = body_json(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "DATABASE_ERROR");
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[rstest]
    #[case(BoletoError::IllegalTransition { from: ParcelaStatus::Pago, to: ParcelaStatus::Cancelado }, 422)]
    #[case(BoletoError::ParcelaNotFound(7), 404)]
    #[case(BoletoError::NonPositiveTotal, 400)]
    #[case(BoletoError::InstallmentCountOutOfRange { count: 40, max: 36 }, 400)]
    fn test_boleto_error_status(#[case] error: BoletoError, #[case] status: u16) {
        assert_eq!(ApiError::from(error).0.status_code(), status);
    }

    #[tokio::test]
    async fn test_discount_over_total_is_validation_error() {
        let (status, body) = body_json(BudgetError::DiscountExceedsTotal.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(ApiError::from(BudgetError::NoItems).0.status_code(), 400);
    }
}
