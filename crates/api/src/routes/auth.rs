//! Operator sign-in and session routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::{AppState, middleware::AuthUser};
use gestao_core::auth::{Operator, verify_password};
use gestao_db::UserRepository;
use gestao_shared::AppError;

/// Routes reachable without a session.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Routes that need a session.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Request body for signing in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Operator email.
    #[validate(email)]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful sign-in.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Signed-in operator.
    pub user: Operator,
}

fn invalid_credentials() -> ApiError {
    ApiError(AppError::Unauthorized("Invalid email or password".to_string()))
}

/// POST /auth/login - Authenticate an operator and open a session.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    payload.validate()?;

    let user_repo = UserRepository::new(state.conn());
    let Some(user) = user_repo.find_by_email(&payload.email).await? else {
        info!(email = %payload.email, "Login attempt for unknown operator");
        return Err(invalid_credentials());
    };

    if !user.is_active {
        info!(user_id = %user.id, "Login attempt for disabled operator");
        return Err(invalid_credentials());
    }

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(invalid_credentials());
    }

    let session = state.jwt_service.issue_session(user.id, &user.email)?;
    info!(user_id = %user.id, "Operator logged in");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        user: Operator::from(user),
    }))
}

/// GET /auth/me - Current operator.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Operator>> {
    let user_repo = UserRepository::new(state.conn());
    let user = user_repo
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("User", auth.user_id()))?;

    Ok(Json(Operator::from(user)))
}
