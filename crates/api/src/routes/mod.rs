//! API route definitions.

use axum::{Router, middleware};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod boletos;
pub mod budgets;
pub mod clients;
pub mod costs;
pub mod employees;
pub mod health;
pub mod products;
pub mod reports;

/// Creates the API router with public routes and auth-protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(clients::routes())
        .merge(products::routes())
        .merge(budgets::routes())
        .merge(employees::routes())
        .merge(costs::routes())
        .merge(boletos::routes())
        .merge(reports::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// `year`/`month` query parameters; absent values mean the current month.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MonthQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Calendar month (1-12).
    pub month: Option<u32>,
}

impl MonthQuery {
    /// Resolves the requested month against `today`.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> (i32, u32) {
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

/// Today's date in UTC.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
