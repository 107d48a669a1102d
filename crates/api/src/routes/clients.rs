//! Client routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use gestao_core::client::{Client, ClientInput};
use gestao_db::ClientRepository;
use gestao_shared::types::ClientId;
use gestao_shared::types::pagination::{PageRequest, PageResponse};

/// Creates the client routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
}

/// Query parameters for listing clients.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListQuery {
    /// Matches name, email or document.
    pub search: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

impl ClientListQuery {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// Request body for creating or updating a client.
#[derive(Debug, Deserialize, Validate)]
pub struct ClientRequest {
    /// Name or company name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Contact email.
    #[validate(email)]
    pub email: Option<String>,
    /// Contact phone.
    #[validate(length(max = 40))]
    pub phone: Option<String>,
    /// CPF or CNPJ, formatted or digits only.
    #[validate(length(max = 20))]
    pub document: Option<String>,
    /// Postal address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

impl From<ClientRequest> for ClientInput {
    fn from(r: ClientRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            document: r.document,
            address: r.address,
        }
    }
}

/// GET /clients - List clients by name.
async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> ApiResult<Json<PageResponse<Client>>> {
    let page = query.page_request();
    let (clients, total) = ClientRepository::new(state.conn())
        .list(query.search.as_deref(), &page)
        .await?;

    Ok(Json(PageResponse::new(clients, &page, total)))
}

/// GET /clients/{id}
async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> ApiResult<Json<Client>> {
    Ok(Json(ClientRepository::new(state.conn()).get(id).await?))
}

/// POST /clients
async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<ClientRequest>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    payload.validate()?;

    let client = ClientRepository::new(state.conn())
        .create(payload.into())
        .await?;
    info!(client_id = %client.id, "Client created");

    Ok((StatusCode::CREATED, Json(client)))
}

/// PUT /clients/{id}
async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
    Json(payload): Json<ClientRequest>,
) -> ApiResult<Json<Client>> {
    payload.validate()?;

    let client = ClientRepository::new(state.conn())
        .update(id, payload.into())
        .await?;
    info!(client_id = %id, "Client updated");

    Ok(Json(client))
}

/// DELETE /clients/{id} - Refused while budgets or boletos reference the client.
async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> ApiResult<StatusCode> {
    ClientRepository::new(state.conn()).delete(id).await?;
    info!(client_id = %id, "Client deleted");

    Ok(StatusCode::NO_CONTENT)
}
