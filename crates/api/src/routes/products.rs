//! Product catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::AppState;
use crate::error::ApiResult;
use gestao_core::product::{Product, ProductCategory, ProductInput};
use gestao_db::{ProductFilter, ProductRepository};
use gestao_shared::types::ProductId;

/// Creates the product routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Query parameters for listing products.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Only this category.
    pub category: Option<ProductCategory>,
    /// Case-insensitive name match.
    pub search: Option<String>,
}

/// Request body for creating or updating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductRequest {
    /// Product name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Optional description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Category tag.
    pub category: ProductCategory,
    /// Public sale price.
    pub sale_price: Decimal,
    /// Internal cost price.
    pub cost_price: Decimal,
}

impl ProductRequest {
    fn into_input(self) -> ApiResult<ProductInput> {
        self.validate()?;
        let input = ProductInput {
            name: self.name,
            description: self.description,
            category: self.category,
            sale_price: self.sale_price,
            cost_price: self.cost_price,
        };
        input.validate()?;
        Ok(input)
    }
}

/// GET /products
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let filter = ProductFilter {
        category: query.category,
        search: query.search,
    };
    Ok(Json(ProductRepository::new(state.conn()).list(&filter).await?))
}

/// GET /products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<Json<Product>> {
    Ok(Json(ProductRepository::new(state.conn()).get(id).await?))
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = ProductRepository::new(state.conn())
        .create(payload.into_input()?)
        .await?;
    info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id} - Existing budgets keep their price snapshots.
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<Json<Product>> {
    let product = ProductRepository::new(state.conn())
        .update(id, payload.into_input()?)
        .await?;
    info!(product_id = %id, "Product updated");

    Ok(Json(product))
}

/// DELETE /products/{id}
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> ApiResult<StatusCode> {
    ProductRepository::new(state.conn()).delete(id).await?;
    info!(product_id = %id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
