//! Product catalog repository.

use chrono::Utc;
use gestao_core::product::{Product, ProductCategory, ProductInput};
use gestao_shared::types::ProductId;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::error::RepositoryError;
use crate::entities::{products, sea_orm_active_enums};

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: ProductId::from(model.id),
            name: model.name,
            description: model.description,
            category: model.category.into(),
            sale_price: model.sale_price,
            cost_price: model.cost_price,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Filters for listing products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Only this category.
    pub category: Option<ProductCategory>,
    /// Case-insensitive name match.
    pub search: Option<String>,
}

/// Product repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists products by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query = products::Entity::find().order_by_asc(products::Column::Name);

        if let Some(category) = filter.category {
            query = query.filter(
                products::Column::Category.eq(sea_orm_active_enums::ProductCategory::from(category)),
            );
        }
        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(products::Column::Name)))
                    .like(format!("%{}%", term.to_lowercase())),
            );
        }

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    /// Loads the given products; unknown IDs are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = products::Entity::find()
            .filter(products::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    /// Gets a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        products::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(Product::from)
            .ok_or_else(|| RepositoryError::not_found("Product", id))
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: ProductInput) -> Result<Product, RepositoryError> {
        let now = Utc::now().into();
        let model = products::ActiveModel {
            id: Set(ProductId::new().into_inner()),
            name: Set(input.name.trim().to_string()),
            description: Set(input.description),
            category: Set(input.category.into()),
            sale_price: Set(input.sale_price),
            cost_price: Set(input.cost_price),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    /// Replaces a product. Existing budgets keep their price snapshots.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    pub async fn update(&self, id: ProductId, input: ProductInput) -> Result<Product, RepositoryError> {
        let model = products::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Product", id))?;

        let mut active: products::ActiveModel = model.into();
        active.name = Set(input.name.trim().to_string());
        active.description = Set(input.description);
        active.category = Set(input.category.into());
        active.sale_price = Set(input.sale_price);
        active.cost_price = Set(input.cost_price);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?.into())
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = products::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Product", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model() -> products::Model {
        let now = Utc::now().into();
        products::Model {
            id: ProductId::new().into_inner(),
            name: "Argamassa AC-II 20kg".to_string(),
            description: None,
            category: sea_orm_active_enums::ProductCategory::Material,
            sale_price: dec!(32.90),
            cost_price: dec!(21.50),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_maps_category() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model()]])
            .into_connection();
        let repo = ProductRepository::new(db);

        let products = repo
            .list(&ProductFilter {
                category: Some(ProductCategory::Material),
                search: Some("argamassa".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category, ProductCategory::Material);
        assert_eq!(products[0].sale_price, dec!(32.90));
    }

    #[tokio::test]
    async fn test_find_many_empty_skips_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = ProductRepository::new(db.clone());

        assert!(repo.find_many(&[]).await.unwrap().is_empty());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = ProductRepository::new(db);

        assert!(matches!(
            repo.delete(ProductId::new()).await,
            Err(RepositoryError::NotFound { .. })
        ));
    }
}
