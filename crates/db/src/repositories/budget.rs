//! Budget repository. A budget and its items are written together.

use std::collections::HashMap;

use gestao_core::budget::{
    Budget, BudgetAdjustments, BudgetItem, BudgetStatus, BudgetTotals,
};
use gestao_shared::types::{BudgetId, ClientId, ProductId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::client::{link_budget, unlink_budget};
use super::error::RepositoryError;
use crate::entities::{budget_items, budgets, sea_orm_active_enums};

/// Filters for listing budgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetFilter {
    /// Only this status.
    pub status: Option<BudgetStatus>,
    /// Only this client's budgets.
    pub client_id: Option<ClientId>,
}

fn item_from_model(model: budget_items::Model) -> BudgetItem {
    BudgetItem {
        product_id: ProductId::from(model.product_id),
        product_name: model.product_name,
        quantity: model.quantity,
        unit_price: model.unit_price,
        unit_cost: model.unit_cost,
        total_price: model.total_price,
    }
}

fn budget_from_models(model: budgets::Model, items: Vec<budget_items::Model>) -> Budget {
    Budget {
        id: BudgetId::from(model.id),
        client_id: ClientId::from(model.client_id),
        title: model.title,
        status: model.status.into(),
        items: items.into_iter().map(item_from_model).collect(),
        adjustments: BudgetAdjustments {
            discount: model.discount,
            shipping: model.shipping,
            tax: model.tax,
        },
        totals: BudgetTotals {
            subtotal: model.subtotal,
            total_amount: model.total_amount,
            material_cost: model.material_cost,
        },
        valid_until: model.valid_until,
        notes: model.notes,
        approved_at: model.approved_at.map(Into::into),
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

fn budget_active(budget: &Budget) -> budgets::ActiveModel {
    budgets::ActiveModel {
        id: Set(budget.id.into_inner()),
        client_id: Set(budget.client_id.into_inner()),
        title: Set(budget.title.clone()),
        status: Set(budget.status.into()),
        subtotal: Set(budget.totals.subtotal),
        discount: Set(budget.adjustments.discount),
        shipping: Set(budget.adjustments.shipping),
        tax: Set(budget.adjustments.tax),
        total_amount: Set(budget.totals.total_amount),
        material_cost: Set(budget.totals.material_cost),
        valid_until: Set(budget.valid_until),
        notes: Set(budget.notes.clone()),
        approved_at: Set(budget.approved_at.map(Into::into)),
        created_at: Set(budget.created_at.into()),
        updated_at: Set(budget.updated_at.into()),
    }
}

async fn insert_items<C: ConnectionTrait>(conn: &C, budget: &Budget) -> Result<(), RepositoryError> {
    if budget.items.is_empty() {
        return Ok(());
    }

    let rows = budget.items.iter().zip(0i32..).map(|(item, position)| budget_items::ActiveModel {
        id: Set(Uuid::now_v7()),
        budget_id: Set(budget.id.into_inner()),
        position: Set(position),
        product_id: Set(item.product_id.into_inner()),
        product_name: Set(item.product_name.clone()),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
        unit_cost: Set(item.unit_cost),
        total_price: Set(item.total_price),
    });

    budget_items::Entity::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists budgets, newest first, with their items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: BudgetFilter) -> Result<Vec<Budget>, RepositoryError> {
        let mut query = budgets::Entity::find().order_by_desc(budgets::Column::CreatedAt);
        if let Some(status) = filter.status {
            query = query.filter(
                budgets::Column::Status.eq(sea_orm_active_enums::BudgetStatus::from(status)),
            );
        }
        if let Some(client_id) = filter.client_id {
            query = query.filter(budgets::Column::ClientId.eq(client_id.into_inner()));
        }

        let models = query.all(&self.db).await?;
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut items_by_budget: HashMap<Uuid, Vec<budget_items::Model>> = HashMap::new();
        for item in budget_items::Entity::find()
            .filter(budget_items::Column::BudgetId.is_in(ids))
            .order_by_asc(budget_items::Column::Position)
            .all(&self.db)
            .await?
        {
            items_by_budget.entry(item.budget_id).or_default().push(item);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let items = items_by_budget.remove(&m.id).unwrap_or_default();
                budget_from_models(m, items)
            })
            .collect())
    }

    /// Gets a budget with its items.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget does not exist.
    pub async fn get(&self, id: BudgetId) -> Result<Budget, RepositoryError> {
        let model = budgets::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Budget", id))?;

        let items = budget_items::Entity::find()
            .filter(budget_items::Column::BudgetId.eq(model.id))
            .order_by_asc(budget_items::Column::Position)
            .all(&self.db)
            .await?;

        Ok(budget_from_models(model, items))
    }

    /// Stores a new budget, its items and the client back-reference.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist.
    pub async fn create(&self, budget: &Budget) -> Result<Budget, RepositoryError> {
        let txn = self.db.begin().await?;

        link_budget(&txn, budget.client_id, budget.id).await?;
        budget_active(budget).insert(&txn).await?;
        insert_items(&txn, budget).await?;

        txn.commit().await?;
        debug!(budget_id = %budget.id, items = budget.items.len(), "Budget stored");

        self.get(budget.id).await
    }

    /// Replaces a budget and its items. Moves the back-reference when the
    /// client changed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the new client does not exist.
    pub async fn update(
        &self,
        budget: &Budget,
        previous_client: ClientId,
    ) -> Result<Budget, RepositoryError> {
        let txn = self.db.begin().await?;

        if previous_client != budget.client_id {
            link_budget(&txn, budget.client_id, budget.id).await?;
            unlink_budget(&txn, previous_client, budget.id).await?;
        }

        budget_active(budget).update(&txn).await?;
        budget_items::Entity::delete_many()
            .filter(budget_items::Column::BudgetId.eq(budget.id.into_inner()))
            .exec(&txn)
            .await?;
        insert_items(&txn, budget).await?;

        txn.commit().await?;

        self.get(budget.id).await
    }

    /// Persists status and approval date only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn save_status(&self, budget: &Budget) -> Result<(), RepositoryError> {
        let active = budgets::ActiveModel {
            id: Set(budget.id.into_inner()),
            status: Set(budget.status.into()),
            approved_at: Set(budget.approved_at.map(Into::into)),
            updated_at: Set(budget.updated_at.into()),
            ..Default::default()
        };
        active.update(&self.db).await?;
        Ok(())
    }

    /// Deletes a budget, its items and the client back-reference.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget does not exist.
    pub async fn delete(&self, id: BudgetId) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let model = budgets::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Budget", id))?;

        budget_items::Entity::delete_many()
            .filter(budget_items::Column::BudgetId.eq(model.id))
            .exec(&txn)
            .await?;
        budgets::Entity::delete_by_id(model.id).exec(&txn).await?;
        unlink_budget(&txn, ClientId::from(model.client_id), id).await?;

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn budget_model(id: Uuid) -> budgets::Model {
        let now = Utc::now().into();
        budgets::Model {
            id,
            client_id: Uuid::now_v7(),
            title: "Reforma fachada".to_string(),
            status: sea_orm_active_enums::BudgetStatus::Approved,
            subtotal: dec!(1000),
            discount: dec!(50),
            shipping: dec!(30),
            tax: dec!(0),
            total_amount: dec!(980),
            material_cost: dec!(600),
            valid_until: None,
            notes: None,
            approved_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn item_model(budget_id: Uuid, position: i32) -> budget_items::Model {
        budget_items::Model {
            id: Uuid::now_v7(),
            budget_id,
            position,
            product_id: Uuid::now_v7(),
            product_name: format!("Item {position}"),
            quantity: dec!(2),
            unit_price: dec!(250),
            unit_cost: dec!(150),
            total_price: dec!(500),
        }
    }

    #[tokio::test]
    async fn test_get_assembles_items() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![budget_model(id)]])
            .append_query_results([vec![item_model(id, 0), item_model(id, 1)]])
            .into_connection();
        let repo = BudgetRepository::new(db);

        let budget = repo.get(BudgetId::from(id)).await.unwrap();

        assert_eq!(budget.status, BudgetStatus::Approved);
        assert_eq!(budget.items.len(), 2);
        assert_eq!(budget.items[1].product_name, "Item 1");
        assert_eq!(budget.adjustments.discount, dec!(50));
        assert_eq!(budget.totals.total_amount, dec!(980));
        assert!(budget.approved_at.is_some());
    }

    #[tokio::test]
    async fn test_list_groups_items_by_budget() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![budget_model(a), budget_model(b)]])
            .append_query_results([vec![item_model(a, 0), item_model(b, 0), item_model(a, 1)]])
            .into_connection();
        let repo = BudgetRepository::new(db);

        let budgets = repo
            .list(BudgetFilter {
                status: Some(BudgetStatus::Approved),
                client_id: None,
            })
            .await
            .unwrap();

        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].items.len(), 2);
        assert_eq!(budgets[1].items.len(), 1);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<budgets::Model>::new()])
            .into_connection();
        let repo = BudgetRepository::new(db);

        assert!(matches!(
            repo.get(BudgetId::new()).await,
            Err(RepositoryError::NotFound { entity: "Budget", .. })
        ));
    }
}
