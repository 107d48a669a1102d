//! Client repository, including the denormalized `budget_ids` list.

use chrono::Utc;
use gestao_core::client::{self, Client, ClientInput, normalize_document};
use gestao_shared::types::{BudgetId, ClientId, PageRequest};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::error::RepositoryError;
use crate::entities::{boletos, clients};

fn budget_ids_from_json(value: &serde_json::Value) -> Result<Vec<BudgetId>, RepositoryError> {
    serde_json::from_value(value.clone())
        .map_err(|e| RepositoryError::Corrupt(format!("clients.budget_ids: {e}")))
}

fn budget_ids_to_json(ids: &[BudgetId]) -> serde_json::Value {
    serde_json::Value::Array(
        ids.iter()
            .map(|id| serde_json::Value::String(id.to_string()))
            .collect(),
    )
}

fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn clean_document(value: Option<String>) -> Option<String> {
    value
        .map(|d| normalize_document(&d))
        .filter(|d| !d.is_empty())
}

impl TryFrom<clients::Model> for Client {
    type Error = RepositoryError;

    fn try_from(model: clients::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            budget_ids: budget_ids_from_json(&model.budget_ids)?,
            id: ClientId::from(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            document: model.document,
            address: model.address,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Adds `budget_id` to the client's back-references.
pub(crate) async fn link_budget<C: ConnectionTrait>(
    conn: &C,
    client_id: ClientId,
    budget_id: BudgetId,
) -> Result<(), RepositoryError> {
    let model = clients::Entity::find_by_id(client_id.into_inner())
        .one(conn)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Client", client_id))?;

    let mut ids = budget_ids_from_json(&model.budget_ids)?;
    if client::link_budget(&mut ids, budget_id) {
        let mut active: clients::ActiveModel = model.into();
        active.budget_ids = Set(budget_ids_to_json(&ids));
        active.updated_at = Set(Utc::now().into());
        active.update(conn).await?;
    }
    Ok(())
}

/// Removes `budget_id` from the client's back-references. A missing client is ignored.
pub(crate) async fn unlink_budget<C: ConnectionTrait>(
    conn: &C,
    client_id: ClientId,
    budget_id: BudgetId,
) -> Result<(), RepositoryError> {
    let Some(model) = clients::Entity::find_by_id(client_id.into_inner()).one(conn).await? else {
        debug!(client_id = %client_id, "Client gone, nothing to unlink");
        return Ok(());
    };

    let mut ids = budget_ids_from_json(&model.budget_ids)?;
    if client::unlink_budget(&mut ids, budget_id) {
        let mut active: clients::ActiveModel = model.into();
        active.budget_ids = Set(budget_ids_to_json(&ids));
        active.updated_at = Set(Utc::now().into());
        active.update(conn).await?;
    }
    Ok(())
}

/// Client repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    db: DatabaseConnection,
}

impl ClientRepository {
    /// Creates a new client repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists clients by name, optionally matching `search` against name,
    /// email or document.
    ///
    /// Returns the page and the total number of matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is corrupt.
    pub async fn list(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<(Vec<Client>, u64), RepositoryError> {
        let mut query = clients::Entity::find().order_by_asc(clients::Column::Name);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", term.to_lowercase());
            let mut condition = Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(clients::Column::Name))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(clients::Column::Email))).like(pattern));
            let digits = normalize_document(term);
            if !digits.is_empty() {
                condition = condition.add(clients::Column::Document.contains(digits));
            }
            query = query.filter(condition);
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(u64::from(page.page() - 1)).await?;

        let clients = models
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((clients, total))
    }

    /// Gets a client by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist.
    pub async fn get(&self, id: ClientId) -> Result<Client, RepositoryError> {
        clients::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Client", id))
            .and_then(Client::try_from)
    }

    /// Creates a client with no budgets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: ClientInput) -> Result<Client, RepositoryError> {
        let now = Utc::now().into();
        let model = clients::ActiveModel {
            id: Set(ClientId::new().into_inner()),
            name: Set(input.name.trim().to_string()),
            email: Set(clean(input.email)),
            phone: Set(clean(input.phone)),
            document: Set(clean_document(input.document)),
            address: Set(clean(input.address)),
            budget_ids: Set(budget_ids_to_json(&[])),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Client::try_from(model)
    }

    /// Replaces a client's contact details. `budget_ids` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist.
    pub async fn update(&self, id: ClientId, input: ClientInput) -> Result<Client, RepositoryError> {
        let model = clients::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Client", id))?;

        let mut active: clients::ActiveModel = model.into();
        active.name = Set(input.name.trim().to_string());
        active.email = Set(clean(input.email));
        active.phone = Set(clean(input.phone));
        active.document = Set(clean_document(input.document));
        active.address = Set(clean(input.address));
        active.updated_at = Set(Utc::now().into());

        Client::try_from(active.update(&self.db).await?)
    }

    /// Deletes a client that has no budgets or boletos.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist and `Conflict` if
    /// budgets or boletos still reference it.
    pub async fn delete(&self, id: ClientId) -> Result<(), RepositoryError> {
        let client = self.get(id).await?;
        if !client.budget_ids.is_empty() {
            return Err(RepositoryError::Conflict(format!(
                "Client has {} budget(s)",
                client.budget_ids.len()
            )));
        }

        let boleto_count = boletos::Entity::find()
            .filter(boletos::Column::ClientId.eq(id.into_inner()))
            .count(&self.db)
            .await?;
        if boleto_count > 0 {
            return Err(RepositoryError::Conflict(format!(
                "Client has {boleto_count} boleto(s)"
            )));
        }

        clients::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(budget_ids: &[BudgetId]) -> clients::Model {
        let now = Utc::now().into();
        clients::Model {
            id: ClientId::new().into_inner(),
            name: "Construtora Boa Vista".to_string(),
            email: Some("contato@boavista.com.br".to_string()),
            phone: None,
            document: Some("12345678000190".to_string()),
            address: None,
            budget_ids: budget_ids_to_json(budget_ids),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_budget_ids_json_round_trip() {
        let ids = vec![BudgetId::new(), BudgetId::new()];
        assert_eq!(budget_ids_from_json(&budget_ids_to_json(&ids)).unwrap(), ids);
    }

    #[test]
    fn test_corrupt_budget_ids() {
        let mut m = model(&[]);
        m.budget_ids = serde_json::json!({"not": "a list"});
        assert!(matches!(Client::try_from(m), Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn test_clean_document_keeps_digits() {
        assert_eq!(
            clean_document(Some("12.345.678/0001-90".to_string())),
            Some("12345678000190".to_string())
        );
        assert_eq!(clean_document(Some(" - ".to_string())), None);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<clients::Model>::new()])
            .into_connection();
        let repo = ClientRepository::new(db);

        let result = repo.get(ClientId::new()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { entity: "Client", .. })));
    }

    #[tokio::test]
    async fn test_delete_with_budgets_conflicts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(&[BudgetId::new()])]])
            .into_connection();
        let repo = ClientRepository::new(db);

        let result = repo.delete(ClientId::new()).await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create() {
        let stored = model(&[]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let repo = ClientRepository::new(db);

        let client = repo
            .create(ClientInput {
                name: " Construtora Boa Vista ".to_string(),
                document: Some("12.345.678/0001-90".to_string()),
                ..ClientInput::default()
            })
            .await
            .unwrap();

        assert_eq!(client.name, stored.name);
        assert!(client.budget_ids.is_empty());
    }
}
