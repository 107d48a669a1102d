//! User repository for operator accounts.

use gestao_core::auth::Operator;
use gestao_shared::types::UserId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::users;

impl From<users::Model> for Operator {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::from(model.id),
            email: model.email,
            full_name: model.full_name,
            is_active: model.is_active,
            created_at: model.created_at.into(),
        }
    }
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email. The email is normalized before lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(Operator::normalize_email(email)))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(Operator::normalize_email(email)),
            password_hash: Set(password_hash.to_string()),
            full_name: Set(full_name.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(Operator::normalize_email(email)))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    fn model() -> users::Model {
        let now = Utc::now().into();
        users::Model {
            id: Uuid::now_v7(),
            email: "admin@gestao.local".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            full_name: "Administrador".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_email_normalizes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model()]])
            .into_connection();
        let repo = UserRepository::new(db.clone());

        let user = repo.find_by_email("  Admin@Gestao.LOCAL ").await.unwrap();
        assert!(user.is_some());

        let log = db.into_transaction_log();
        let sql = format!("{log:?}");
        assert!(sql.contains("admin@gestao.local"));
    }

    #[test]
    fn test_operator_from_model() {
        let m = model();
        let id = m.id;
        let operator = Operator::from(m);

        assert_eq!(operator.id.into_inner(), id);
        assert_eq!(operator.full_name, "Administrador");
    }
}
