//! Employee repository.

use chrono::Utc;
use gestao_core::employee::{Employee, EmployeeInput};
use gestao_shared::types::EmployeeId;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::error::RepositoryError;
use crate::entities::employees;

impl From<employees::Model> for Employee {
    fn from(model: employees::Model) -> Self {
        Self {
            id: EmployeeId::from(model.id),
            name: model.name,
            position: model.position,
            salary: model.salary,
            admission_date: model.admission_date,
            meal_voucher: model.meal_voucher,
            transport_voucher: model.transport_voucher,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Employee repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every employee by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let models = employees::Entity::find()
            .order_by_asc(employees::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Employee::from).collect())
    }

    /// Gets an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub async fn get(&self, id: EmployeeId) -> Result<Employee, RepositoryError> {
        employees::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(Employee::from)
            .ok_or_else(|| RepositoryError::not_found("Employee", id))
    }

    /// Creates an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, RepositoryError> {
        let now = Utc::now().into();
        let model = employees::ActiveModel {
            id: Set(EmployeeId::new().into_inner()),
            name: Set(input.name.trim().to_string()),
            position: Set(input.position.trim().to_string()),
            salary: Set(input.salary),
            admission_date: Set(input.admission_date),
            meal_voucher: Set(input.meal_voucher),
            transport_voucher: Set(input.transport_voucher),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    /// Replaces an employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist.
    pub async fn update(
        &self,
        id: EmployeeId,
        input: EmployeeInput,
    ) -> Result<Employee, RepositoryError> {
        let model = employees::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Employee", id))?;

        let mut active: employees::ActiveModel = model.into();
        active.name = Set(input.name.trim().to_string());
        active.position = Set(input.position.trim().to_string());
        active.salary = Set(input.salary);
        active.admission_date = Set(input.admission_date);
        active.meal_voucher = Set(input.meal_voucher);
        active.transport_voucher = Set(input.transport_voucher);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?.into())
    }

    /// Deletes an employee.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete(&self, id: EmployeeId) -> Result<(), RepositoryError> {
        let result = employees::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Employee", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_list() {
        let now = Utc::now().into();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![employees::Model {
                id: EmployeeId::new().into_inner(),
                name: "Carlos Pereira".to_string(),
                position: "Eletricista".to_string(),
                salary: dec!(3200),
                admission_date: NaiveDate::from_ymd_opt(2022, 5, 2).unwrap(),
                meal_voucher: true,
                transport_voucher: true,
                created_at: now,
                updated_at: now,
            }]])
            .into_connection();
        let repo = EmployeeRepository::new(db);

        let employees = repo.list().await.unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].salary, dec!(3200));
        assert!(employees[0].transport_voucher);
    }
}
