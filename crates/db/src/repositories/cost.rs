//! Fixed and variable cost repository.

use chrono::{NaiveDate, Utc};
use gestao_core::cost::{CostCategory, CostInput, FixedCost, VariableCost};
use gestao_shared::types::{FixedCostId, VariableCostId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::error::RepositoryError;
use crate::entities::{fixed_costs, sea_orm_active_enums, variable_costs};

impl From<fixed_costs::Model> for FixedCost {
    fn from(model: fixed_costs::Model) -> Self {
        Self {
            id: FixedCostId::from(model.id),
            description: model.description,
            category: model.category.into(),
            amount: model.amount,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<variable_costs::Model> for VariableCost {
    fn from(model: variable_costs::Model) -> Self {
        Self {
            id: VariableCostId::from(model.id),
            description: model.description,
            category: model.category.into(),
            amount: model.amount,
            date: model.date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Filters for listing variable costs. Date bounds are inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableCostFilter {
    /// Earliest date.
    pub from: Option<NaiveDate>,
    /// Latest date.
    pub to: Option<NaiveDate>,
    /// Only this category.
    pub category: Option<CostCategory>,
}

/// Repository for both cost tables.
#[derive(Debug, Clone)]
pub struct CostRepository {
    db: DatabaseConnection,
}

impl CostRepository {
    /// Creates a new cost repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Fixed costs
    // ========================================================================

    /// Lists fixed costs, optionally for one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_fixed(
        &self,
        category: Option<CostCategory>,
    ) -> Result<Vec<FixedCost>, RepositoryError> {
        let mut query = fixed_costs::Entity::find().order_by_asc(fixed_costs::Column::Description);
        if let Some(category) = category {
            query = query.filter(
                fixed_costs::Column::Category.eq(sea_orm_active_enums::CostCategory::from(category)),
            );
        }
        Ok(query.all(&self.db).await?.into_iter().map(FixedCost::from).collect())
    }

    /// Gets a fixed cost by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the cost does not exist.
    pub async fn get_fixed(&self, id: FixedCostId) -> Result<FixedCost, RepositoryError> {
        fixed_costs::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(FixedCost::from)
            .ok_or_else(|| RepositoryError::not_found("Fixed cost", id))
    }

    /// Creates a fixed cost. `input.date` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_fixed(&self, input: CostInput) -> Result<FixedCost, RepositoryError> {
        let now = Utc::now().into();
        let model = fixed_costs::ActiveModel {
            id: Set(FixedCostId::new().into_inner()),
            description: Set(input.description.trim().to_string()),
            category: Set(input.category.into()),
            amount: Set(input.amount),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    /// Replaces a fixed cost.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the cost does not exist.
    pub async fn update_fixed(
        &self,
        id: FixedCostId,
        input: CostInput,
    ) -> Result<FixedCost, RepositoryError> {
        let model = fixed_costs::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Fixed cost", id))?;

        let mut active: fixed_costs::ActiveModel = model.into();
        active.description = Set(input.description.trim().to_string());
        active.category = Set(input.category.into());
        active.amount = Set(input.amount);
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?.into())
    }

    /// Deletes a fixed cost.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete_fixed(&self, id: FixedCostId) -> Result<(), RepositoryError> {
        let result = fixed_costs::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Fixed cost", id));
        }
        Ok(())
    }

    // ========================================================================
    // Variable costs
    // ========================================================================

    /// Lists variable costs, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_variable(
        &self,
        filter: VariableCostFilter,
    ) -> Result<Vec<VariableCost>, RepositoryError> {
        let mut query = variable_costs::Entity::find().order_by_desc(variable_costs::Column::Date);

        if let Some(from) = filter.from {
            query = query.filter(variable_costs::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(variable_costs::Column::Date.lte(to));
        }
        if let Some(category) = filter.category {
            query = query.filter(
                variable_costs::Column::Category
                    .eq(sea_orm_active_enums::CostCategory::from(category)),
            );
        }

        Ok(query.all(&self.db).await?.into_iter().map(VariableCost::from).collect())
    }

    /// Gets a variable cost by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the cost does not exist.
    pub async fn get_variable(&self, id: VariableCostId) -> Result<VariableCost, RepositoryError> {
        variable_costs::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(VariableCost::from)
            .ok_or_else(|| RepositoryError::not_found("Variable cost", id))
    }

    /// Creates a variable cost dated `input.date`, or today when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_variable(&self, input: CostInput) -> Result<VariableCost, RepositoryError> {
        let now = Utc::now();
        let model = variable_costs::ActiveModel {
            id: Set(VariableCostId::new().into_inner()),
            description: Set(input.description.trim().to_string()),
            category: Set(input.category.into()),
            amount: Set(input.amount),
            date: Set(input.date.unwrap_or_else(|| now.date_naive())),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    /// Replaces a variable cost. An absent date keeps the stored one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the cost does not exist.
    pub async fn update_variable(
        &self,
        id: VariableCostId,
        input: CostInput,
    ) -> Result<VariableCost, RepositoryError> {
        let model = variable_costs::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Variable cost", id))?;

        let mut active: variable_costs::ActiveModel = model.into();
        active.description = Set(input.description.trim().to_string());
        active.category = Set(input.category.into());
        active.amount = Set(input.amount);
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?.into())
    }

    /// Deletes a variable cost.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete_variable(&self, id: VariableCostId) -> Result<(), RepositoryError> {
        let result = variable_costs::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("Variable cost", id));
        }
        Ok(())
    }
}
