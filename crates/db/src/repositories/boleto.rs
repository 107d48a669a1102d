//! Boleto repository.
//!
//! Reads refresh overdue installments (`pendente` past due becomes
//! `vencido`) and persist the change before returning.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use gestao_core::boleto::{Boleto, BoletoParcela, refresh_overdue};
use gestao_shared::types::{BoletoId, ClientId, ParcelaId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::error::RepositoryError;
use crate::entities::{boleto_parcelas, boletos, clients, sea_orm_active_enums::ParcelaStatus};

fn parcela_from_model(model: boleto_parcelas::Model) -> Result<BoletoParcela, RepositoryError> {
    Ok(BoletoParcela {
        id: ParcelaId::from(model.id),
        boleto_id: BoletoId::from(model.boleto_id),
        number: u32::try_from(model.number)
            .map_err(|_| RepositoryError::Corrupt(format!("boleto_parcelas.number = {}", model.number)))?,
        value: model.value,
        due_date: model.due_date,
        status: model.status.into(),
        payment_date: model.payment_date,
    })
}

fn boleto_from_models(
    model: boletos::Model,
    parcelas: Vec<boleto_parcelas::Model>,
) -> Result<Boleto, RepositoryError> {
    Ok(Boleto {
        id: BoletoId::from(model.id),
        client_id: ClientId::from(model.client_id),
        description: model.description,
        total_amount: model.total_amount,
        installment_count: u32::try_from(model.installment_count).map_err(|_| {
            RepositoryError::Corrupt(format!("boletos.installment_count = {}", model.installment_count))
        })?,
        first_due_date: model.first_due_date,
        parcelas: parcelas
            .into_iter()
            .map(parcela_from_model)
            .collect::<Result<Vec<_>, _>>()?,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}

fn to_i32(value: u32, field: &str) -> Result<i32, RepositoryError> {
    i32::try_from(value).map_err(|_| RepositoryError::Corrupt(format!("{field} = {value}")))
}

async fn mark_overdue<C: ConnectionTrait>(conn: &C, ids: &[ParcelaId]) -> Result<(), RepositoryError> {
    if ids.is_empty() {
        return Ok(());
    }
    boleto_parcelas::Entity::update_many()
        .set(boleto_parcelas::ActiveModel {
            status: Set(ParcelaStatus::Vencido),
            ..Default::default()
        })
        .filter(boleto_parcelas::Column::Id.is_in(ids.iter().map(|id| id.into_inner())))
        .filter(boleto_parcelas::Column::Status.eq(ParcelaStatus::Pendente))
        .exec(conn)
        .await?;
    info!(count = ids.len(), "Installments marked overdue");
    Ok(())
}

/// Boleto repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BoletoRepository {
    db: DatabaseConnection,
}

impl BoletoRepository {
    /// Creates a new boleto repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists boletos, newest first, refreshing overdue installments as of `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        client_id: Option<ClientId>,
        today: NaiveDate,
    ) -> Result<Vec<Boleto>, RepositoryError> {
        let mut query = boletos::Entity::find().order_by_desc(boletos::Column::CreatedAt);
        if let Some(client_id) = client_id {
            query = query.filter(boletos::Column::ClientId.eq(client_id.into_inner()));
        }

        let models = query.all(&self.db).await?;
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut by_boleto: HashMap<Uuid, Vec<boleto_parcelas::Model>> = HashMap::new();
        for parcela in boleto_parcelas::Entity::find()
            .filter(boleto_parcelas::Column::BoletoId.is_in(ids))
            .order_by_asc(boleto_parcelas::Column::Number)
            .all(&self.db)
            .await?
        {
            by_boleto.entry(parcela.boleto_id).or_default().push(parcela);
        }

        let mut boletos = models
            .into_iter()
            .map(|m| {
                let parcelas = by_boleto.remove(&m.id).unwrap_or_default();
                boleto_from_models(m, parcelas)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let changed: Vec<ParcelaId> = boletos
            .iter_mut()
            .flat_map(|b| refresh_overdue(&mut b.parcelas, today))
            .collect();
        mark_overdue(&self.db, &changed).await?;

        Ok(boletos)
    }

    /// Gets a boleto, refreshing overdue installments as of `today`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the boleto does not exist.
    pub async fn get(&self, id: BoletoId, today: NaiveDate) -> Result<Boleto, RepositoryError> {
        let model = boletos::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Boleto", id))?;

        let parcelas = boleto_parcelas::Entity::find()
            .filter(boleto_parcelas::Column::BoletoId.eq(model.id))
            .order_by_asc(boleto_parcelas::Column::Number)
            .all(&self.db)
            .await?;

        let mut boleto = boleto_from_models(model, parcelas)?;
        let changed = refresh_overdue(&mut boleto.parcelas, today);
        mark_overdue(&self.db, &changed).await?;

        Ok(boleto)
    }

    /// Stores a planned boleto and its installments.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist.
    pub async fn create(&self, boleto: &Boleto) -> Result<Boleto, RepositoryError> {
        let txn = self.db.begin().await?;

        clients::Entity::find_by_id(boleto.client_id.into_inner())
            .one(&txn)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Client", boleto.client_id))?;

        boletos::ActiveModel {
            id: Set(boleto.id.into_inner()),
            client_id: Set(boleto.client_id.into_inner()),
            description: Set(boleto.description.clone()),
            total_amount: Set(boleto.total_amount),
            installment_count: Set(to_i32(boleto.installment_count, "installment_count")?),
            first_due_date: Set(boleto.first_due_date),
            created_at: Set(boleto.created_at.into()),
            updated_at: Set(boleto.updated_at.into()),
        }
        .insert(&txn)
        .await?;

        let rows = boleto
            .parcelas
            .iter()
            .map(|p| {
                Ok(boleto_parcelas::ActiveModel {
                    id: Set(p.id.into_inner()),
                    boleto_id: Set(boleto.id.into_inner()),
                    number: Set(to_i32(p.number, "number")?),
                    value: Set(p.value),
                    due_date: Set(p.due_date),
                    status: Set(p.status.into()),
                    payment_date: Set(p.payment_date),
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;
        if !rows.is_empty() {
            boleto_parcelas::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        info!(boleto_id = %boleto.id, installments = boleto.parcelas.len(), "Boleto stored");

        Ok(boleto.clone())
    }

    /// Persists installment `number` and the boleto's total in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the boleto has no such installment, or an
    /// error if either update fails.
    pub async fn save_parcela(&self, boleto: &Boleto, number: u32) -> Result<(), RepositoryError> {
        let parcela = boleto
            .parcela(number)
            .ok_or_else(|| RepositoryError::not_found("Parcela", number))?;

        let txn = self.db.begin().await?;

        boleto_parcelas::ActiveModel {
            id: Set(parcela.id.into_inner()),
            value: Set(parcela.value),
            due_date: Set(parcela.due_date),
            status: Set(parcela.status.into()),
            payment_date: Set(parcela.payment_date),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        boletos::ActiveModel {
            id: Set(boleto.id.into_inner()),
            total_amount: Set(boleto.total_amount),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Deletes a boleto and its installments.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete(&self, id: BoletoId) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        boleto_parcelas::Entity::delete_many()
            .filter(boleto_parcelas::Column::BoletoId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        let result = boletos::Entity::delete_by_id(id.into_inner()).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(RepositoryError::not_found("Boleto", id));
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use gestao_core::boleto::ParcelaStatus as Status;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn boleto_model(id: Uuid) -> boletos::Model {
        let now = Utc::now().into();
        boletos::Model {
            id,
            client_id: Uuid::now_v7(),
            description: "Móveis planejados".to_string(),
            total_amount: dec!(300),
            installment_count: 2,
            first_due_date: date(2025, 1, 10),
            created_at: now,
            updated_at: now,
        }
    }

    fn parcela_model(boleto_id: Uuid, number: i32, due: NaiveDate) -> boleto_parcelas::Model {
        boleto_parcelas::Model {
            id: Uuid::now_v7(),
            boleto_id,
            number,
            value: dec!(150),
            due_date: due,
            status: ParcelaStatus::Pendente,
            payment_date: None,
        }
    }

    #[tokio::test]
    async fn test_get_refreshes_and_persists_overdue() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![boleto_model(id)]])
            .append_query_results([vec![
                parcela_model(id, 1, date(2025, 1, 10)),
                parcela_model(id, 2, date(2025, 2, 9)),
            ]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = BoletoRepository::new(db.clone());

        let boleto = repo.get(BoletoId::from(id), date(2025, 1, 20)).await.unwrap();

        assert_eq!(boleto.parcelas[0].status, Status::Vencido);
        assert_eq!(boleto.parcelas[1].status, Status::Pendente);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 3);
        assert!(format!("{:?}", log[2]).contains("UPDATE"));
    }

    #[tokio::test]
    async fn test_get_without_overdue_skips_update() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![boleto_model(id)]])
            .append_query_results([vec![parcela_model(id, 1, date(2025, 3, 10))]])
            .into_connection();
        let repo = BoletoRepository::new(db.clone());

        repo.get(BoletoId::from(id), date(2025, 1, 20)).await.unwrap();
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_save_parcela_writes_total_in_one_transaction() {
        let id = Uuid::now_v7();
        let mut stored_parcela = parcela_model(id, 1, date(2025, 1, 10));
        stored_parcela.value = dec!(200);
        let mut stored_boleto = boleto_model(id);
        stored_boleto.total_amount = dec!(350);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_parcela.clone()]])
            .append_query_results([vec![stored_boleto.clone()]])
            .into_connection();
        let repo = BoletoRepository::new(db.clone());

        let mut boleto = boleto_from_models(
            boleto_model(id),
            vec![stored_parcela, parcela_model(id, 2, date(2025, 2, 9))],
        )
        .unwrap();
        boleto
            .update_parcela(1, |p| {
                p.value = dec!(200);
                Ok(())
            })
            .unwrap();
        assert_eq!(boleto.total_amount, dec!(350));

        repo.save_parcela(&boleto, 1).await.unwrap();

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statements = format!("{:?}", log[0]);
        assert!(statements.contains("BEGIN"));
        assert!(statements.contains("total_amount"));
        assert!(statements.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_save_unknown_parcela_is_not_found() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = BoletoRepository::new(db);
        let boleto =
            boleto_from_models(boleto_model(id), vec![parcela_model(id, 1, date(2025, 1, 10))])
                .unwrap();

        assert!(matches!(
            repo.save_parcela(&boleto, 2).await,
            Err(RepositoryError::NotFound { entity: "Parcela", .. })
        ));
    }

    #[test]
    fn test_negative_number_is_corrupt() {
        let mut model = parcela_model(Uuid::now_v7(), 1, date(2025, 1, 1));
        model.number = -1;
        assert!(matches!(parcela_from_model(model), Err(RepositoryError::Corrupt(_))));
    }
}
