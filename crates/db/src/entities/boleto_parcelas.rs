//! `SeaORM` Entity for boleto_parcelas table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ParcelaStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "boleto_parcelas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub boleto_id: Uuid,
    pub number: i32,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub value: Decimal,
    pub due_date: Date,
    pub status: ParcelaStatus,
    pub payment_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::boletos::Entity",
        from = "Column::BoletoId",
        to = "super::boletos::Column::Id",
        on_delete = "Cascade"
    )]
    Boletos,
}

impl Related<super::boletos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Boletos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
