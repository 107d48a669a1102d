//! Postgres enum types and their mapping to domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use gestao_core::boleto::ParcelaStatus as CoreParcelaStatus;
use gestao_core::budget::BudgetStatus as CoreBudgetStatus;
use gestao_core::cost::CostCategory as CoreCostCategory;
use gestao_core::product::ProductCategory as CoreProductCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_category")]
pub enum ProductCategory {
    #[sea_orm(string_value = "material")]
    Material,
    #[sea_orm(string_value = "service")]
    Service,
    #[sea_orm(string_value = "equipment")]
    Equipment,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_status")]
pub enum BudgetStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "cost_category")]
pub enum CostCategory {
    #[sea_orm(string_value = "rent")]
    Rent,
    #[sea_orm(string_value = "utilities")]
    Utilities,
    #[sea_orm(string_value = "payroll")]
    Payroll,
    #[sea_orm(string_value = "material")]
    Material,
    #[sea_orm(string_value = "transport")]
    Transport,
    #[sea_orm(string_value = "marketing")]
    Marketing,
    #[sea_orm(string_value = "taxes")]
    Taxes,
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "services")]
    Services,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "parcela_status")]
pub enum ParcelaStatus {
    #[sea_orm(string_value = "pendente")]
    Pendente,
    #[sea_orm(string_value = "pago")]
    Pago,
    #[sea_orm(string_value = "vencido")]
    Vencido,
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}

/// Two-way mapping between a database enum and its domain twin.
macro_rules! mirror_enum {
    ($db:ident, $core:ident, [$($variant:ident),+ $(,)?]) => {
        impl From<$core> for $db {
            fn from(value: $core) -> Self {
                match value {
                    $($core::$variant => Self::$variant,)+
                }
            }
        }

        impl From<$db> for $core {
            fn from(value: $db) -> Self {
                match value {
                    $($db::$variant => Self::$variant,)+
                }
            }
        }
    };
}

mirror_enum!(ProductCategory, CoreProductCategory, [Material, Service, Equipment, Other]);
mirror_enum!(BudgetStatus, CoreBudgetStatus, [Draft, Sent, Approved, Rejected]);
mirror_enum!(
    CostCategory,
    CoreCostCategory,
    [Rent, Utilities, Payroll, Material, Transport, Marketing, Taxes, Maintenance, Services, Other]
);
mirror_enum!(ParcelaStatus, CoreParcelaStatus, [Pendente, Pago, Vencido, Cancelado]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_domain() {
        for status in CoreParcelaStatus::ALL {
            assert_eq!(ParcelaStatus::from(status).to_value(), status.as_str());
        }
        for status in CoreBudgetStatus::ALL {
            assert_eq!(BudgetStatus::from(status).to_value(), status.as_str());
        }
        for category in CoreCostCategory::ALL {
            assert_eq!(CostCategory::from(category).to_value(), category.as_str());
        }
        for category in CoreProductCategory::ALL {
            assert_eq!(ProductCategory::from(category).to_value(), category.as_str());
        }
    }
}
