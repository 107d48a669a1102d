//! `SeaORM` entity definitions.

pub mod boleto_parcelas;
pub mod boletos;
pub mod budget_items;
pub mod budgets;
pub mod clients;
pub mod employees;
pub mod fixed_costs;
pub mod products;
pub mod sea_orm_active_enums;
pub mod users;
pub mod variable_costs;
