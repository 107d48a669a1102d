//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! They speak domain types from `gestao-core`.

pub mod boleto;
pub mod budget;
pub mod client;
pub mod cost;
pub mod employee;
pub mod error;
pub mod product;
pub mod user;

pub use boleto::BoletoRepository;
pub use budget::{BudgetFilter, BudgetRepository};
pub use client::ClientRepository;
pub use cost::{CostRepository, VariableCostFilter};
pub use employee::EmployeeRepository;
pub use error::RepositoryError;
pub use product::{ProductFilter, ProductRepository};
pub use user::UserRepository;
