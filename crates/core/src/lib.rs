//! Core business logic for Gestao.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Operator accounts and password hashing
//! - `client` - Clients and their budget back-references
//! - `product` - Product catalog
//! - `budget` - Quotes: item pricing and totals
//! - `employee` - Employee records
//! - `payroll` - Employer charge and net salary estimates
//! - `cost` - Fixed and variable costs
//! - `boleto` - Installment schedules and payment state machine
//! - `reports` - Revenue, cost and receivables aggregation

pub mod auth;
pub mod boleto;
pub mod budget;
pub mod client;
pub mod cost;
pub mod employee;
pub mod payroll;
pub mod product;
pub mod reports;
