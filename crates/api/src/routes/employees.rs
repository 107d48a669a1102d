//! Employee and payroll estimate routes.
//!
//! Payroll figures are estimates; they are not a legally compliant
//! calculation of Brazilian payroll.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{MonthQuery, today};
use crate::AppState;
use crate::error::ApiResult;
use gestao_core::employee::{Employee, EmployeeInput};
use gestao_core::payroll::{EmployeePayroll, PayrollService, TeamPayrollSummary};
use gestao_db::EmployeeRepository;
use gestao_shared::types::EmployeeId;

/// Creates the employee routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/employees/{id}/payroll", get(employee_payroll))
        .route("/payroll/summary", get(payroll_summary))
}

/// Request body for creating or updating an employee.
#[derive(Debug, Deserialize, Validate)]
pub struct EmployeeRequest {
    /// Full name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Job title.
    #[validate(length(min = 1, max = 100))]
    pub position: String,
    /// Gross monthly salary.
    pub salary: Decimal,
    /// Admission date.
    pub admission_date: NaiveDate,
    /// Opted in to the meal voucher.
    #[serde(default)]
    pub meal_voucher: bool,
    /// Opted in to the transport voucher.
    #[serde(default)]
    pub transport_voucher: bool,
}

impl EmployeeRequest {
    fn into_input(self) -> ApiResult<EmployeeInput> {
        self.validate()?;
        let input = EmployeeInput {
            name: self.name,
            position: self.position,
            salary: self.salary,
            admission_date: self.admission_date,
            meal_voucher: self.meal_voucher,
            transport_voucher: self.transport_voucher,
        };
        input.validate()?;
        Ok(input)
    }
}

/// GET /employees
async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(EmployeeRepository::new(state.conn()).list().await?))
}

/// GET /employees/{id}
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(EmployeeRepository::new(state.conn()).get(id).await?))
}

/// POST /employees
async fn create_employee(
    State(state): State<AppState>,
    Json(payload): Json<EmployeeRequest>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let employee = EmployeeRepository::new(state.conn())
        .create(payload.into_input()?)
        .await?;
    info!(employee_id = %employee.id, "Employee created");

    Ok((StatusCode::CREATED, Json(employee)))
}

/// PUT /employees/{id}
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(payload): Json<EmployeeRequest>,
) -> ApiResult<Json<Employee>> {
    let employee = EmployeeRepository::new(state.conn())
        .update(id, payload.into_input()?)
        .await?;
    info!(employee_id = %id, "Employee updated");

    Ok(Json(employee))
}

/// DELETE /employees/{id}
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> ApiResult<StatusCode> {
    EmployeeRepository::new(state.conn()).delete(id).await?;
    info!(employee_id = %id, "Employee deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /employees/{id}/payroll - Charges and net salary estimate for a month.
async fn employee_payroll(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<EmployeePayroll>> {
    let (year, month) = query.resolve(today());
    let employee = EmployeeRepository::new(state.conn()).get(id).await?;

    Ok(Json(PayrollService::for_employee(
        &employee,
        year,
        month,
        &state.payroll_rates,
    )?))
}

/// GET /payroll/summary - Team cost projection for a month.
async fn payroll_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> ApiResult<Json<TeamPayrollSummary>> {
    let (year, month) = query.resolve(today());
    let employees = EmployeeRepository::new(state.conn()).list().await?;

    Ok(Json(PayrollService::team_summary(
        &employees,
        year,
        month,
        &state.payroll_rates,
    )?))
}
