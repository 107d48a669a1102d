//! Employees.

use chrono::{DateTime, NaiveDate, Utc};
use gestao_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Employee-related errors.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// Salary below zero.
    #[error("Salary cannot be negative")]
    NegativeSalary,
}

/// An employee record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Employee ID.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Gross monthly salary.
    pub salary: Decimal,
    /// Admission date.
    pub admission_date: NaiveDate,
    /// Opted in to the meal voucher.
    pub meal_voucher: bool,
    /// Opted in to the transport voucher.
    pub transport_voucher: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Editable employee fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInput {
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Gross monthly salary.
    pub salary: Decimal,
    /// Admission date.
    pub admission_date: NaiveDate,
    /// Opted in to the meal voucher.
    pub meal_voucher: bool,
    /// Opted in to the transport voucher.
    pub transport_voucher: bool,
}

impl EmployeeInput {
    /// Validates monetary fields.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeError::NegativeSalary` if the salary is negative.
    pub fn validate(&self) -> Result<(), EmployeeError> {
        if self.salary < Decimal::ZERO {
            return Err(EmployeeError::NegativeSalary);
        }
        Ok(())
    }
}

impl Employee {
    /// Whole months of service completed by `on`.
    #[must_use]
    pub fn months_of_service(&self, on: NaiveDate) -> u32 {
        use chrono::Datelike;

        if on <= self.admission_date {
            return 0;
        }
        let months = (on.year() - self.admission_date.year()) * 12
            + i32::try_from(on.month()).unwrap_or(0)
            - i32::try_from(self.admission_date.month()).unwrap_or(0);
        let months = if on.day() < self.admission_date.day() {
            months - 1
        } else {
            months
        };
        u32::try_from(months).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn employee(admission: NaiveDate) -> Employee {
        let now = Utc::now();
        Employee {
            id: EmployeeId::new(),
            name: "Maria Souza".to_string(),
            position: "Auxiliar administrativo".to_string(),
            salary: dec!(2500),
            admission_date: admission,
            meal_voucher: true,
            transport_voucher: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_validate_salary() {
        let mut input = EmployeeInput {
            name: "João".to_string(),
            position: "Pedreiro".to_string(),
            salary: dec!(3000),
            admission_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            meal_voucher: false,
            transport_voucher: true,
        };
        assert!(input.validate().is_ok());

        input.salary = dec!(-1);
        assert!(matches!(input.validate(), Err(EmployeeError::NegativeSalary)));
    }

    #[test]
    fn test_months_of_service() {
        let e = employee(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        assert_eq!(e.months_of_service(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), 0);
        assert_eq!(e.months_of_service(NaiveDate::from_ymd_opt(2024, 4, 14).unwrap()), 0);
        assert_eq!(e.months_of_service(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()), 1);
        assert_eq!(e.months_of_service(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()), 12);
    }
}
