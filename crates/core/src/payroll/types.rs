//! Payroll estimate types.

use gestao_shared::config::PayrollConfig;
use gestao_shared::types::EmployeeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily benefit rates paid by the employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRates {
    /// Meal voucher cost per business day.
    pub meal_voucher_daily_rate: Decimal,
    /// Transport voucher cost per business day.
    pub transport_voucher_daily_rate: Decimal,
}

impl Default for PayrollRates {
    fn default() -> Self {
        Self::from(&PayrollConfig::default())
    }
}

impl From<&PayrollConfig> for PayrollRates {
    fn from(config: &PayrollConfig) -> Self {
        Self {
            meal_voucher_daily_rate: config.meal_voucher_daily_rate,
            transport_voucher_daily_rate: config.transport_voucher_daily_rate,
        }
    }
}

/// Employer-side monthly cost of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCharges {
    /// Gross salary.
    pub salary: Decimal,
    /// Business days used for benefit costs.
    pub business_days: u32,
    /// FGTS deposit, 8% of salary.
    pub fgts: Decimal,
    /// 13th salary provision.
    pub thirteenth_provision: Decimal,
    /// Vacation provision including the one-third bonus.
    pub vacation_provision: Decimal,
    /// Meal voucher cost.
    pub meal_voucher_cost: Decimal,
    /// Transport voucher cost.
    pub transport_voucher_cost: Decimal,
    /// Sum of all charges.
    pub total_charges: Decimal,
    /// Salary plus charges.
    pub total_monthly_cost: Decimal,
    /// Always true.
    pub is_estimate: bool,
}

/// Employee-side deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSalaryEstimate {
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Flat INSS withholding.
    pub inss: Decimal,
    /// Transport voucher co-payment, zero when not opted in.
    pub transport_copay: Decimal,
    /// Gross minus deductions.
    pub net_salary: Decimal,
    /// Always true.
    pub is_estimate: bool,
}

/// Estimate for one employee in one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePayroll {
    pub employee_id: EmployeeId,
    pub name: String,
    pub position: String,
    pub year: i32,
    pub month: u32,
    /// Whole months of service at the end of the month.
    pub months_of_service: u32,
    pub charges: PayrollCharges,
    pub net: NetSalaryEstimate,
}

/// Team projection for a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamPayrollSummary {
    pub year: i32,
    pub month: u32,
    pub business_days: u32,
    pub headcount: usize,
    pub total_gross: Decimal,
    pub total_charges: Decimal,
    pub total_monthly_cost: Decimal,
    pub total_net: Decimal,
    pub employees: Vec<EmployeePayroll>,
    /// Always true.
    pub is_estimate: bool,
}
