//! Payroll estimation service.

use gestao_shared::types::money::round_money;
use rust_decimal::Decimal;

use super::calendar::{business_days_in_month, month_bounds};
use super::error::PayrollError;
use super::types::{
    EmployeePayroll, NetSalaryEstimate, PayrollCharges, PayrollRates, TeamPayrollSummary,
};
use crate::employee::Employee;

/// FGTS rate over gross salary.
pub const FGTS_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);
/// Flat INSS withholding rate.
pub const INSS_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 3);
/// Employee share of the transport voucher.
pub const TRANSPORT_COPAY_RATE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Service for payroll estimates.
pub struct PayrollService;

impl PayrollService {
    /// Estimates employer charges for one month.
    ///
    /// Each component is rounded to cents before summing.
    #[must_use]
    pub fn estimate_charges(
        salary: Decimal,
        meal_voucher: bool,
        transport_voucher: bool,
        business_days: u32,
        rates: &PayrollRates,
    ) -> PayrollCharges {
        let days = Decimal::from(business_days);
        let twelve = Decimal::from(12);

        let fgts = round_money(salary * FGTS_RATE);
        let thirteenth_provision = round_money(salary / twelve);
        let vacation_provision = round_money((salary + salary / Decimal::from(3)) / twelve);
        let meal_voucher_cost = if meal_voucher {
            round_money(days * rates.meal_voucher_daily_rate)
        } else {
            Decimal::ZERO
        };
        let transport_voucher_cost = if transport_voucher {
            round_money(days * rates.transport_voucher_daily_rate)
        } else {
            Decimal::ZERO
        };

        let total_charges = fgts
            + thirteenth_provision
            + vacation_provision
            + meal_voucher_cost
            + transport_voucher_cost;

        PayrollCharges {
            salary,
            business_days,
            fgts,
            thirteenth_provision,
            vacation_provision,
            meal_voucher_cost,
            transport_voucher_cost,
            total_charges,
            total_monthly_cost: salary + total_charges,
            is_estimate: true,
        }
    }

    /// Estimates net salary after INSS and transport co-payment.
    #[must_use]
    pub fn estimate_net_salary(salary: Decimal, transport_voucher: bool) -> NetSalaryEstimate {
        let inss = round_money(salary * INSS_RATE);
        let transport_copay = if transport_voucher {
            round_money(salary * TRANSPORT_COPAY_RATE)
        } else {
            Decimal::ZERO
        };

        NetSalaryEstimate {
            gross_salary: salary,
            inss,
            transport_copay,
            net_salary: salary - inss - transport_copay,
            is_estimate: true,
        }
    }

    /// Full estimate for one employee in a month.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::InvalidMonth` if `year`/`month` is not a calendar month.
    pub fn for_employee(
        employee: &Employee,
        year: i32,
        month: u32,
        rates: &PayrollRates,
    ) -> Result<EmployeePayroll, PayrollError> {
        let (_, last_day) =
            month_bounds(year, month).ok_or(PayrollError::InvalidMonth { year, month })?;
        let business_days =
            business_days_in_month(year, month).ok_or(PayrollError::InvalidMonth { year, month })?;

        Ok(Self::build(employee, year, month, business_days, last_day, rates))
    }

    /// Sums the estimate over the whole team.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::InvalidMonth` if `year`/`month` is not a calendar month.
    pub fn team_summary(
        employees: &[Employee],
        year: i32,
        month: u32,
        rates: &PayrollRates,
    ) -> Result<TeamPayrollSummary, PayrollError> {
        let (_, last_day) =
            month_bounds(year, month).ok_or(PayrollError::InvalidMonth { year, month })?;
        let business_days =
            business_days_in_month(year, month).ok_or(PayrollError::InvalidMonth { year, month })?;

        let payrolls: Vec<EmployeePayroll> = employees
            .iter()
            .map(|e| Self::build(e, year, month, business_days, last_day, rates))
            .collect();

        Ok(TeamPayrollSummary {
            year,
            month,
            business_days,
            headcount: payrolls.len(),
            total_gross: payrolls.iter().map(|p| p.charges.salary).sum(),
            total_charges: payrolls.iter().map(|p| p.charges.total_charges).sum(),
            total_monthly_cost: payrolls.iter().map(|p| p.charges.total_monthly_cost).sum(),
            total_net: payrolls.iter().map(|p| p.net.net_salary).sum(),
            employees: payrolls,
            is_estimate: true,
        })
    }

    fn build(
        employee: &Employee,
        year: i32,
        month: u32,
        business_days: u32,
        last_day: chrono::NaiveDate,
        rates: &PayrollRates,
    ) -> EmployeePayroll {
        EmployeePayroll {
            employee_id: employee.id,
            name: employee.name.clone(),
            position: employee.position.clone(),
            year,
            month,
            months_of_service: employee.months_of_service(last_day),
            charges: Self::estimate_charges(
                employee.salary,
                employee.meal_voucher,
                employee.transport_voucher,
                business_days,
                rates,
            ),
            net: Self::estimate_net_salary(employee.salary, employee.transport_voucher),
        }
    }
}
