//! Payroll estimator tests.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use gestao_shared::types::EmployeeId;

use super::service::PayrollService;
use super::types::PayrollRates;
use super::PayrollError;
use crate::employee::Employee;

fn employee(salary: Decimal, meal: bool, transport: bool) -> Employee {
    let now = Utc::now();
    Employee {
        id: EmployeeId::new(),
        name: "Ana Lima".to_string(),
        position: "Vendedora".to_string(),
        salary,
        admission_date: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
        meal_voucher: meal,
        transport_voucher: transport,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_reference_example() {
    let charges =
        PayrollService::estimate_charges(dec!(3000), true, false, 21, &PayrollRates::default());

    assert_eq!(charges.fgts, dec!(240));
    assert_eq!(charges.thirteenth_provision, dec!(250));
    assert_eq!(charges.vacation_provision, dec!(333.33));
    assert_eq!(charges.meal_voucher_cost, dec!(315));
    assert_eq!(charges.transport_voucher_cost, Decimal::ZERO);
    assert_eq!(charges.total_charges, dec!(1138.33));
    assert_eq!(charges.total_monthly_cost, dec!(4138.33));
    assert!(charges.is_estimate);
}

#[test]
fn test_transport_voucher_uses_configured_rate() {
    let rates = PayrollRates {
        meal_voucher_daily_rate: dec!(20),
        transport_voucher_daily_rate: dec!(8.80),
    };
    let charges = PayrollService::estimate_charges(dec!(2000), false, true, 22, &rates);

    assert_eq!(charges.meal_voucher_cost, Decimal::ZERO);
    assert_eq!(charges.transport_voucher_cost, dec!(193.60));
}

#[test]
fn test_net_salary() {
    let net = PayrollService::estimate_net_salary(dec!(3000), true);
    assert_eq!(net.inss, dec!(225));
    assert_eq!(net.transport_copay, dec!(180));
    assert_eq!(net.net_salary, dec!(2595));

    let net = PayrollService::estimate_net_salary(dec!(3000), false);
    assert_eq!(net.transport_copay, Decimal::ZERO);
    assert_eq!(net.net_salary, dec!(2775));
}

#[test]
fn test_for_employee() {
    let e = employee(dec!(3000), true, false);
    let payroll = PayrollService::for_employee(&e, 2025, 3, &PayrollRates::default()).unwrap();

    assert_eq!(payroll.charges.business_days, 21);
    assert_eq!(payroll.charges.meal_voucher_cost, dec!(315));
    assert_eq!(payroll.months_of_service, 19);
    assert_eq!(payroll.employee_id, e.id);
}

#[test]
fn test_invalid_month() {
    let e = employee(dec!(3000), true, false);
    assert!(matches!(
        PayrollService::for_employee(&e, 2025, 13, &PayrollRates::default()),
        Err(PayrollError::InvalidMonth { year: 2025, month: 13 })
    ));
}

#[test]
fn test_team_summary() {
    let team = vec![
        employee(dec!(3000), true, false),
        employee(dec!(1800), false, true),
    ];
    let summary = PayrollService::team_summary(&team, 2025, 3, &PayrollRates::default()).unwrap();

    assert_eq!(summary.headcount, 2);
    assert_eq!(summary.total_gross, dec!(4800));
    assert_eq!(
        summary.total_monthly_cost,
        summary.employees.iter().map(|p| p.charges.total_monthly_cost).sum::<Decimal>()
    );
    assert_eq!(summary.total_monthly_cost, summary.total_gross + summary.total_charges);
    assert!(summary.is_estimate);
}

#[test]
fn test_empty_team() {
    let summary = PayrollService::team_summary(&[], 2025, 3, &PayrollRates::default()).unwrap();
    assert_eq!(summary.headcount, 0);
    assert_eq!(summary.total_monthly_cost, Decimal::ZERO);
}

proptest! {
    /// Monthly cost is salary plus every charge component.
    #[test]
    fn prop_total_monthly_cost(
        cents in 1i64..10_000_000,
        meal: bool,
        transport: bool,
        days in 0u32..=23,
    ) {
        let salary = Decimal::new(cents, 2);
        let c = PayrollService::estimate_charges(salary, meal, transport, days, &PayrollRates::default());

        prop_assert_eq!(
            c.total_monthly_cost,
            salary + c.fgts + c.thirteenth_provision + c.vacation_provision
                + c.meal_voucher_cost + c.transport_voucher_cost
        );
    }

    /// Net salary is gross minus INSS minus the co-payment when opted in.
    #[test]
    fn prop_net_salary(cents in 1i64..10_000_000, transport: bool) {
        let salary = Decimal::new(cents, 2);
        let net = PayrollService::estimate_net_salary(salary, transport);

        prop_assert_eq!(net.net_salary, salary - net.inss - net.transport_copay);
        if !transport {
            prop_assert_eq!(net.transport_copay, Decimal::ZERO);
        }
    }
}
