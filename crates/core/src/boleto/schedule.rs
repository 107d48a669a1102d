//! Installment schedule generator.

use chrono::{Days, NaiveDate};
use gestao_shared::types::money::truncate_money;
use rust_decimal::Decimal;

use super::types::{ParcelaStatus, ScheduledInstallment};

/// Days between consecutive due dates.
pub const INSTALLMENT_INTERVAL_DAYS: u64 = 30;

/// Largest accepted installment count.
pub const MAX_INSTALLMENTS: i32 = 36;

/// Splits `total` into `count` installments.
///
/// Every installment but the last is `total / count` truncated to cents;
/// the last absorbs the remainder so the values sum exactly to `total`.
/// Installment `i` (0-based) is due `30 × i` days after `first_due`.
///
/// Returns an empty schedule when `total` or `count` is not positive.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use gestao_core::boleto::generate_schedule;
/// use rust_decimal::Decimal;
///
/// let first = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let schedule = generate_schedule(Decimal::new(1000, 0), 3, first);
/// let values: Vec<_> = schedule.iter().map(|i| i.value.to_string()).collect();
/// assert_eq!(values, ["333.33", "333.33", "333.34"]);
/// ```
#[must_use]
pub fn generate_schedule(total: Decimal, count: i32, first_due: NaiveDate) -> Vec<ScheduledInstallment> {
    if total <= Decimal::ZERO || count <= 0 {
        return Vec::new();
    }

    let Ok(n) = u32::try_from(count) else {
        return Vec::new();
    };
    let base = truncate_money(total / Decimal::from(n));
    let last = total - base * Decimal::from(n - 1);

    (0..n)
        .map(|i| {
            let due_date =
                first_due.checked_add_days(Days::new(u64::from(i) * INSTALLMENT_INTERVAL_DAYS))?;
            Some(ScheduledInstallment {
                number: i + 1,
                value: if i + 1 == n { last } else { base },
                due_date,
                status: ParcelaStatus::Pendente,
            })
        })
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}
