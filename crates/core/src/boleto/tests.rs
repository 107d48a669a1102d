//! Property-based tests for boleto schedules and status.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use gestao_shared::types::{BoletoId, ParcelaId};

use super::schedule::{generate_schedule, MAX_INSTALLMENTS};
use super::status::aggregate_status;
use super::types::{BoletoParcela, BoletoStatus, ParcelaStatus};

fn status_strategy() -> impl Strategy<Value = ParcelaStatus> {
    prop::sample::select(ParcelaStatus::ALL.to_vec())
}

fn first_due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

proptest! {
    /// Installment values sum exactly to the total.
    #[test]
    fn prop_installments_sum_to_total(
        cents in 1i64..100_000_000,
        count in 1..=MAX_INSTALLMENTS,
    ) {
        let total = Decimal::new(cents, 2);
        let schedule = generate_schedule(total, count, first_due());

        prop_assert_eq!(schedule.len(), usize::try_from(count).unwrap());
        prop_assert_eq!(schedule.iter().map(|i| i.value).sum::<Decimal>(), total);
        prop_assert!(schedule.iter().all(|i| i.value.scale() <= 2));
    }

    /// Installment i is due 30 × i days after the first.
    #[test]
    fn prop_due_dates_are_30_days_apart(count in 1..=MAX_INSTALLMENTS) {
        let schedule = generate_schedule(Decimal::new(99_999, 2), count, first_due());

        for (i, installment) in schedule.iter().enumerate() {
            let offset = i64::try_from(i).unwrap() * 30;
            prop_assert_eq!(installment.due_date, first_due() + Duration::days(offset));
        }
    }

    /// All but the last installment carry the same value, never above the last.
    #[test]
    fn prop_last_absorbs_remainder(
        cents in 1i64..10_000_000,
        count in 2..=MAX_INSTALLMENTS,
    ) {
        let schedule = generate_schedule(Decimal::new(cents, 2), count, first_due());
        let (last, rest) = schedule.split_last().unwrap();

        prop_assert!(rest.iter().all(|i| i.value == rest[0].value));
        prop_assert!(last.value >= rest[0].value);
    }

    /// Quitado iff every installment is paid or cancelled.
    #[test]
    fn prop_quitado_iff_all_settled(
        statuses in prop::collection::vec(status_strategy(), 1..12),
        today_offset in 0i64..400,
    ) {
        let boleto_id = BoletoId::new();
        let parcelas: Vec<BoletoParcela> = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| BoletoParcela {
                id: ParcelaId::new(),
                boleto_id,
                number: u32::try_from(i + 1).unwrap(),
                value: Decimal::ONE_HUNDRED,
                due_date: first_due() + Duration::days(i64::try_from(i).unwrap() * 30),
                status: *status,
                payment_date: None,
            })
            .collect();

        let today = first_due() + Duration::days(today_offset);
        let all_settled = statuses.iter().all(ParcelaStatus::is_settled);

        prop_assert_eq!(
            aggregate_status(&parcelas, today) == BoletoStatus::Quitado,
            all_settled
        );
    }
}
