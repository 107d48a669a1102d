//! Installment state machine and aggregate boleto status.
//!
//! ```text
//! pendente -> pago | vencido | cancelado
//! vencido  -> pago | cancelado
//! ```
//!
//! `pago` and `cancelado` are terminal for [`pay`] and [`cancel`];
//! [`apply_edit`] lets an operator set anything.

use chrono::NaiveDate;
use gestao_shared::types::ParcelaId;
use rust_decimal::Decimal;

use super::error::BoletoError;
use super::types::{BoletoParcela, BoletoStatus, ParcelaEdit, ParcelaStatus};

impl ParcelaStatus {
    /// Whether the state machine allows `self -> next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pendente, Self::Pago | Self::Vencido | Self::Cancelado)
                | (Self::Vencido, Self::Pago | Self::Cancelado)
        )
    }
}

fn transition(parcela: &mut BoletoParcela, next: ParcelaStatus) -> Result<(), BoletoError> {
    if !parcela.status.can_transition_to(next) {
        return Err(BoletoError::IllegalTransition {
            from: parcela.status,
            to: next,
        });
    }
    parcela.status = next;
    Ok(())
}

/// Marks an installment paid on `on`.
///
/// # Errors
///
/// Returns `BoletoError::IllegalTransition` unless the installment is
/// `pendente` or `vencido`.
pub fn pay(parcela: &mut BoletoParcela, on: NaiveDate) -> Result<(), BoletoError> {
    transition(parcela, ParcelaStatus::Pago)?;
    parcela.payment_date = Some(on);
    Ok(())
}

/// Cancels an installment.
///
/// # Errors
///
/// Returns `BoletoError::IllegalTransition` unless the installment is
/// `pendente` or `vencido`.
pub fn cancel(parcela: &mut BoletoParcela) -> Result<(), BoletoError> {
    transition(parcela, ParcelaStatus::Cancelado)?;
    parcela.payment_date = None;
    Ok(())
}

/// Applies an operator edit. Any status may be set.
///
/// A paid installment keeps the given payment date, else its current one,
/// else `today`. Any other status clears it.
///
/// # Errors
///
/// Returns `BoletoError::NegativeValue` for a negative value.
pub fn apply_edit(
    parcela: &mut BoletoParcela,
    edit: &ParcelaEdit,
    today: NaiveDate,
) -> Result<(), BoletoError> {
    if let Some(value) = edit.value {
        if value < Decimal::ZERO {
            return Err(BoletoError::NegativeValue);
        }
        parcela.value = value;
    }
    if let Some(due_date) = edit.due_date {
        parcela.due_date = due_date;
    }
    if let Some(status) = edit.status {
        parcela.status = status;
    }

    parcela.payment_date = if parcela.status == ParcelaStatus::Pago {
        Some(edit.payment_date.or(parcela.payment_date).unwrap_or(today))
    } else {
        None
    };
    Ok(())
}

/// Moves `pendente` installments due before `today` to `vencido`.
///
/// Returns the ids of the installments that changed.
pub fn refresh_overdue(parcelas: &mut [BoletoParcela], today: NaiveDate) -> Vec<ParcelaId> {
    parcelas
        .iter_mut()
        .filter(|p| p.status == ParcelaStatus::Pendente && p.due_date < today)
        .map(|p| {
            p.status = ParcelaStatus::Vencido;
            p.id
        })
        .collect()
}

/// Aggregate status of a boleto as of `today`.
///
/// An empty installment list is `Pendente`.
#[must_use]
pub fn aggregate_status(parcelas: &[BoletoParcela], today: NaiveDate) -> BoletoStatus {
    if parcelas.is_empty() {
        return BoletoStatus::Pendente;
    }

    let mut open = parcelas.iter().filter(|p| !p.status.is_settled()).peekable();
    if open.peek().is_none() {
        return BoletoStatus::Quitado;
    }

    let mut next_due: Option<NaiveDate> = None;
    for p in open {
        if p.status == ParcelaStatus::Vencido || p.due_date < today {
            return BoletoStatus::Vencido;
        }
        next_due = Some(next_due.map_or(p.due_date, |d| d.min(p.due_date)));
    }

    next_due.map_or(BoletoStatus::Pendente, |due_date| {
        BoletoStatus::ProximoVencimento { due_date }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestao_shared::types::BoletoId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parcela(number: u32, due: NaiveDate, status: ParcelaStatus) -> BoletoParcela {
        BoletoParcela {
            id: ParcelaId::new(),
            boleto_id: BoletoId::new(),
            number,
            value: dec!(100),
            due_date: due,
            status,
            payment_date: None,
        }
    }

    #[rstest]
    #[case(ParcelaStatus::Pendente, ParcelaStatus::Pago, true)]
    #[case(ParcelaStatus::Pendente, ParcelaStatus::Vencido, true)]
    #[case(ParcelaStatus::Pendente, ParcelaStatus::Cancelado, true)]
    #[case(ParcelaStatus::Vencido, ParcelaStatus::Pago, true)]
    #[case(ParcelaStatus::Vencido, ParcelaStatus::Cancelado, true)]
    #[case(ParcelaStatus::Vencido, ParcelaStatus::Pendente, false)]
    #[case(ParcelaStatus::Pago, ParcelaStatus::Cancelado, false)]
    #[case(ParcelaStatus::Pago, ParcelaStatus::Pendente, false)]
    #[case(ParcelaStatus::Cancelado, ParcelaStatus::Pago, false)]
    #[case(ParcelaStatus::Pendente, ParcelaStatus::Pendente, false)]
    fn test_transitions(
        #[case] from: ParcelaStatus,
        #[case] to: ParcelaStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_pay_sets_payment_date() {
        let mut p = parcela(1, date(2025, 1, 10), ParcelaStatus::Vencido);
        pay(&mut p, date(2025, 1, 15)).unwrap();

        assert_eq!(p.status, ParcelaStatus::Pago);
        assert_eq!(p.payment_date, Some(date(2025, 1, 15)));
    }

    #[test]
    fn test_pay_cancelled_is_rejected() {
        let mut p = parcela(1, date(2025, 1, 10), ParcelaStatus::Cancelado);
        let err = pay(&mut p, date(2025, 1, 15)).unwrap_err();

        assert!(matches!(
            err,
            BoletoError::IllegalTransition {
                from: ParcelaStatus::Cancelado,
                to: ParcelaStatus::Pago
            }
        ));
        assert_eq!(p.status, ParcelaStatus::Cancelado);
    }

    #[test]
    fn test_cancel_paid_is_rejected() {
        let mut p = parcela(1, date(2025, 1, 10), ParcelaStatus::Pago);
        assert!(cancel(&mut p).is_err());
    }

    #[test]
    fn test_operator_edit_reopens_paid() {
        let mut p = parcela(1, date(2025, 1, 10), ParcelaStatus::Pendente);
        pay(&mut p, date(2025, 1, 9)).unwrap();

        let edit = ParcelaEdit {
            status: Some(ParcelaStatus::Pendente),
            value: Some(dec!(120)),
            ..ParcelaEdit::default()
        };
        apply_edit(&mut p, &edit, date(2025, 1, 20)).unwrap();

        assert_eq!(p.status, ParcelaStatus::Pendente);
        assert_eq!(p.value, dec!(120));
        assert_eq!(p.payment_date, None);
    }

    #[test]
    fn test_operator_edit_paid_defaults_to_today() {
        let mut p = parcela(1, date(2025, 1, 10), ParcelaStatus::Cancelado);
        let edit = ParcelaEdit {
            status: Some(ParcelaStatus::Pago),
            ..ParcelaEdit::default()
        };
        apply_edit(&mut p, &edit, date(2025, 2, 1)).unwrap();

        assert_eq!(p.payment_date, Some(date(2025, 2, 1)));
    }

    #[test]
    fn test_operator_edit_negative_value() {
        let mut p = parcela(1, date(2025, 1, 10), ParcelaStatus::Pendente);
        let edit = ParcelaEdit {
            value: Some(dec!(-1)),
            ..ParcelaEdit::default()
        };
        assert!(matches!(
            apply_edit(&mut p, &edit, date(2025, 1, 1)),
            Err(BoletoError::NegativeValue)
        ));
        assert_eq!(p.value, dec!(100));
    }

    #[test]
    fn test_refresh_overdue() {
        let today = date(2025, 3, 1);
        let mut parcelas = vec![
            parcela(1, date(2025, 2, 1), ParcelaStatus::Pendente),
            parcela(2, date(2025, 2, 15), ParcelaStatus::Pago),
            parcela(3, date(2025, 3, 1), ParcelaStatus::Pendente),
        ];

        let changed = refresh_overdue(&mut parcelas, today);

        assert_eq!(changed, vec![parcelas[0].id]);
        assert_eq!(parcelas[0].status, ParcelaStatus::Vencido);
        assert_eq!(parcelas[1].status, ParcelaStatus::Pago);
        assert_eq!(parcelas[2].status, ParcelaStatus::Pendente);
    }

    #[test]
    fn test_aggregate_quitado() {
        let parcelas = vec![
            parcela(1, date(2025, 1, 1), ParcelaStatus::Pago),
            parcela(2, date(2025, 2, 1), ParcelaStatus::Cancelado),
        ];
        assert_eq!(aggregate_status(&parcelas, date(2025, 6, 1)), BoletoStatus::Quitado);
    }

    #[test]
    fn test_aggregate_vencido() {
        let parcelas = vec![
            parcela(1, date(2025, 1, 1), ParcelaStatus::Pago),
            parcela(2, date(2025, 2, 1), ParcelaStatus::Pendente),
            parcela(3, date(2025, 3, 1), ParcelaStatus::Pendente),
        ];
        assert_eq!(aggregate_status(&parcelas, date(2025, 2, 10)), BoletoStatus::Vencido);
    }

    #[test]
    fn test_aggregate_next_due() {
        let parcelas = vec![
            parcela(1, date(2025, 1, 1), ParcelaStatus::Pago),
            parcela(2, date(2025, 3, 1), ParcelaStatus::Pendente),
            parcela(3, date(2025, 2, 1), ParcelaStatus::Pendente),
        ];
        let status = aggregate_status(&parcelas, date(2025, 1, 20));

        assert_eq!(
            status,
            BoletoStatus::ProximoVencimento {
                due_date: date(2025, 2, 1)
            }
        );
        assert_eq!(status.label(), "Vence em 01/02/2025");
    }

    #[test]
    fn test_aggregate_empty_is_pendente() {
        assert_eq!(aggregate_status(&[], date(2025, 1, 1)), BoletoStatus::Pendente);
    }
}
