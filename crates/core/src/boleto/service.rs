//! Boleto planning service.

use chrono::{DateTime, Utc};
use gestao_shared::types::money::round_money;
use gestao_shared::types::{BoletoId, ParcelaId};
use rust_decimal::Decimal;

use super::error::BoletoError;
use super::schedule::{generate_schedule, MAX_INSTALLMENTS};
use super::types::{Boleto, BoletoParcela, NewBoleto};

/// Service for boleto business logic.
pub struct BoletoService;

impl BoletoService {
    /// Validates a creation request.
    ///
    /// # Errors
    ///
    /// Returns `BoletoError::NonPositiveTotal` or
    /// `BoletoError::InstallmentCountOutOfRange`.
    pub fn validate(request: &NewBoleto) -> Result<(), BoletoError> {
        if request.total_amount <= Decimal::ZERO {
            return Err(BoletoError::NonPositiveTotal);
        }
        if !(1..=MAX_INSTALLMENTS).contains(&request.installment_count) {
            return Err(BoletoError::InstallmentCountOutOfRange {
                count: request.installment_count,
                max: MAX_INSTALLMENTS,
            });
        }
        Ok(())
    }

    /// Builds a new boleto with its generated installment schedule.
    ///
    /// The total is rounded to cents before splitting.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::validate`].
    pub fn plan(request: &NewBoleto, now: DateTime<Utc>) -> Result<Boleto, BoletoError> {
        Self::validate(request)?;

        let id = BoletoId::new();
        let total_amount = round_money(request.total_amount);
        let parcelas: Vec<BoletoParcela> =
            generate_schedule(total_amount, request.installment_count, request.first_due_date)
                .into_iter()
                .map(|s| BoletoParcela {
                    id: ParcelaId::new(),
                    boleto_id: id,
                    number: s.number,
                    value: s.value,
                    due_date: s.due_date,
                    status: s.status,
                    payment_date: None,
                })
                .collect();

        Ok(Boleto {
            id,
            client_id: request.client_id,
            description: request.description.trim().to_string(),
            total_amount,
            installment_count: u32::try_from(parcelas.len()).unwrap_or_default(),
            first_due_date: request.first_due_date,
            parcelas,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boleto::status::apply_edit;
    use crate::boleto::types::ParcelaEdit;
    use chrono::NaiveDate;
    use gestao_shared::types::ClientId;
    use rust_decimal_macros::dec;

    fn request(total: Decimal, count: i32) -> NewBoleto {
        NewBoleto {
            client_id: ClientId::new(),
            description: " Reforma cozinha ".to_string(),
            total_amount: total,
            installment_count: count,
            first_due_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
        }
    }

    #[test]
    fn test_plan() {
        let boleto = BoletoService::plan(&request(dec!(1500), 4), Utc::now()).unwrap();

        assert_eq!(boleto.description, "Reforma cozinha");
        assert_eq!(boleto.installment_count, 4);
        assert_eq!(boleto.parcelas.len(), 4);
        assert!(boleto.parcelas.iter().all(|p| p.boleto_id == boleto.id));
        assert_eq!(
            boleto.parcelas.iter().map(|p| p.value).sum::<Decimal>(),
            dec!(1500)
        );
    }

    #[test]
    fn test_count_out_of_range() {
        for count in [0, 37] {
            assert!(matches!(
                BoletoService::plan(&request(dec!(100), count), Utc::now()),
                Err(BoletoError::InstallmentCountOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_value_edit_keeps_total_in_sync() {
        let mut boleto = BoletoService::plan(&request(dec!(1000), 3), Utc::now()).unwrap();
        let today = boleto.first_due_date;
        let edit = ParcelaEdit {
            value: Some(dec!(500)),
            ..ParcelaEdit::default()
        };

        boleto
            .update_parcela(1, |p| apply_edit(p, &edit, today))
            .unwrap();

        assert_eq!(boleto.parcelas[0].value, dec!(500));
        assert_eq!(boleto.total_amount, dec!(1166.67));
        assert_eq!(boleto.installments_total(), boleto.total_amount);
    }

    #[test]
    fn test_edit_to_zero_total_is_rejected() {
        let mut boleto = BoletoService::plan(&request(dec!(100), 1), Utc::now()).unwrap();
        let today = boleto.first_due_date;
        let edit = ParcelaEdit {
            value: Some(Decimal::ZERO),
            ..ParcelaEdit::default()
        };

        assert!(matches!(
            boleto.update_parcela(1, |p| apply_edit(p, &edit, today)),
            Err(BoletoError::NonPositiveTotal)
        ));
        assert_eq!(boleto.parcelas[0].value, dec!(100));
        assert_eq!(boleto.total_amount, dec!(100));
    }

    #[test]
    fn test_update_unknown_parcela() {
        let mut boleto = BoletoService::plan(&request(dec!(100), 2), Utc::now()).unwrap();
        assert!(matches!(
            boleto.update_parcela(3, |_| Ok(())),
            Err(BoletoError::ParcelaNotFound(3))
        ));
    }

    #[test]
    fn test_non_positive_total() {
        assert!(matches!(
            BoletoService::validate(&request(dec!(0), 2)),
            Err(BoletoError::NonPositiveTotal)
        ));
    }
}
