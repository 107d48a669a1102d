//! Boleto data types.

use chrono::{DateTime, NaiveDate, Utc};
use gestao_shared::types::{BoletoId, ClientId, ParcelaId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BoletoError;

/// Installment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelaStatus {
    /// Awaiting payment, not yet due.
    Pendente,
    /// Paid.
    Pago,
    /// Past due and unpaid.
    Vencido,
    /// Cancelled.
    Cancelado,
}

impl ParcelaStatus {
    /// Every status.
    pub const ALL: [Self; 4] = [Self::Pendente, Self::Pago, Self::Vencido, Self::Cancelado];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Pago => "pago",
            Self::Vencido => "vencido",
            Self::Cancelado => "cancelado",
        }
    }

    /// Paid or cancelled: nothing left to collect.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Pago | Self::Cancelado)
    }
}

impl std::fmt::Display for ParcelaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ParcelaStatus {
    type Err = BoletoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoletoError::UnknownStatus(s.to_string()))
    }
}

/// One generated installment, before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledInstallment {
    /// 1-based sequence number.
    pub number: u32,
    /// Installment value.
    pub value: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Always `Pendente` on generation.
    pub status: ParcelaStatus,
}

/// A persisted installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoletoParcela {
    pub id: ParcelaId,
    pub boleto_id: BoletoId,
    /// 1-based sequence number.
    pub number: u32,
    pub value: Decimal,
    pub due_date: NaiveDate,
    pub status: ParcelaStatus,
    /// Set only while the installment is paid.
    pub payment_date: Option<NaiveDate>,
}

/// A receivable and its installments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boleto {
    pub id: BoletoId,
    pub client_id: ClientId,
    pub description: String,
    pub total_amount: Decimal,
    pub installment_count: u32,
    pub first_due_date: NaiveDate,
    /// Ordered by `number`.
    pub parcelas: Vec<BoletoParcela>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Boleto {
    /// Installment by its 1-based number.
    #[must_use]
    pub fn parcela(&self, number: u32) -> Option<&BoletoParcela> {
        self.parcelas.iter().find(|p| p.number == number)
    }

    /// Sum of the installment values.
    #[must_use]
    pub fn installments_total(&self) -> Decimal {
        self.parcelas.iter().map(|p| p.value).sum()
    }

    /// Applies `change` to installment `number`, then sets `total_amount` to
    /// the sum of the installment values. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// Returns `BoletoError::ParcelaNotFound` for an unknown number,
    /// `BoletoError::NonPositiveTotal` when the installments would no longer
    /// sum above zero, and any error from `change`.
    pub fn update_parcela<F>(&mut self, number: u32, change: F) -> Result<(), BoletoError>
    where
        F: FnOnce(&mut BoletoParcela) -> Result<(), BoletoError>,
    {
        let index = self
            .parcelas
            .iter()
            .position(|p| p.number == number)
            .ok_or(BoletoError::ParcelaNotFound(number))?;

        let mut edited = self.parcelas[index].clone();
        change(&mut edited)?;

        let total = self.installments_total() - self.parcelas[index].value + edited.value;
        if total <= Decimal::ZERO {
            return Err(BoletoError::NonPositiveTotal);
        }

        self.parcelas[index] = edited;
        self.total_amount = total;
        Ok(())
    }
}

/// Request to create a boleto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBoleto {
    /// Payer.
    pub client_id: ClientId,
    /// What is being charged.
    pub description: String,
    /// Amount split across the installments.
    pub total_amount: Decimal,
    /// Requested number of installments.
    pub installment_count: i32,
    /// Due date of installment 1.
    pub first_due_date: NaiveDate,
}

/// Operator edit of one installment. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParcelaEdit {
    /// New status, set without transition checks.
    pub status: Option<ParcelaStatus>,
    /// New value.
    pub value: Option<Decimal>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// Only kept when the resulting status is `Pago`.
    pub payment_date: Option<NaiveDate>,
}

/// Aggregate status of a boleto, derived from its installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoletoStatus {
    /// Every installment paid or cancelled.
    Quitado,
    /// Some unpaid installment is past due.
    Vencido,
    /// Nearest upcoming unpaid due date.
    ProximoVencimento {
        /// Due date of that installment.
        due_date: NaiveDate,
    },
    /// Nothing else applies.
    Pendente,
}

impl BoletoStatus {
    /// Human-readable label in Portuguese.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Quitado => "Quitado".to_string(),
            Self::Vencido => "Vencido".to_string(),
            Self::ProximoVencimento { due_date } => {
                format!("Vence em {}", due_date.format("%d/%m/%Y"))
            }
            Self::Pendente => "Pendente".to_string(),
        }
    }
}

/// A boleto with its aggregate status, as listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoletoWithStatus {
    /// The boleto and its installments.
    #[serde(flatten)]
    pub boleto: Boleto,
    /// Derived status.
    pub aggregate_status: BoletoStatus,
    /// `aggregate_status` as shown to the operator.
    pub status_label: String,
}

impl BoletoWithStatus {
    /// Derives the aggregate status as of `today`.
    #[must_use]
    pub fn new(boleto: Boleto, today: NaiveDate) -> Self {
        let aggregate_status = super::status::aggregate_status(&boleto.parcelas, today);
        Self {
            status_label: aggregate_status.label(),
            aggregate_status,
            boleto,
        }
    }
}
