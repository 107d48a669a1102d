//! Clients and their denormalized budget back-references.

use chrono::{DateTime, Utc};
use gestao_shared::types::{BudgetId, ClientId};
use serde::{Deserialize, Serialize};

/// A client record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Name or company name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// CPF or CNPJ.
    pub document: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Budgets issued to this client, oldest first.
    pub budget_ids: Vec<BudgetId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Editable client fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInput {
    /// Name or company name.
    pub name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// CPF or CNPJ.
    pub document: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Adds a budget to a back-reference list, keeping it free of duplicates.
///
/// Returns `true` when the list changed.
pub fn link_budget(budget_ids: &mut Vec<BudgetId>, budget_id: BudgetId) -> bool {
    if budget_ids.contains(&budget_id) {
        return false;
    }
    budget_ids.push(budget_id);
    true
}

/// Removes a budget from a back-reference list.
///
/// Returns `true` when the list changed.
pub fn unlink_budget(budget_ids: &mut Vec<BudgetId>, budget_id: BudgetId) -> bool {
    let before = budget_ids.len();
    budget_ids.retain(|id| *id != budget_id);
    budget_ids.len() != before
}

/// Keeps only the digits of a CPF/CNPJ so formatted and raw input compare equal.
#[must_use]
pub fn normalize_document(document: &str) -> String {
    document.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_budget_ignores_duplicates() {
        let id = BudgetId::new();
        let mut ids = Vec::new();

        assert!(link_budget(&mut ids, id));
        assert!(!link_budget(&mut ids, id));
        assert_eq!(ids, vec![id]);
    }

    #[test]
    fn test_unlink_budget() {
        let keep = BudgetId::new();
        let drop = BudgetId::new();
        let mut ids = vec![keep, drop];

        assert!(unlink_budget(&mut ids, drop));
        assert!(!unlink_budget(&mut ids, drop));
        assert_eq!(ids, vec![keep]);
    }

    #[test]
    fn test_normalize_document() {
        assert_eq!(normalize_document("123.456.789-09"), "12345678909");
        assert_eq!(normalize_document("12.345.678/0001-95"), "12345678000195");
    }
}
