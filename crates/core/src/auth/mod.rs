//! Operator accounts and password hashing.
//!
//! Operators sign in with email and password; the session itself is a JWT
//! issued by `gestao_shared::JwtService`.

mod password;

pub use password::{MIN_PASSWORD_LENGTH, PasswordError, check_password_policy, hash_password, verify_password};

use chrono::{DateTime, Utc};
use gestao_shared::types::UserId;
use serde::{Deserialize, Serialize};

/// A back-office operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operator {
    /// Operator ID.
    pub id: UserId,
    /// Sign-in email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Disabled operators cannot sign in.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Operator {
    /// Normalizes an email for lookups (trimmed, lowercase).
    #[must_use]
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
