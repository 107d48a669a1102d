//! JWT session token generation and validation.
//!
//! A signed-in operator receives one bearer token whose expiry doubles as the
//! session re-validation deadline (24 hours by default).

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{Claims, SessionToken};

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Session lifetime in hours.
    pub session_ttl_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            session_ttl_hours: 24,
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// JWT service for session token operations.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("session_ttl_hours", &self.config.session_ttl_hours)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a session token for an operator.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue_session(&self, user_id: Uuid, email: &str) -> Result<SessionToken, JwtError> {
        let expires_at = Utc::now() + Duration::hours(self.config.session_ttl_hours);
        let claims = Claims::new(user_id, email, expires_at);

        let token = self.encode_claims(&claims)?;
        Ok(SessionToken { token, expires_at })
    }

    /// Signs arbitrary claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the session has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or forged.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the session lifetime in seconds.
    #[must_use]
    pub const fn session_ttl_secs(&self) -> i64 {
        self.config.session_ttl_hours * 3600
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            session_ttl_hours: 24,
        })
    }

    #[test]
    fn test_issue_and_validate_session() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let session = service.issue_session(user_id, "ops@example.com").unwrap();
        assert!(!session.token.is_empty());

        let claims = service.validate_token(&session.token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "ops@example.com");
    }

    #[test]
    fn test_session_expires_after_ttl() {
        let service = create_test_service();
        let before = Utc::now();

        let session = service.issue_session(Uuid::new_v4(), "a@b.com").unwrap();

        let ttl = session.expires_at - before;
        assert!(ttl <= Duration::hours(24));
        assert!(ttl > Duration::hours(23));
        assert_eq!(service.session_ttl_secs(), 86_400);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = create_test_service();
        let claims = Claims::new(
            Uuid::new_v4(),
            "a@b.com",
            Utc::now() - Duration::hours(2),
        );
        let token = service.encode_claims(&claims).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = JwtService::new(JwtConfig {
            secret: "another-secret".to_string(),
            session_ttl_hours: 24,
        });
        let session = other.issue_session(Uuid::new_v4(), "a@b.com").unwrap();

        let result = create_test_service().validate_token(&session.token);
        assert!(matches!(result, Err(JwtError::DecodingError(_))));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        let result = service.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
