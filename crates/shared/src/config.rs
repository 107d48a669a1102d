//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Operator session configuration.
    pub auth: AuthConfig,
    /// Rates used by the payroll estimator.
    #[serde(default)]
    pub payroll: PayrollConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Operator session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key for signing session tokens.
    pub jwt_secret: String,
    /// Session lifetime in hours.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

fn default_session_ttl_hours() -> i64 {
    24
}

/// Daily benefit rates for the payroll estimator.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Employer cost of the meal voucher per business day.
    #[serde(default = "default_meal_voucher_daily_rate")]
    pub meal_voucher_daily_rate: Decimal,
    /// Employer cost of the transport voucher per business day.
    #[serde(default = "default_transport_voucher_daily_rate")]
    pub transport_voucher_daily_rate: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            meal_voucher_daily_rate: default_meal_voucher_daily_rate(),
            transport_voucher_daily_rate: default_transport_voucher_daily_rate(),
        }
    }
}

fn default_meal_voucher_daily_rate() -> Decimal {
    Decimal::new(15, 0)
}

fn default_transport_voucher_daily_rate() -> Decimal {
    Decimal::new(10, 0)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("GESTAO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-missing")),
                ("GESTAO__DATABASE__URL", Some("postgres://localhost/gestao")),
                ("GESTAO__AUTH__JWT_SECRET", Some("secret")),
                ("GESTAO__SERVER__PORT", Some("9090")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/gestao");
                assert_eq!(config.auth.jwt_secret, "secret");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
            },
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-missing")),
                ("GESTAO__DATABASE__URL", Some("postgres://localhost/gestao")),
                ("GESTAO__AUTH__JWT_SECRET", Some("secret")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.auth.session_ttl_hours, 24);
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
                assert_eq!(config.payroll.meal_voucher_daily_rate, dec!(15));
                assert_eq!(config.payroll.transport_voucher_daily_rate, dec!(10));
            },
        );
    }

    #[test]
    fn test_missing_secret_fails() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("test-missing")),
                ("GESTAO__DATABASE__URL", Some("postgres://localhost/gestao")),
                ("GESTAO__AUTH__JWT_SECRET", None),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
