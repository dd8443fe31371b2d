//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; secrets (token signing key, admin
//! password, payment key secret) are read from the environment only.
//!
//! # Example
//!
//! ```no_run
//! use storefront::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::auth::{ADMIN_PASSWORD_ENV, JWT_SECRET_ENV};
use crate::domain::user::normalize_email;
use crate::error::{ConfigError, Result};

/// Environment variable holding the payment gateway key secret.
pub const PAYMENT_SECRET_ENV: &str = "STOREFRONT_PAYMENT_KEY_SECRET";

/// Statistics cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cached snapshot, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// How often expired entries are swept, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX))
    }

    #[must_use]
    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Authentication settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Email of the admin account. Admin login is disabled when unset.
    #[serde(default)]
    pub admin_email: Option<String>,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
}

fn default_token_ttl_hours() -> u64 {
    168
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: None,
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::try_from(self.token_ttl_hours).unwrap_or(i64::MAX / 3600))
    }
}

/// Payment gateway settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// ISO currency code sent with gateway order requests.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Public merchant key ID.
    #[serde(default)]
    pub key_id: Option<String>,
}

fn default_currency() -> String {
    "inr".into()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            key_id: None,
        }
    }
}

/// Secrets loaded from the environment.
#[derive(Clone, Default)]
pub struct Secrets {
    pub jwt_secret: Option<String>,
    pub admin_password: Option<String>,
    pub payment_key_secret: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "<set>"
            } else {
                "<unset>"
            }
        }
        f.debug_struct("Secrets")
            .field("jwt_secret", &mask(&self.jwt_secret))
            .field("admin_password", &mask(&self.admin_password))
            .field("payment_key_secret", &mask(&self.payment_key_secret))
            .finish()
    }
}

fn env_secret(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Secrets {
    /// Read every secret from its environment variable. Blank values count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env_secret(JWT_SECRET_ENV),
            admin_password: env_secret(ADMIN_PASSWORD_ENV),
            payment_key_secret: env_secret(PAYMENT_SECRET_ENV),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Path to SQLite database file.
    ///
    /// Defaults to "storefront.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Statistics cache lifetime and sweep cadence.
    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub payment: PaymentConfig,

    /// Never read from the file.
    #[serde(skip)]
    pub secrets: Secrets,
}

fn default_database_path() -> String {
    "storefront.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            database: default_database_path(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            payment: PaymentConfig::default(),
            secrets: Secrets::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content, reading secrets from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with(content, Secrets::from_env())
    }

    /// Parse configuration from TOML content with explicit secrets.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml_with(content: &str, secrets: Secrets) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.secrets = secrets;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        Self::parse_toml("")
    }

    /// Validate configuration values.
    ///
    /// Checks that all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ttl_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.sweep_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sweep_interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.sweep_interval_secs >= self.cache.ttl_secs {
            return Err(ConfigError::InvalidValue {
                field: "sweep_interval_secs",
                reason: "must be shorter than ttl_secs".to_string(),
            }
            .into());
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(ConfigError::InvalidValue {
                field: "token_ttl_hours",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if let Some(email) = &self.auth.admin_email {
            normalize_email(email).map_err(|e| ConfigError::InvalidValue {
                field: "admin_email",
                reason: e.to_string(),
            })?;
        }
        let currency = self.payment.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidValue {
                field: "currency",
                reason: "must be a three-letter currency code".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// True when both the key ID and the key secret are present.
    #[must_use]
    pub fn payments_configured(&self) -> bool {
        self.payment.key_id.is_some() && self.secrets.payment_key_secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(content: &str) -> Result<Config> {
        Config::parse_toml_with(content, Secrets::default())
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.database, "storefront.db");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.cache.sweep_interval_secs, 60);
        assert_eq!(config.auth.token_ttl_hours, 168);
        assert_eq!(config.payment.currency, "inr");
        assert_eq!(config.logging.level, "info");
        assert!(!config.payments_configured());
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse(
            r#"
            database = "/tmp/shop.db"

            [logging]
            level = "debug"
            format = "json"

            [cache]
            ttl_secs = 120
            sweep_interval_secs = 10

            [auth]
            admin_email = "admin@shop.test"

            [payment]
            currency = "usd"
            key_id = "rzp_test_1"
            "#,
        )
        .unwrap();
        assert_eq!(config.database, "/tmp/shop.db");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.cache.ttl(), chrono::Duration::seconds(120));
        assert_eq!(
            config.cache.sweep_interval(),
            std::time::Duration::from_secs(10)
        );
        assert_eq!(config.auth.admin_email.as_deref(), Some("admin@shop.test"));
        assert_eq!(config.payment.key_id.as_deref(), Some("rzp_test_1"));
    }

    #[test]
    fn sweep_must_be_shorter_than_ttl() {
        let err = parse("[cache]\nttl_secs = 60\nsweep_interval_secs = 60\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "sweep_interval_secs",
                ..
            })
        ));
        assert!(parse("[cache]\nttl_secs = 0\n").is_err());
    }

    #[test]
    fn rejects_bad_currency_and_admin_email() {
        assert!(parse("[payment]\ncurrency = \"rupees\"\n").is_err());
        assert!(parse("[auth]\nadmin_email = \"not-an-email\"\n").is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            parse("database = ").unwrap_err(),
            Error::Config(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn payments_need_key_id_and_secret() {
        let secrets = Secrets {
            payment_key_secret: Some("shh".into()),
            ..Secrets::default()
        };
        let config =
            Config::parse_toml_with("[payment]\nkey_id = \"rzp\"\n", secrets.clone()).unwrap();
        assert!(config.payments_configured());
        let config = Config::parse_toml_with("", secrets).unwrap();
        assert!(!config.payments_configured());
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let secrets = Secrets {
            jwt_secret: Some("very-secret".into()),
            ..Secrets::default()
        };
        let rendered = format!("{secrets:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<set>"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.cache.ttl_secs, 300);
        assert!(Config::load(dir.path().join("absent.toml")).is_err());
    }
}
