use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Online payment errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("online payments are not configured, use cash on delivery")]
    NotConfigured,

    #[error("invalid payment signature")]
    InvalidSignature,

    #[error("order {0} is already paid")]
    AlreadyPaid(String),

    #[error("amount {0} is too large for the payment gateway")]
    AmountOutOfRange(rust_decimal::Decimal),
}

/// Authentication and authorization failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no token provided")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("user doesn't exist")]
    UnknownUser,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    EmailTaken,

    #[error("admin privileges required")]
    AdminRequired,

    #[error("not allowed to access {0}")]
    Forbidden(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True when the failure comes from the record store rather than the caller.
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Database(_) | Self::Parse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}
