//! Per-invocation wiring shared by command handlers.

use std::path::PathBuf;

use crate::adapter::outbound::sqlite::SqliteStore;
use crate::application::state::AppServices;
use crate::domain::id::UserId;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

use super::paths;

/// Loaded configuration, opened database and the caller's token.
pub struct CliContext {
    pub config: Config,
    pub database: PathBuf,
    pub services: AppServices<SqliteStore>,
    token: Option<String>,
}

impl CliContext {
    /// Open the database chosen by `--db`, falling back to the config file.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(config: Config, db: Option<PathBuf>, token: Option<String>) -> Result<Self> {
        let database = db.unwrap_or_else(|| PathBuf::from(&config.database));
        paths::ensure_parent(&database)?;
        let path = database.to_string_lossy().into_owned();
        let services = bootstrap::bootstrap(&config, Some(&path))?;
        Ok(Self {
            config,
            database,
            services,
            token,
        })
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The customer named by `--token`.
    ///
    /// # Errors
    /// Fails when the token is missing, invalid or not a customer token.
    pub fn customer(&self) -> Result<UserId> {
        self.services.auth.require_customer(self.token())
    }
}
