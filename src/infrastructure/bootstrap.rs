//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::clock::SystemClock;
use crate::adapter::outbound::payment::HmacPaymentGateway;
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteStore};
use crate::application::auth::{AdminCredentials, TokenIssuer};
use crate::application::state::{AppServices, ServiceDeps};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::payment::PaymentGateway;
use crate::port::outbound::store::{OrderStore, ProductStore, UserStore};

/// Open the SQLite database at `path`, applying pending migrations.
///
/// # Errors
/// Returns an error if the pool cannot be created or a migration fails.
pub fn open_store(path: &str) -> Result<SqliteStore> {
    let pool = create_pool(path)?;
    run_migrations(&pool)?;
    info!(database = path, "Database ready");
    Ok(SqliteStore::new(pool))
}

/// Token issuer, when a signing secret is configured.
#[must_use]
pub fn build_token_issuer(config: &Config) -> Option<TokenIssuer> {
    let issuer = config
        .secrets
        .jwt_secret
        .as_deref()
        .map(|secret| TokenIssuer::new(secret, config.auth.token_ttl()));
    if issuer.is_none() {
        warn!("Token secret not set, authentication is disabled");
    }
    issuer
}

/// Admin credentials, when both the email and the password are configured.
#[must_use]
pub fn build_admin_credentials(config: &Config) -> Option<AdminCredentials> {
    let email = config.auth.admin_email.as_ref()?;
    let Some(password) = config.secrets.admin_password.as_ref() else {
        warn!("Admin email configured without a password, admin login is disabled");
        return None;
    };
    Some(AdminCredentials {
        email: email.trim().to_lowercase(),
        password: password.clone(),
    })
}

/// Payment gateway, when the merchant key ID and secret are configured.
#[must_use]
pub fn build_payment_gateway(config: &Config) -> Option<Arc<dyn PaymentGateway>> {
    let (Some(key_id), Some(secret)) = (
        config.payment.key_id.as_ref(),
        config.secrets.payment_key_secret.as_ref(),
    ) else {
        info!("Online payments disabled, cash on delivery only");
        return None;
    };
    Some(Arc::new(HmacPaymentGateway::new(
        key_id.clone(),
        secret.clone(),
        config.payment.currency.clone(),
    )))
}

/// Wire every service over `store` using the system clock.
pub fn build_services<S>(config: &Config, store: S) -> AppServices<S>
where
    S: ProductStore + OrderStore + UserStore,
{
    build_services_with_clock(config, store, Arc::new(SystemClock))
}

/// Wire every service over `store` with an explicit clock.
pub fn build_services_with_clock<S>(
    config: &Config,
    store: S,
    clock: Arc<dyn Clock>,
) -> AppServices<S>
where
    S: ProductStore + OrderStore + UserStore,
{
    AppServices::new(ServiceDeps {
        store: Arc::new(store),
        clock,
        cache_ttl: config.cache.ttl(),
        tokens: build_token_issuer(config),
        admin: build_admin_credentials(config),
        gateway: build_payment_gateway(config),
    })
}

/// Open the configured database and wire every service over it.
///
/// `database` overrides the path from the config file.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub fn bootstrap(config: &Config, database: Option<&str>) -> Result<AppServices<SqliteStore>> {
    let path = database.unwrap_or(&config.database);
    let store = open_store(path)?;
    Ok(build_services(config, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::infrastructure::config::settings::Secrets;

    fn config(toml: &str, secrets: Secrets) -> Config {
        Config::parse_toml_with(toml, secrets).unwrap()
    }

    #[test]
    fn optional_components_follow_configuration() {
        let bare = config("", Secrets::default());
        assert!(build_token_issuer(&bare).is_none());
        assert!(build_admin_credentials(&bare).is_none());
        assert!(build_payment_gateway(&bare).is_none());

        let full = config(
            "[auth]\nadmin_email = \"Admin@Shop.test\"\n[payment]\nkey_id = \"rzp_1\"\n",
            Secrets {
                jwt_secret: Some("jwt".into()),
                admin_password: Some("pw".into()),
                payment_key_secret: Some("key".into()),
            },
        );
        assert!(build_token_issuer(&full).is_some());
        assert_eq!(
            build_admin_credentials(&full).unwrap().email,
            "admin@shop.test"
        );
        assert!(build_payment_gateway(&full).is_some());
    }

    #[test]
    fn services_report_payment_availability() {
        let with_gateway = config(
            "[payment]\nkey_id = \"rzp_1\"\n",
            Secrets {
                payment_key_secret: Some("key".into()),
                ..Secrets::default()
            },
        );
        let services = build_services(&with_gateway, MemoryStore::new());
        assert!(services.orders.online_payments_enabled());
    }

    #[tokio::test]
    async fn bootstrap_opens_and_migrates_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let services = bootstrap(
            &config("", Secrets::default()),
            Some(path.to_str().unwrap()),
        )
        .unwrap();
        let stats = services.statistics.order_stats().await.unwrap();
        assert_eq!(stats.stats.total_orders, 0);
        assert!(path.exists());
    }
}
