use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use storefront::adapter::outbound::sqlite::SqliteStore;
use storefront::application::state::AppServices;
use storefront::infrastructure::bootstrap::{build_services_with_clock, open_store};
use storefront::infrastructure::config::settings::{Config, Secrets};
use storefront::testkit::clock::ManualClock;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@shop.test";
pub const ADMIN_PASSWORD: &str = "hunter22";
pub const PAYMENT_SECRET: &str = "payment-test-secret";

/// Noon UTC on `day` of `month` 2024.
pub fn at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
}

/// Config with auth, an admin account and online payments enabled.
pub fn config() -> Config {
    let toml = format!(
        "[auth]\nadmin_email = \"{ADMIN_EMAIL}\"\n\n[payment]\nkey_id = \"rzp_test_key\"\n"
    );
    Config::parse_toml_with(
        &toml,
        Secrets {
            jwt_secret: Some(JWT_SECRET.into()),
            admin_password: Some(ADMIN_PASSWORD.into()),
            payment_key_secret: Some(PAYMENT_SECRET.into()),
        },
    )
    .expect("test config")
}

/// Temporary SQLite database for integration tests.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("storefront.db");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> SqliteStore {
        open_store(&self.path.to_string_lossy()).expect("open sqlite store")
    }

    /// Services over this database driven by `clock`.
    pub fn services(&self, clock: Arc<ManualClock>) -> AppServices<SqliteStore> {
        build_services_with_clock(&config(), self.store(), clock)
    }
}
