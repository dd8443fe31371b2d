//! Local health checks.

use serde::Serialize;

use crate::application::state::AppServices;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::{OrderStore, ProductStore, UserStore};

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "details", rename_all = "lowercase")]
pub enum HealthCheckStatus {
    Healthy,
    Unhealthy(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckEntry {
    pub name: String,
    pub critical: bool,
    #[serde(flatten)]
    pub status: HealthCheckStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckReport {
    pub checks: Vec<HealthCheckEntry>,
}

impl HealthCheckReport {
    /// True when all critical checks are healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.checks
            .iter()
            .filter(|check| check.critical)
            .all(|check| matches!(&check.status, HealthCheckStatus::Healthy))
    }
}

fn entry(name: &str, critical: bool, problem: Option<String>) -> HealthCheckEntry {
    HealthCheckEntry {
        name: name.to_string(),
        critical,
        status: problem.map_or(HealthCheckStatus::Healthy, HealthCheckStatus::Unhealthy),
    }
}

/// Check the store behind `services` and the optional components in `config`.
///
/// `services` is the error text when the database could not be opened.
pub async fn health_report<S>(
    config: &Config,
    services: Result<&AppServices<S>, String>,
) -> HealthCheckReport
where
    S: ProductStore + OrderStore + UserStore,
{
    let database = match services {
        Ok(services) => services
            .catalog
            .list_products()
            .await
            .err()
            .map(|e| e.to_string()),
        Err(reason) => Some(reason),
    };

    let token = config
        .secrets
        .jwt_secret
        .is_none()
        .then(|| "STOREFRONT_JWT_SECRET not set, login is disabled".to_string());

    let admin = match (&config.auth.admin_email, &config.secrets.admin_password) {
        (Some(_), None) => Some("STOREFRONT_ADMIN_PASSWORD not set".to_string()),
        (None, _) => Some("admin_email not configured".to_string()),
        (Some(_), Some(_)) => None,
    };

    let payments = (!config.payments_configured())
        .then(|| "online payments disabled, cash on delivery only".to_string());

    HealthCheckReport {
        checks: vec![
            entry("Database", true, database),
            entry("Token secret", false, token),
            entry("Admin account", false, admin),
            entry("Payments", false, payments),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::infrastructure::bootstrap::build_services;
    use crate::infrastructure::config::settings::Secrets;
    use crate::testkit::store::FailingStore;

    fn config() -> Config {
        Config::parse_toml_with(
            "",
            Secrets {
                jwt_secret: Some("jwt".into()),
                ..Secrets::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn optional_components_do_not_fail_the_report() {
        let config = config();
        let services = build_services(&config, MemoryStore::new());
        let report = health_report(&config, Ok(&services)).await;
        assert!(report.is_healthy());
        assert_eq!(report.checks[0].status, HealthCheckStatus::Healthy);
        assert!(matches!(
            report.checks[3].status,
            HealthCheckStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_store_is_critical() {
        let config = config();
        let services = build_services(&config, FailingStore);
        let report = health_report(&config, Ok(&services)).await;
        assert!(!report.is_healthy());

        let missing =
            health_report::<MemoryStore>(&config, Err("unable to open".to_string())).await;
        assert!(!missing.is_healthy());
    }

    #[test]
    fn report_serializes_status_and_details() {
        let report = HealthCheckReport {
            checks: vec![entry("Database", true, Some("locked".into()))],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["checks"][0]["status"], "unhealthy");
        assert_eq!(json["checks"][0]["details"], "locked");
        assert_eq!(json["checks"][0]["critical"], true);
    }
}
