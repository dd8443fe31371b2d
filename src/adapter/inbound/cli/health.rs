use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::SqliteStore;
use crate::application::state::AppServices;
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::health::{health_report, HealthCheckStatus};

/// Run the local health check against `database`.
pub async fn execute(config: &Config, database: &Path) -> Result<()> {
    let path = database.to_string_lossy();
    let opened: Result<AppServices<SqliteStore>> =
        bootstrap::bootstrap(config, Some(path.as_ref()));
    let services = opened.as_ref().map_err(ToString::to_string);
    let report = health_report(config, services).await;

    if output::is_json() {
        output::json_output(json!({
            "command": "health",
            "status": if report.is_healthy() { "healthy" } else { "unhealthy" },
            "checks": report.checks,
        }));
    } else {
        output::section("Health Check");
        output::field("Database", database.display());
        for check in &report.checks {
            let suffix = if check.critical { " (critical)" } else { "" };
            let value = match &check.status {
                HealthCheckStatus::Healthy => output::positive("healthy"),
                HealthCheckStatus::Unhealthy(reason) => {
                    output::negative(format!("unhealthy: {reason}"))
                }
            };
            output::field(&format!("{}{}", check.name, suffix), value);
        }
    }

    if !report.is_healthy() {
        output::error("Health check failed");
        return Err(Error::Connection("health check failed".to_string()));
    }
    output::success("Health check passed");
    Ok(())
}
