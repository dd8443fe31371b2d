//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{output, paths};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    paths::ensure_parent(path)?;
    fs::write(path, CONFIG_TEMPLATE)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.init",
            "success": true,
            "path": path.display().to_string(),
        }));
        return Ok(());
    }
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Set STOREFRONT_JWT_SECRET (and the admin/payment secrets if used)");
    output::note(&format!(
        "3. Run: storefront config validate -c {}",
        path.display()
    ));
    Ok(())
}

fn set(value: bool) -> &'static str {
    if value {
        "set"
    } else {
        "not set"
    }
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "database": config.database,
            "logging": { "level": config.logging.level, "format": config.logging.format },
            "cache": {
                "ttl_secs": config.cache.ttl_secs,
                "sweep_interval_secs": config.cache.sweep_interval_secs,
            },
            "auth": {
                "admin_email": config.auth.admin_email,
                "token_ttl_hours": config.auth.token_ttl_hours,
                "jwt_secret": config.secrets.jwt_secret.is_some(),
                "admin_password": config.secrets.admin_password.is_some(),
            },
            "payment": {
                "currency": config.payment.currency,
                "key_id": config.payment.key_id,
                "enabled": config.payments_configured(),
            },
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("File", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }
    output::field("Database", &config.database);
    output::field(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );

    output::section("Cache");
    output::field("TTL", format!("{}s", config.cache.ttl_secs));
    output::field("Sweep", format!("every {}s", config.cache.sweep_interval_secs));

    output::section("Auth");
    output::field(
        "Admin",
        config.auth.admin_email.as_deref().unwrap_or("(disabled)"),
    );
    output::field("Token TTL", format!("{}h", config.auth.token_ttl_hours));
    output::field("JWT secret", set(config.secrets.jwt_secret.is_some()));
    output::field(
        "Admin password",
        set(config.secrets.admin_password.is_some()),
    );

    output::section("Payments");
    output::field("Currency", config.payment.currency.to_uppercase());
    output::field(
        "Online",
        if config.payments_configured() {
            output::positive("enabled")
        } else {
            output::muted("disabled (cash on delivery only)")
        },
    );
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    let mut warnings = Vec::new();
    if config.secrets.jwt_secret.is_none() {
        warnings.push("STOREFRONT_JWT_SECRET not set, login is disabled");
    }
    if config.auth.admin_email.is_some() && config.secrets.admin_password.is_none() {
        warnings.push("admin_email set without STOREFRONT_ADMIN_PASSWORD");
    }
    if config.payment.key_id.is_some() && config.secrets.payment_key_secret.is_none() {
        warnings.push("payment key_id set without STOREFRONT_PAYMENT_KEY_SECRET");
    }

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "valid": true,
            "path": path.display().to_string(),
            "warnings": warnings,
        }));
        return Ok(());
    }

    output::success("Configuration is valid");
    for warning in warnings {
        output::warning(warning);
    }
    Ok(())
}
