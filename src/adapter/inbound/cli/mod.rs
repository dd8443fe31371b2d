//! CLI module graph and command dispatch.

pub mod cart;
pub mod catalog;
pub mod command;
pub mod config;
pub mod context;
pub mod health;
pub mod orders;
pub mod output;
pub mod paths;
pub mod serve;
pub mod stats;
pub mod user;

use std::path::PathBuf;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use command::{Cli, ColorChoice, Commands, ConfigCommand, StatsCommand};
use context::CliContext;

/// Apply `--color`, `--json`, `--quiet` and `-v` to the output layer.
pub fn configure_output(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));
}

/// Log level implied by the global flags, if they override the config file.
#[must_use]
pub fn log_level_override(cli: &Cli) -> Option<&'static str> {
    match (cli.quiet, cli.verbose) {
        (true, _) => Some("warn"),
        (false, 0) => None,
        (false, 1) => Some("debug"),
        (false, _) => Some("trace"),
    }
}

/// Run the parsed command with an already loaded configuration.
///
/// # Errors
/// Returns the first error raised by the command handler.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let Cli {
        command,
        config: config_path,
        db,
        token,
        ..
    } = cli;

    match command {
        Commands::Config(ConfigCommand::Init { force }) => {
            config::execute_init(&config_path, force)
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(&config_path),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&config_path),
        Commands::Health => {
            let database = db.unwrap_or_else(|| PathBuf::from(&config.database));
            health::execute(&config, &database).await
        }
        command => {
            let ctx = CliContext::open(config, db, token)?;
            match command {
                Commands::Stats(StatsCommand::Products) => stats::execute_products(&ctx).await,
                Commands::Stats(StatsCommand::Orders) => stats::execute_orders(&ctx).await,
                Commands::Product(cmd) => catalog::execute(&ctx, cmd).await,
                Commands::Order(cmd) => orders::execute(&ctx, cmd).await,
                Commands::Cart(cmd) => cart::execute_cart(&ctx, cmd).await,
                Commands::Wishlist(cmd) => cart::execute_wishlist(&ctx, cmd).await,
                Commands::User(cmd) => user::execute(&ctx, cmd).await,
                Commands::Serve => serve::execute(&ctx).await,
                Commands::Config(_) | Commands::Health => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn verbosity_flags_map_to_log_levels() {
        assert_eq!(log_level_override(&parse(&["storefront", "health"])), None);
        assert_eq!(
            log_level_override(&parse(&["storefront", "-v", "health"])),
            Some("debug")
        );
        assert_eq!(
            log_level_override(&parse(&["storefront", "-vvv", "health"])),
            Some("trace")
        );
        assert_eq!(
            log_level_override(&parse(&["storefront", "-q", "-v", "health"])),
            Some("warn")
        );
    }
}
