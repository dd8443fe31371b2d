use clap::Parser;

use storefront::adapter::inbound::cli::command::{Cli, Commands};
use storefront::adapter::inbound::cli::{self, output};
use storefront::infrastructure::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::configure_output(&cli);

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        // `config` subcommands report problems with the file themselves.
        Err(_) if matches!(cli.command, Commands::Config(_)) => Config::default(),
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    match cli::log_level_override(&cli) {
        Some(level) => config.logging.with_level(level).init(),
        None => config.init_logging(),
    }

    if let Err(e) = cli::run(cli, config).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
