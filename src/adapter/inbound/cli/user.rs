//! Handler for the `user` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::UserCommand;
use crate::adapter::inbound::cli::context::CliContext;
use crate::adapter::inbound::cli::output;
use crate::application::auth::Session;
use crate::domain::user::{Registration, UserProfile};
use crate::error::Result;

/// Execute a `user` subcommand.
pub async fn execute(ctx: &CliContext, command: UserCommand) -> Result<()> {
    let auth = &ctx.services.auth;
    match command {
        UserCommand::Register {
            name,
            email,
            password,
        } => {
            let session = auth
                .register(Registration {
                    name,
                    email,
                    password,
                })
                .await?;
            print_session("user.register", "Registered", &session);
        }
        UserCommand::Login { email, password } => {
            let session = auth.login(&email, &password).await?;
            print_session("user.login", "Logged in", &session);
        }
        UserCommand::Admin { email, password } => {
            let session = auth.admin_login(&email, &password)?;
            print_session("user.admin", "Admin logged in", &session);
        }
        UserCommand::Me => {
            let user = ctx.customer()?;
            let profile = auth.current_user(&user).await?;
            print_profile("user.me", &profile);
        }
        UserCommand::Rename { name } => {
            let user = ctx.customer()?;
            let profile = auth.update_name(&user, &name).await?;
            print_profile("user.rename", &profile);
        }
    }
    Ok(())
}

fn print_session(command: &str, title: &str, session: &Session) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "success": true,
            "token": session.token,
            "role": session.role,
            "user_id": session.user_id,
        }));
        return;
    }
    output::success(title);
    if let Some(user) = &session.user_id {
        output::field("User", output::highlight(user));
    }
    output::field("Token", &session.token);
    output::hint("export STOREFRONT_TOKEN=<token> to use it");
}

fn print_profile(command: &str, profile: &UserProfile) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "success": true,
            "user": profile,
        }));
        return;
    }
    output::section("Account");
    output::field("ID", output::highlight(&profile.id));
    output::field("Name", &profile.name);
    output::field("Email", &profile.email);
    output::field("Orders", profile.orders.len());
    output::field("Wishlist", profile.wishlist.len());
    output::field("Cart units", profile.cart.total_units());
}
