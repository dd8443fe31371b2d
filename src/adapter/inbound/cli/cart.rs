//! Handlers for the `cart` and `wishlist` command groups.

use serde_json::json;

use crate::adapter::inbound::cli::command::{CartCommand, WishlistCommand};
use crate::adapter::inbound::cli::context::CliContext;
use crate::adapter::inbound::cli::output;
use crate::domain::cart::Cart;
use crate::domain::id::ProductId;
use crate::error::Result;

/// Execute a `cart` subcommand for the logged-in customer.
pub async fn execute_cart(ctx: &CliContext, command: CartCommand) -> Result<()> {
    let user = ctx.customer()?;
    let carts = &ctx.services.cart;
    let (command_name, cart) = match command {
        CartCommand::Add { item_id, size } => (
            "cart.add",
            carts.add(&user, &ProductId::new(item_id), &size).await?,
        ),
        CartCommand::Update {
            item_id,
            size,
            quantity,
        } => (
            "cart.update",
            carts
                .update(&user, &ProductId::new(item_id), &size, quantity)
                .await?,
        ),
        CartCommand::Show => ("cart.show", carts.get(&user).await?),
    };
    print_cart(command_name, &cart);
    Ok(())
}

fn print_cart(command: &str, cart: &Cart) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "success": true,
            "cart": cart,
        }));
        return;
    }
    output::section("Cart");
    if cart.is_empty() {
        output::note("Empty");
        return;
    }
    for (item, size, quantity) in cart.lines() {
        output::field(&format!("{item} ({size})"), quantity);
    }
    output::field("Units", cart.total_units());
}

/// Execute a `wishlist` subcommand for the logged-in customer.
pub async fn execute_wishlist(ctx: &CliContext, command: WishlistCommand) -> Result<()> {
    let user = ctx.customer()?;
    let wishlists = &ctx.services.wishlist;
    let (command_name, ids) = match command {
        WishlistCommand::Add { product_id } => (
            "wishlist.add",
            wishlists.add(&user, &ProductId::new(product_id)).await?,
        ),
        WishlistCommand::Remove { product_id } => (
            "wishlist.remove",
            wishlists.remove(&user, &ProductId::new(product_id)).await?,
        ),
        WishlistCommand::Show => {
            let wishlist = wishlists.list(&user).await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": "wishlist.show",
                    "success": true,
                    "wishlist": wishlist.products,
                    "count": wishlist.count,
                }));
                return Ok(());
            }
            output::section("Wishlist");
            if wishlist.products.is_empty() {
                output::note("Empty");
            }
            for product in &wishlist.products {
                output::field(
                    &product.name,
                    format!("{} {}", product.price, output::muted(&product.id)),
                );
            }
            return Ok(());
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": command_name,
            "success": true,
            "wishlist": ids,
        }));
    } else {
        output::success(&format!("Wishlist has {} products", ids.len()));
    }
    Ok(())
}
