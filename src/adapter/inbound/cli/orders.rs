//! Handler for the `order` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::{AddressArgs, CheckoutArgs, OrderCommand};
use crate::adapter::inbound::cli::context::CliContext;
use crate::adapter::inbound::cli::output;
use crate::application::orders::PaymentConfirmation;
use crate::domain::id::{OrderId, ProductId};
use crate::domain::order::{Address, Order, OrderItem, PlaceOrder};
use crate::error::Result;

impl From<AddressArgs> for Address {
    fn from(args: AddressArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            street: args.street,
            city: args.city,
            state: args.state,
            zip_code: args.zip_code,
            country: args.country,
            phone: args.phone,
        }
    }
}

/// Resolve `--item` arguments against the catalog into a checkout request.
async fn checkout_request(ctx: &CliContext, args: CheckoutArgs) -> Result<PlaceOrder> {
    let mut items = Vec::with_capacity(args.items.len());
    for spec in args.items {
        let product = ctx
            .services
            .catalog
            .get_product(&ProductId::new(spec.product_id))
            .await?;
        items.push(OrderItem {
            name: product.name.clone(),
            price: product.final_price().round_dp(2),
            product_id: product.id,
            size: spec.size,
            quantity: spec.quantity,
        });
    }
    Ok(PlaceOrder {
        items,
        amount: args.amount,
        address: args.address.into(),
    })
}

/// Execute an `order` subcommand.
pub async fn execute(ctx: &CliContext, command: OrderCommand) -> Result<()> {
    let orders = &ctx.services.orders;
    match command {
        OrderCommand::Place(args) => {
            let user = ctx.customer()?;
            let request = checkout_request(ctx, args).await?;
            let order = orders.place_cod(&user, request).await?;
            report("order.place", "Order placed", &order);
        }
        OrderCommand::Pay(args) => {
            let user = ctx.customer()?;
            let request = checkout_request(ctx, args).await?;
            let checkout = orders.place_online(&user, request).await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": "order.pay",
                    "success": true,
                    "order": checkout.order,
                    "gateway": checkout.request,
                }));
            } else {
                report("order.pay", "Online order created", &checkout.order);
                output::section("Gateway request");
                output::field("Key ID", &checkout.request.key_id);
                output::field("Amount", checkout.request.amount_minor);
                output::field("Currency", &checkout.request.currency);
                output::field("Receipt", &checkout.request.receipt);
                output::hint("confirm with `storefront order verify` once paid");
            }
        }
        OrderCommand::Verify {
            order_id,
            gateway_order_id,
            payment_id,
            signature,
        } => {
            let user = ctx.customer()?;
            let confirmation = PaymentConfirmation {
                order_id: OrderId::new(order_id),
                gateway_order_id,
                payment_id,
                signature,
            };
            let order = orders.verify_payment(&user, confirmation).await?;
            report("order.verify", "Payment verified", &order);
        }
        OrderCommand::List => {
            let all = orders.all_orders().await?;
            print_list("order.list", &all);
        }
        OrderCommand::Mine => {
            let user = ctx.customer()?;
            let mine = orders.user_orders(&user).await?;
            print_list("order.mine", &mine);
        }
        OrderCommand::Status { order_id, status } => {
            let order = orders
                .update_status(&OrderId::new(order_id), status)
                .await?;
            report("order.status", "Status updated", &order);
        }
        OrderCommand::Cancel { order_id } => {
            let user = ctx.customer()?;
            let order = orders.cancel(&user, &OrderId::new(order_id)).await?;
            report("order.cancel", "Order cancelled", &order);
        }
        OrderCommand::Clear { yes } => {
            if !yes {
                output::warning("Refusing to delete every order without --yes");
                return Ok(());
            }
            let deleted = orders.clear_all().await?;
            if output::is_json() {
                output::json_output(json!({
                    "command": "order.clear",
                    "success": true,
                    "deleted": deleted,
                }));
            } else {
                output::success(&format!("Deleted {deleted} orders"));
            }
        }
    }
    Ok(())
}

fn report(command: &str, title: &str, order: &Order) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "success": true,
            "order": order,
        }));
        return;
    }
    output::section(title);
    output::field("ID", output::highlight(&order.id));
    output::field("Status", order.status);
    output::field("Amount", order.amount);
    output::field("Method", order.payment_method.as_str());
    output::field("Paid", if order.payment { "yes" } else { "no" });
    output::field("Units", order.unit_count());
    if output::verbosity() > 0 {
        for item in &order.items {
            output::note(&format!(
                "{} x{} ({}) @ {}",
                item.name, item.quantity, item.size, item.price
            ));
        }
    }
}

const LIST_COLUMNS: [(&str, usize); 5] = [
    ("ID", 36),
    ("STATUS", 16),
    ("AMOUNT", 10),
    ("METHOD", 6),
    ("PAID", 4),
];

fn print_list(command: &str, orders: &[Order]) {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "success": true,
            "orders": orders,
        }));
        return;
    }
    if orders.is_empty() {
        output::note("No orders");
        return;
    }
    let widths: Vec<usize> = LIST_COLUMNS.iter().map(|(_, w)| *w).collect();
    output::table_header(&LIST_COLUMNS);
    output::table_separator(&widths);
    for order in orders {
        output::table_row(
            &[
                order.id.to_string(),
                order.status.to_string(),
                order.amount.to_string(),
                order.payment_method.as_str().to_string(),
                if order.payment { "yes" } else { "no" }.to_string(),
            ],
            &widths,
        );
    }
}
