//! Handler for the `stats` command group.

use serde_json::json;

use crate::adapter::inbound::cli::context::CliContext;
use crate::adapter::inbound::cli::output;
use crate::application::statistics::{Source, StatsEnvelope};
use crate::domain::stats::{OrderStats, ProductStats};
use crate::error::Result;

fn source_label(source: Source) -> &'static str {
    match source {
        Source::Cache => "cache",
        Source::Fresh => "fresh",
    }
}

/// Execute `stats products`.
pub async fn execute_products(ctx: &CliContext) -> Result<()> {
    let response = ctx.services.statistics.product_stats().await?;
    if output::is_json() {
        let envelope = StatsEnvelope::from(Ok(response));
        output::json_output(json!(envelope));
        return Ok(());
    }
    print_products(&response.stats, response.source);
    Ok(())
}

/// Execute `stats orders`.
pub async fn execute_orders(ctx: &CliContext) -> Result<()> {
    let response = ctx.services.statistics.order_stats().await?;
    if output::is_json() {
        let envelope = StatsEnvelope::from(Ok(response));
        output::json_output(json!(envelope));
        return Ok(());
    }
    print_orders(&response.stats, response.source);
    Ok(())
}

fn print_products(stats: &ProductStats, source: Source) {
    output::section("Catalog");
    output::field(
        "Products",
        format!(
            "{} {}",
            output::highlight(stats.total_products),
            output::trend(stats.total_products_change)
        ),
    );
    output::field(
        "Categories",
        format!("{} ({} new this month)", stats.categories, stats.new_categories),
    );
    output::field(
        "On discount",
        format!(
            "{} {}",
            stats.on_discount,
            output::trend(stats.discount_change)
        ),
    );
    output::field(
        "Average price",
        format!(
            "{} {}",
            stats.avg_price.round_dp(2),
            output::trend(stats.price_change)
        ),
    );
    print_footer(stats.updated_at, source);
}

fn print_orders(stats: &OrderStats, source: Source) {
    output::section("Orders");
    output::field(
        "Orders",
        format!(
            "{} {}",
            output::highlight(stats.total_orders),
            output::trend(stats.total_orders_change)
        ),
    );
    output::field("Paid", stats.paid_orders);
    output::field(
        "Average amount",
        format!(
            "{} {}",
            stats.avg_amount.round_dp(2),
            output::trend(stats.amount_change)
        ),
    );
    output::field(
        "Statuses",
        format!("{} ({} new this month)", stats.statuses, stats.new_statuses),
    );
    for (status, count) in &stats.by_status {
        output::field(&format!("  {status}"), count);
    }
    print_footer(stats.updated_at, source);
}

fn print_footer(updated_at: chrono::DateTime<chrono::Utc>, source: Source) {
    output::field(
        "Computed",
        output::muted(format!(
            "{} ({})",
            updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            source_label(source)
        )),
    );
}
