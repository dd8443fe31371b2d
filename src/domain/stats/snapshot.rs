//! Statistics snapshots for products and orders.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::{distinct, mean, Partition};
use super::trend::{count_change, percent_change};
use super::window::MonthWindows;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::product::Product;

/// Catalog snapshot with month-over-month trends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    /// Products created this month vs last month.
    pub total_products_change: i64,
    pub categories: usize,
    /// Categories seen this month but not last month.
    pub new_categories: usize,
    pub on_discount: usize,
    pub discount_change: i64,
    pub avg_price: Decimal,
    pub price_change: i64,
    pub updated_at: DateTime<Utc>,
}

impl ProductStats {
    #[must_use]
    pub fn compute(products: &[Product], windows: &MonthWindows) -> Self {
        let partition = Partition::of(products, windows);
        let category = |p: &Product| p.category.clone();

        let categories = distinct(products, category);
        let current_categories = distinct(partition.current.iter().copied(), category);
        let previous_categories = distinct(partition.previous.iter().copied(), category);

        let on_discount = products.iter().filter(|p| p.is_discounted()).count();
        let previous_on_discount = partition
            .previous
            .iter()
            .filter(|p| p.is_discounted())
            .count();

        let avg_price = mean(products, |p| p.price);
        let previous_avg_price = mean(partition.previous.iter().copied(), |p| p.price);

        Self {
            total_products: partition.total,
            total_products_change: count_change(partition.current.len(), partition.previous.len()),
            categories: categories.len(),
            new_categories: current_categories.difference(&previous_categories).count(),
            on_discount,
            discount_change: count_change(on_discount, previous_on_discount),
            avg_price,
            price_change: percent_change(avg_price, previous_avg_price),
            updated_at: windows.now,
        }
    }
}

/// Order-book snapshot with month-over-month trends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_orders_change: i64,
    pub by_status: BTreeMap<String, usize>,
    pub statuses: usize,
    /// Statuses reached by this month's orders but by none of last month's.
    pub new_statuses: usize,
    pub paid_orders: usize,
    pub avg_amount: Decimal,
    pub amount_change: i64,
    pub updated_at: DateTime<Utc>,
}

impl OrderStats {
    #[must_use]
    pub fn compute(orders: &[Order], windows: &MonthWindows) -> Self {
        let partition = Partition::of(orders, windows);
        let status = |o: &Order| o.status.as_str().to_string();

        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        for order in orders {
            *by_status.entry(status(order)).or_insert(0) += 1;
        }

        let current_statuses: BTreeSet<String> =
            distinct(partition.current.iter().copied(), status);
        let previous_statuses = distinct(partition.previous.iter().copied(), status);

        let avg_amount = mean(orders, |o| o.amount);
        let previous_avg_amount = mean(partition.previous.iter().copied(), |o| o.amount);

        Self {
            total_orders: partition.total,
            total_orders_change: count_change(partition.current.len(), partition.previous.len()),
            statuses: by_status.len(),
            by_status,
            new_statuses: current_statuses.difference(&previous_statuses).count(),
            paid_orders: orders.iter().filter(|o| o.payment).count(),
            avg_amount,
            amount_change: percent_change(avg_amount, previous_avg_amount),
            updated_at: windows.now,
        }
    }

    /// Count for one status, zero when absent.
    #[must_use]
    pub fn count(&self, status: OrderStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }
}
