//! Database model types for Diesel ORM and their domain conversions.
//!
//! List-valued and nested fields are stored as JSON text, decimals as their
//! string form and timestamps as RFC 3339 text.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::schema::{orders, products, users};
use crate::domain::{
    cart::Cart,
    id::{OrderId, ProductId, UserId},
    order::{Order, OrderStatus, PaymentMethod},
    product::Product,
    user::User,
};
use crate::error::{Error, Result};

/// Database row for a product.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub images: String,
    pub category: String,
    pub sub_category: String,
    pub sizes: String,
    pub bestseller: i32,
    pub discount: i32,
    pub stock: i32,
    pub reviews: String,
    pub is_active: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Database row for an order.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct OrderRow {
    pub id: String,
    pub user_id: String,
    pub items: String,
    pub amount: String,
    pub address: String,
    pub status: String,
    pub payment_method: String,
    pub payment: i32,
    pub payment_id: Option<String>,
    pub created_at: Option<String>,
}

/// Database row for a user.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub cart: String,
    pub wishlist: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Parse(e.to_string()))
}

fn from_json<T: DeserializeOwned>(column: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| Error::Parse(format!("{column}: {e}")))
}

fn to_decimal(column: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| Error::Parse(format!("{column}: {e}")))
}

fn to_timestamp(at: Option<DateTime<Utc>>) -> Option<String> {
    at.map(|at| at.to_rfc3339())
}

/// Parse a stored timestamp. Malformed values read as `None`.
pub(crate) fn parse_timestamp(table: &str, id: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => Some(at.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(table, id, value = raw, error = %e, "Unreadable timestamp");
            None
        }
    }
}

fn small_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn non_negative(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

impl ProductRow {
    pub fn from_domain(product: &Product) -> Result<Self> {
        Ok(Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            images: to_json(&product.images)?,
            category: product.category.clone(),
            sub_category: product.sub_category.clone(),
            sizes: to_json(&product.sizes)?,
            bestseller: i32::from(product.bestseller),
            discount: i32::from(product.discount),
            stock: small_int(product.stock),
            reviews: to_json(&product.reviews)?,
            is_active: i32::from(product.is_active),
            created_at: to_timestamp(product.created_at),
            updated_at: to_timestamp(product.updated_at),
        })
    }

    pub fn into_domain(self) -> Result<Product> {
        let created_at = parse_timestamp("products", &self.id, self.created_at.as_deref());
        let updated_at = parse_timestamp("products", &self.id, self.updated_at.as_deref());
        Ok(Product {
            price: to_decimal("price", &self.price)?,
            images: from_json("images", &self.images)?,
            sizes: from_json("sizes", &self.sizes)?,
            reviews: from_json("reviews", &self.reviews)?,
            discount: u8::try_from(self.discount.clamp(0, 100)).unwrap_or(0),
            stock: non_negative(self.stock),
            bestseller: self.bestseller != 0,
            is_active: self.is_active != 0,
            id: ProductId::from(self.id),
            name: self.name,
            description: self.description,
            category: self.category,
            sub_category: self.sub_category,
            created_at,
            updated_at,
        })
    }
}

impl OrderRow {
    pub fn from_domain(order: &Order) -> Result<Self> {
        Ok(Self {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            items: to_json(&order.items)?,
            amount: order.amount.to_string(),
            address: to_json(&order.address)?,
            status: order.status.as_str().to_string(),
            payment_method: order.payment_method.as_str().to_string(),
            payment: i32::from(order.payment),
            payment_id: order.payment_id.clone(),
            created_at: to_timestamp(order.created_at),
        })
    }

    pub fn into_domain(self) -> Result<Order> {
        let created_at = parse_timestamp("orders", &self.id, self.created_at.as_deref());
        let status = OrderStatus::from_str(&self.status)
            .map_err(|e| Error::Parse(format!("status: {e}")))?;
        let payment_method = PaymentMethod::from_str(&self.payment_method)
            .map_err(|e| Error::Parse(format!("payment_method: {e}")))?;
        Ok(Order {
            items: from_json("items", &self.items)?,
            amount: to_decimal("amount", &self.amount)?,
            address: from_json("address", &self.address)?,
            status,
            payment_method,
            payment: self.payment != 0,
            payment_id: self.payment_id,
            id: OrderId::from(self.id),
            user_id: UserId::from(self.user_id),
            created_at,
        })
    }
}

impl UserRow {
    pub fn from_domain(user: &User) -> Result<Self> {
        Ok(Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            cart: to_json(&user.cart)?,
            wishlist: to_json(&user.wishlist)?,
            created_at: to_timestamp(user.created_at),
            updated_at: to_timestamp(user.updated_at),
        })
    }

    pub fn into_domain(self) -> Result<User> {
        let created_at = parse_timestamp("users", &self.id, self.created_at.as_deref());
        let updated_at = parse_timestamp("users", &self.id, self.updated_at.as_deref());
        let cart: Cart = from_json("cart", &self.cart)?;
        Ok(User {
            cart,
            wishlist: from_json("wishlist", &self.wishlist)?,
            id: UserId::from(self.id),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_timestamp_reads_as_none() {
        assert!(parse_timestamp("products", "p1", Some("last tuesday")).is_none());
        assert!(parse_timestamp("products", "p1", None).is_none());
        assert!(parse_timestamp("products", "p1", Some("2024-03-01T10:00:00+00:00")).is_some());
    }

    #[test]
    fn bad_price_is_a_parse_error() {
        let row = ProductRow {
            id: "p1".into(),
            name: "n".into(),
            description: "d".into(),
            price: "ten".into(),
            images: "[]".into(),
            category: "c".into(),
            sub_category: "s".into(),
            sizes: "[]".into(),
            bestseller: 0,
            discount: 0,
            stock: 0,
            reviews: "[]".into(),
            is_active: 1,
            created_at: None,
            updated_at: None,
        };
        assert!(matches!(row.into_domain(), Err(Error::Parse(_))));
    }
}
