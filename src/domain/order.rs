//! Orders, their line items and lifecycle status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{OrderId, ProductId, UserId};

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OrderStatus {
    #[default]
    OrderPlaced,
    Packing,
    Shipped,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in fulfilment order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::OrderPlaced,
        OrderStatus::Packing,
        OrderStatus::Shipped,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Label shown to customers and stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderPlaced => "Order Placed",
            Self::Packing => "Packing",
            Self::Shipped => "Shipped",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Customers may cancel until the order is out for delivery.
    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        !matches!(
            self,
            Self::OutForDelivery | Self::Delivered | Self::Cancelled
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    CashOnDelivery,
    Online,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "COD",
            Self::Online => "Online",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COD" => Ok(Self::CashOnDelivery),
            "Online" => Ok(Self::Online),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// A purchased product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    pub size: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: Decimal,
}

/// Delivery address as entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
}

impl Address {
    /// True when every field is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.street,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
            &self.phone,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub amount: Decimal,
    pub address: Address,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment: bool,
    pub payment_id: Option<String>,
    /// `None` when the stored timestamp could not be read.
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Move the order to `Cancelled`, enforcing the dispatch cut-off.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if !self.status.is_cancellable() {
            return Err(DomainError::NotCancellable {
                status: self.status.to_string(),
            });
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Checkout request.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrder {
    pub items: Vec<OrderItem>,
    pub amount: Decimal,
    #[serde(default)]
    pub address: Address,
}

impl PlaceOrder {
    /// Validate the request and create an unpaid order.
    pub fn into_order(
        self,
        user_id: UserId,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<Order, DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::EmptyOrder);
        }
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if self.address.is_blank() {
            return Err(DomainError::MissingField { field: "address" });
        }

        Ok(Order {
            id: OrderId::generate(),
            user_id,
            items: self.items,
            amount: self.amount,
            address: self.address,
            status: OrderStatus::OrderPlaced,
            payment_method: method,
            payment: false,
            payment_id: None,
            created_at: Some(now),
        })
    }
}
