//! Builders for domain values used across tests.
//!
//! Provides concise factory functions so tests focus on assertions rather
//! than construction boilerplate.

use rust_decimal::Decimal;

use crate::domain::id::ProductId;
use crate::domain::order::{Address, OrderItem, PlaceOrder};
use crate::domain::product::NewProduct;

/// A valid product input in `category` at `price`.
pub fn new_product(name: &str, category: &str, price: Decimal) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        images: vec![format!("https://cdn.example.com/{name}.png")],
        category: category.to_string(),
        sub_category: "Topwear".to_string(),
        sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
        ..Default::default()
    }
}

/// A delivery address with every field filled in.
pub fn address() -> Address {
    Address {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha@example.com".to_string(),
        street: "12 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        state: "KA".to_string(),
        zip_code: "560001".to_string(),
        country: "India".to_string(),
        phone: "9999999999".to_string(),
    }
}

/// Checkout request for one unit of `product` in size M.
pub fn checkout(product: &str, amount: Decimal) -> PlaceOrder {
    PlaceOrder {
        items: vec![OrderItem {
            product_id: ProductId::new(product),
            name: product.to_string(),
            size: "M".to_string(),
            quantity: 1,
            price: amount,
        }],
        amount,
        address: address(),
    }
}
