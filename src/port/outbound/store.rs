//! Persistence ports for products, orders and users.

use std::future::Future;

use crate::domain::{
    id::OrderId, id::ProductId, id::UserId, order::Order, product::Product, user::User,
};
use crate::error::Result;

/// Storage operations for catalog products.
pub trait ProductStore: Send + Sync {
    /// Insert a new product.
    fn insert_product(&self, product: &Product) -> impl Future<Output = Result<()>> + Send;

    /// Replace an existing product. Returns false when it does not exist.
    fn update_product(&self, product: &Product) -> impl Future<Output = Result<bool>> + Send;

    /// Delete a product by ID.
    fn delete_product(&self, id: &ProductId) -> impl Future<Output = Result<bool>> + Send;

    /// Get a product by ID.
    fn get_product(&self, id: &ProductId)
        -> impl Future<Output = Result<Option<Product>>> + Send;

    /// List every product.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Get the products with the given IDs, skipping unknown ones.
    fn get_products(&self, ids: &[ProductId])
        -> impl Future<Output = Result<Vec<Product>>> + Send;
}

/// Storage operations for orders.
pub trait OrderStore: Send + Sync {
    fn insert_order(&self, order: &Order) -> impl Future<Output = Result<()>> + Send;

    /// Replace an existing order. Returns false when it does not exist.
    fn update_order(&self, order: &Order) -> impl Future<Output = Result<bool>> + Send;

    fn get_order(&self, id: &OrderId) -> impl Future<Output = Result<Option<Order>>> + Send;

    /// List every order, newest first.
    fn list_orders(&self) -> impl Future<Output = Result<Vec<Order>>> + Send;

    /// List one user's orders, newest first.
    fn list_orders_for_user(&self, user: &UserId)
        -> impl Future<Output = Result<Vec<Order>>> + Send;

    /// Delete all orders. Returns count deleted.
    fn delete_all_orders(&self) -> impl Future<Output = Result<usize>> + Send;
}

/// Storage operations for customer accounts.
pub trait UserStore: Send + Sync {
    /// Insert a new user. Fails when the email is already registered.
    fn insert_user(&self, user: &User) -> impl Future<Output = Result<()>> + Send;

    /// Replace an existing user. Returns false when it does not exist.
    fn update_user(&self, user: &User) -> impl Future<Output = Result<bool>> + Send;

    fn get_user(&self, id: &UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Look up a user by normalized email.
    fn find_user_by_email(&self, email: &str)
        -> impl Future<Output = Result<Option<User>>> + Send;
}
