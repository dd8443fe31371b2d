//! Record store that fails every call.

use crate::domain::{
    id::OrderId, id::ProductId, id::UserId, order::Order, product::Product, user::User,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{OrderStore, ProductStore, UserStore};

/// Simulates an unreachable record store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

fn unreachable_store<T>() -> Result<T> {
    Err(Error::Connection("record store unreachable".to_string()))
}

impl ProductStore for FailingStore {
    async fn insert_product(&self, _product: &Product) -> Result<()> {
        unreachable_store()
    }

    async fn update_product(&self, _product: &Product) -> Result<bool> {
        unreachable_store()
    }

    async fn delete_product(&self, _id: &ProductId) -> Result<bool> {
        unreachable_store()
    }

    async fn get_product(&self, _id: &ProductId) -> Result<Option<Product>> {
        unreachable_store()
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        unreachable_store()
    }

    async fn get_products(&self, _ids: &[ProductId]) -> Result<Vec<Product>> {
        unreachable_store()
    }
}

impl OrderStore for FailingStore {
    async fn insert_order(&self, _order: &Order) -> Result<()> {
        unreachable_store()
    }

    async fn update_order(&self, _order: &Order) -> Result<bool> {
        unreachable_store()
    }

    async fn get_order(&self, _id: &OrderId) -> Result<Option<Order>> {
        unreachable_store()
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        unreachable_store()
    }

    async fn list_orders_for_user(&self, _user: &UserId) -> Result<Vec<Order>> {
        unreachable_store()
    }

    async fn delete_all_orders(&self) -> Result<usize> {
        unreachable_store()
    }
}

impl UserStore for FailingStore {
    async fn insert_user(&self, _user: &User) -> Result<()> {
        unreachable_store()
    }

    async fn update_user(&self, _user: &User) -> Result<bool> {
        unreachable_store()
    }

    async fn get_user(&self, _id: &UserId) -> Result<Option<User>> {
        unreachable_store()
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>> {
        unreachable_store()
    }
}
