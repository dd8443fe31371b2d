//! In-memory store implementation for tests and throwaway sessions.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{
    id::OrderId, id::ProductId, id::UserId, order::Order, product::Product, user::User,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{OrderStore, ProductStore, UserStore};

/// In-memory store for all record types.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<HashMap<ProductId, Product>>,
    orders: RwLock<HashMap<OrderId, Order>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: &Product) -> Result<()> {
        self.products
            .write()
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<bool> {
        let mut products = self.products.write();
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool> {
        Ok(self.products.write().remove(id).is_some())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().get(id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self.products.read().values().cloned().collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(products)
    }

    async fn get_products(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let products = self.products.read();
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }
}

impl OrderStore for MemoryStore {
    async fn insert_order(&self, order: &Order) -> Result<()> {
        self.orders.write().insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn update_order(&self, order: &Order) -> Result<bool> {
        let mut orders = self.orders.write();
        match orders.get_mut(&order.id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_order(&self, id: &OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().get(id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.read().values().cloned().collect();
        newest_first(&mut orders);
        Ok(orders)
    }

    async fn list_orders_for_user(&self, user: &UserId) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .values()
            .filter(|order| &order.user_id == user)
            .cloned()
            .collect();
        newest_first(&mut orders);
        Ok(orders)
    }

    async fn delete_all_orders(&self) -> Result<usize> {
        let mut orders = self.orders.write();
        let count = orders.len();
        orders.clear();
        Ok(count)
    }
}

impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(Error::Database(format!(
                "UNIQUE constraint failed: users.email ({})",
                user.email
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<bool> {
        let mut users = self.users.write();
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }
}
