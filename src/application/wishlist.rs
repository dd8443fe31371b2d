//! Per-user wishlist operations.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::id::{ProductId, UserId};
use crate::domain::product::Product;
use crate::domain::user::User;
use crate::error::{Error, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::{ProductStore, UserStore};

/// Wishlisted products, resolved against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Wishlist {
    pub products: Vec<Product>,
    pub count: usize,
}

pub struct WishlistService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> WishlistService<S>
where
    S: ProductStore + UserStore,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn user(&self, id: &UserId) -> Result<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| Error::not_found("user", id))
    }

    async fn save(&self, mut user: User) -> Result<Vec<ProductId>> {
        user.updated_at = Some(self.clock.now());
        self.store.update_user(&user).await?;
        Ok(user.wishlist)
    }

    /// Add a product. Adding twice keeps a single entry.
    pub async fn add(&self, user: &UserId, product: &ProductId) -> Result<Vec<ProductId>> {
        let mut account = self.user(user).await?;
        if !account.wish(product) {
            return Ok(account.wishlist);
        }
        self.save(account).await
    }

    pub async fn remove(&self, user: &UserId, product: &ProductId) -> Result<Vec<ProductId>> {
        let mut account = self.user(user).await?;
        if !account.unwish(product) {
            return Ok(account.wishlist);
        }
        self.save(account).await
    }

    /// Wishlisted products that still exist, in wishlist order.
    pub async fn list(&self, user: &UserId) -> Result<Wishlist> {
        let account = self.user(user).await?;
        let found = self.store.get_products(&account.wishlist).await?;
        let products: Vec<Product> = account
            .wishlist
            .iter()
            .filter_map(|id| found.iter().find(|p| &p.id == id).cloned())
            .collect();
        Ok(Wishlist {
            count: products.len(),
            products,
        })
    }
}
