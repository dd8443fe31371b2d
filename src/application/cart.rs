//! Per-user cart operations.

use std::sync::Arc;

use tracing::debug;

use crate::domain::cart::Cart;
use crate::domain::error::DomainError;
use crate::domain::id::{ProductId, UserId};
use crate::domain::user::User;
use crate::error::{Error, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::UserStore;

/// Reads and edits the cart stored on a user account.
pub struct CartService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: UserStore> CartService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    async fn user(&self, id: &UserId) -> Result<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| Error::not_found("user", id))
    }

    async fn save(&self, mut user: User) -> Result<Cart> {
        user.updated_at = Some(self.clock.now());
        if !self.store.update_user(&user).await? {
            return Err(Error::not_found("user", &user.id));
        }
        Ok(user.cart)
    }

    /// Add one unit of `item` in `size`.
    pub async fn add(&self, user: &UserId, item: &ProductId, size: &str) -> Result<Cart> {
        if size.trim().is_empty() {
            return Err(DomainError::MissingField { field: "size" }.into());
        }
        let mut account = self.user(user).await?;
        let quantity = account.cart.add_one(item, size);
        debug!(user = %user, item = %item, size, quantity, "Added to cart");
        self.save(account).await
    }

    /// Set the quantity of `item` in `size`. Zero removes the line.
    pub async fn update(
        &self,
        user: &UserId,
        item: &ProductId,
        size: &str,
        quantity: i64,
    ) -> Result<Cart> {
        let mut account = self.user(user).await?;
        account.cart.set_quantity(item, size, quantity)?;
        debug!(user = %user, item = %item, size, quantity, "Cart updated");
        self.save(account).await
    }

    pub async fn get(&self, user: &UserId) -> Result<Cart> {
        Ok(self.user(user).await?.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::testkit::clock::ManualClock;

    async fn setup() -> (CartService<MemoryStore>, UserId) {
        let store = Arc::new(MemoryStore::new());
        let user = User {
            id: UserId::generate(),
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            password_hash: String::new(),
            cart: Cart::new(),
            wishlist: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        store.insert_user(&user).await.unwrap();
        let service = CartService::new(store, Arc::new(ManualClock::default()));
        (service, user.id)
    }

    #[tokio::test]
    async fn add_then_zero_empties_cart() {
        let (carts, user) = setup().await;
        let item = ProductId::new("p1");

        carts.add(&user, &item, "M").await.unwrap();
        let cart = carts.add(&user, &item, "M").await.unwrap();
        assert_eq!(cart.quantity(&item, "M"), 2);

        let cart = carts.update(&user, &item, "M", 0).await.unwrap();
        assert!(cart.is_empty());
        assert!(carts.get(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_quantity_is_rejected() {
        let (carts, user) = setup().await;
        let err = carts
            .update(&user, &ProductId::new("p1"), "M", -2)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::NegativeQuantity { quantity: -2 })
        ));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (carts, _user) = setup().await;
        assert!(matches!(
            carts.get(&UserId::new("ghost")).await,
            Err(Error::NotFound { entity: "user", .. })
        ));
    }
}
