//! Catalog management: products and their reviews.
//!
//! Every successful write clears the `product:` cache prefix.

use std::sync::Arc;

use tracing::info;

use crate::application::cache::PRODUCT_PREFIX;
use crate::application::statistics::StatsCache;
use crate::domain::id::{ProductId, UserId};
use crate::domain::product::{NewProduct, Product, ProductUpdate, Review, ReviewOutcome};
use crate::error::{Error, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::ProductStore;

/// Product CRUD and reviews.
pub struct CatalogService<S> {
    store: Arc<S>,
    cache: Arc<StatsCache>,
    clock: Arc<dyn Clock>,
}

impl<S: ProductStore> CatalogService<S> {
    pub fn new(store: Arc<S>, cache: Arc<StatsCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            cache,
            clock,
        }
    }

    fn invalidate(&self) {
        self.cache.invalidate(PRODUCT_PREFIX);
    }

    /// Create a product.
    pub async fn add_product(&self, input: NewProduct) -> Result<Product> {
        let product = input.into_product(self.clock.now())?;
        self.store.insert_product(&product).await?;
        self.invalidate();
        info!(product = %product.id, category = %product.category, "Product added");
        Ok(product)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.store.list_products().await
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Product> {
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| Error::not_found("product", id))
    }

    /// Replace a product's editable fields.
    pub async fn update_product(&self, id: &ProductId, update: ProductUpdate) -> Result<Product> {
        let mut product = self.get_product(id).await?;
        update.apply(&mut product, self.clock.now())?;
        if !self.store.update_product(&product).await? {
            return Err(Error::not_found("product", id));
        }
        self.invalidate();
        info!(product = %product.id, "Product updated");
        Ok(product)
    }

    /// Delete a product.
    pub async fn remove_product(&self, id: &ProductId) -> Result<()> {
        if !self.store.delete_product(id).await? {
            return Err(Error::not_found("product", id));
        }
        self.invalidate();
        info!(product = %id, "Product removed");
        Ok(())
    }

    /// Add or replace `user`'s review of a product.
    pub async fn add_review(
        &self,
        id: &ProductId,
        user: &UserId,
        rating: i64,
        feedback: Option<String>,
    ) -> Result<ReviewOutcome> {
        let now = self.clock.now();
        let review = Review::new(user.clone(), rating, feedback, now)?;
        let mut product = self.get_product(id).await?;
        let outcome = product.upsert_review(review);
        product.updated_at = Some(now);

        if !self.store.update_product(&product).await? {
            return Err(Error::not_found("product", id));
        }
        self.invalidate();
        info!(product = %id, user = %user, ?outcome, "Review saved");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::application::cache::{ORDER_STATS_KEY, PRODUCT_STATS_KEY};
    use crate::application::statistics::StatsSnapshot;
    use crate::domain::error::DomainError;
    use crate::domain::stats::{MonthWindows, OrderStats, ProductStats};
    use crate::testkit::clock::ManualClock;
    use crate::testkit::domain::new_product;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<StatsCache>, CatalogService<MemoryStore>) {
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(StatsCache::new(Duration::seconds(300), clock.clone()));
        let service = CatalogService::new(Arc::new(MemoryStore::new()), cache.clone(), clock);
        (cache, service)
    }

    fn prime(cache: &StatsCache) {
        let windows = MonthWindows::now_local();
        cache.set_default(
            PRODUCT_STATS_KEY,
            StatsSnapshot::Product(ProductStats::compute(&[], &windows)),
        );
        cache.set_default(
            ORDER_STATS_KEY,
            StatsSnapshot::Order(OrderStats::compute(&[], &windows)),
        );
    }

    #[tokio::test]
    async fn every_write_invalidates_product_stats() {
        let (cache, catalog) = setup();

        prime(&cache);
        let product = catalog
            .add_product(new_product("Tee", "Men", dec!(12)))
            .await
            .unwrap();
        assert!(cache.get(PRODUCT_STATS_KEY).is_none());
        assert!(cache.get(ORDER_STATS_KEY).is_some());

        prime(&cache);
        let update = ProductUpdate {
            name: "Tee".into(),
            description: "Soft".into(),
            price: dec!(14),
            category: "Men".into(),
            sub_category: "Topwear".into(),
            ..Default::default()
        };
        catalog.update_product(&product.id, update).await.unwrap();
        assert!(cache.get(PRODUCT_STATS_KEY).is_none());

        prime(&cache);
        catalog
            .add_review(&product.id, &UserId::new("u1"), 4, None)
            .await
            .unwrap();
        assert!(cache.get(PRODUCT_STATS_KEY).is_none());

        prime(&cache);
        catalog.remove_product(&product.id).await.unwrap();
        assert!(cache.get(PRODUCT_STATS_KEY).is_none());
    }

    #[tokio::test]
    async fn failed_write_leaves_cache_alone() {
        let (cache, catalog) = setup();
        prime(&cache);

        let mut input = new_product("Tee", "Men", dec!(12));
        input.name = String::new();
        assert!(catalog.add_product(input).await.is_err());
        assert!(catalog
            .remove_product(&ProductId::new("missing"))
            .await
            .is_err());
        assert!(cache.get(PRODUCT_STATS_KEY).is_some());
    }

    #[tokio::test]
    async fn review_by_same_user_is_updated() {
        let (_cache, catalog) = setup();
        let product = catalog
            .add_product(new_product("Tee", "Men", dec!(12)))
            .await
            .unwrap();
        let user = UserId::new("u1");

        let first = catalog.add_review(&product.id, &user, 3, None).await.unwrap();
        let second = catalog
            .add_review(&product.id, &user, 5, Some("better after washing".into()))
            .await
            .unwrap();
        assert_eq!(first, ReviewOutcome::Added);
        assert_eq!(second, ReviewOutcome::Updated);

        let stored = catalog.get_product(&product.id).await.unwrap();
        assert_eq!(stored.reviews.len(), 1);
        assert_eq!(stored.reviews[0].rating, 5);
    }

    #[tokio::test]
    async fn invalid_rating_is_rejected() {
        let (_cache, catalog) = setup();
        let product = catalog
            .add_product(new_product("Tee", "Men", dec!(12)))
            .await
            .unwrap();
        let err = catalog
            .add_review(&product.id, &UserId::new("u1"), 9, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::InvalidRating { rating: 9 })
        ));
    }
}
