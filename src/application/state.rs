//! Shared application state.

use std::sync::Arc;

use chrono::Duration;

use crate::application::auth::{AdminCredentials, AuthService, TokenIssuer};
use crate::application::cart::CartService;
use crate::application::catalog::CatalogService;
use crate::application::orders::OrderService;
use crate::application::statistics::{StatisticsService, StatsCache};
use crate::application::wishlist::WishlistService;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::payment::PaymentGateway;
use crate::port::outbound::store::{OrderStore, ProductStore, UserStore};

/// Everything needed to build [`AppServices`].
pub struct ServiceDeps<S> {
    pub store: Arc<S>,
    pub clock: Arc<dyn Clock>,
    pub cache_ttl: Duration,
    pub tokens: Option<TokenIssuer>,
    pub admin: Option<AdminCredentials>,
    pub gateway: Option<Arc<dyn PaymentGateway>>,
}

/// Every use-case service over one store, sharing one statistics cache.
pub struct AppServices<S> {
    pub cache: Arc<StatsCache>,
    pub clock: Arc<dyn Clock>,
    pub statistics: StatisticsService<S>,
    pub catalog: CatalogService<S>,
    pub orders: OrderService<S>,
    pub cart: CartService<S>,
    pub wishlist: WishlistService<S>,
    pub auth: AuthService<S>,
}

impl<S> AppServices<S>
where
    S: ProductStore + OrderStore + UserStore,
{
    pub fn new(deps: ServiceDeps<S>) -> Self {
        let ServiceDeps {
            store,
            clock,
            cache_ttl,
            tokens,
            admin,
            gateway,
        } = deps;
        let cache = Arc::new(StatsCache::new(cache_ttl, Arc::clone(&clock)));

        Self {
            statistics: StatisticsService::new(
                Arc::clone(&store),
                Arc::clone(&cache),
                Arc::clone(&clock),
            ),
            catalog: CatalogService::new(
                Arc::clone(&store),
                Arc::clone(&cache),
                Arc::clone(&clock),
            ),
            orders: OrderService::new(
                Arc::clone(&store),
                Arc::clone(&cache),
                Arc::clone(&clock),
                gateway,
            ),
            cart: CartService::new(Arc::clone(&store), Arc::clone(&clock)),
            wishlist: WishlistService::new(Arc::clone(&store), Arc::clone(&clock)),
            auth: AuthService::new(store, Arc::clone(&clock), tokens, admin),
            cache,
            clock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::application::statistics::Source;
    use crate::domain::id::UserId;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::domain::new_product;
    use rust_decimal_macros::dec;

    fn services() -> AppServices<MemoryStore> {
        AppServices::new(ServiceDeps {
            store: Arc::new(MemoryStore::new()),
            clock: Arc::new(ManualClock::default()),
            cache_ttl: Duration::seconds(300),
            tokens: None,
            admin: None,
            gateway: None,
        })
    }

    #[tokio::test]
    async fn services_share_one_cache() {
        let app = services();
        assert_eq!(
            app.statistics.product_stats().await.unwrap().source,
            Source::Fresh
        );
        assert_eq!(
            app.statistics.product_stats().await.unwrap().source,
            Source::Cache
        );

        let product = app
            .catalog
            .add_product(new_product("Tee", "Men", dec!(10)))
            .await
            .unwrap();
        let fresh = app.statistics.product_stats().await.unwrap();
        assert_eq!(fresh.source, Source::Fresh);
        assert_eq!(fresh.stats.total_products, 1);

        app.catalog
            .add_review(&product.id, &UserId::new("u1"), 5, None)
            .await
            .unwrap();
        assert_eq!(
            app.statistics.product_stats().await.unwrap().source,
            Source::Fresh
        );
    }

    #[test]
    fn payments_disabled_without_gateway() {
        assert!(!services().orders.online_payments_enabled());
    }
}
