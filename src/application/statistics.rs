//! Cached product and order statistics.
//!
//! A request probes the cache first. On a miss the full record set is read,
//! aggregated against month windows derived from the current instant, stored
//! with the default TTL and returned as `fresh`. A store failure is returned
//! to the caller and nothing is cached.

use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::cache::{TtlCache, ORDER_STATS_KEY, PRODUCT_STATS_KEY};
use crate::domain::stats::{MonthWindows, OrderStats, ProductStats};
use crate::error::Result;
use crate::port::outbound::clock::Clock;
use crate::port::outbound::store::{OrderStore, ProductStore};

/// Cached statistics value.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsSnapshot {
    Product(ProductStats),
    Order(OrderStats),
}

/// Cache shared by the statistics service and every writer that invalidates it.
pub type StatsCache = TtlCache<StatsSnapshot>;

/// Where a statistics response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Fresh,
}

/// Statistics plus their origin.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsResponse<T> {
    pub stats: T,
    pub source: Source,
}

/// Wire shape of a statistics reply.
///
/// `{ success: true, stats, source }` on success,
/// `{ success: false, message }` on failure.
#[derive(Debug, Clone, Serialize)]
pub struct StatsEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> From<Result<StatsResponse<T>>> for StatsEnvelope<T> {
    fn from(result: Result<StatsResponse<T>>) -> Self {
        match result {
            Ok(response) => Self {
                success: true,
                stats: Some(response.stats),
                source: Some(response.source),
                message: None,
            },
            Err(e) => Self {
                success: false,
                stats: None,
                source: None,
                message: Some(e.to_string()),
            },
        }
    }
}

/// Computes and memoizes statistics snapshots.
pub struct StatisticsService<S> {
    store: Arc<S>,
    cache: Arc<StatsCache>,
    clock: Arc<dyn Clock>,
}

impl<S> StatisticsService<S>
where
    S: ProductStore + OrderStore,
{
    pub fn new(store: Arc<S>, cache: Arc<StatsCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            cache,
            clock,
        }
    }

    /// Month windows for the current instant in the process time zone.
    fn windows(&self) -> MonthWindows {
        MonthWindows::for_instant(&self.clock.now().with_timezone(&Local))
    }

    /// Catalog statistics, from cache when live.
    pub async fn product_stats(&self) -> Result<StatsResponse<ProductStats>> {
        if let Some(StatsSnapshot::Product(stats)) = self.cache.get(PRODUCT_STATS_KEY) {
            debug!(key = PRODUCT_STATS_KEY, "Statistics served from cache");
            return Ok(StatsResponse {
                stats,
                source: Source::Cache,
            });
        }

        let products = self.store.list_products().await.map_err(|e| {
            warn!(error = %e, "Product statistics unavailable");
            e
        })?;
        let stats = ProductStats::compute(&products, &self.windows());
        self.cache
            .set_default(PRODUCT_STATS_KEY, StatsSnapshot::Product(stats.clone()));
        debug!(
            key = PRODUCT_STATS_KEY,
            records = products.len(),
            "Statistics recomputed"
        );

        Ok(StatsResponse {
            stats,
            source: Source::Fresh,
        })
    }

    /// Order statistics, from cache when live.
    pub async fn order_stats(&self) -> Result<StatsResponse<OrderStats>> {
        if let Some(StatsSnapshot::Order(stats)) = self.cache.get(ORDER_STATS_KEY) {
            debug!(key = ORDER_STATS_KEY, "Statistics served from cache");
            return Ok(StatsResponse {
                stats,
                source: Source::Cache,
            });
        }

        let orders = self.store.list_orders().await.map_err(|e| {
            warn!(error = %e, "Order statistics unavailable");
            e
        })?;
        let stats = OrderStats::compute(&orders, &self.windows());
        self.cache
            .set_default(ORDER_STATS_KEY, StatsSnapshot::Order(stats.clone()));
        debug!(
            key = ORDER_STATS_KEY,
            records = orders.len(),
            "Statistics recomputed"
        );

        Ok(StatsResponse {
            stats,
            source: Source::Fresh,
        })
    }
}
