mod harness;

use std::sync::Arc;

use chrono::Duration;
use rust_decimal_macros::dec;

use harness::temp_db::{at, TempDb};
use storefront::application::statistics::{Source, StatsEnvelope};
use storefront::domain::order::OrderStatus;
use storefront::domain::user::Registration;
use storefront::testkit::clock::ManualClock;
use storefront::testkit::domain::{checkout, new_product};

#[tokio::test]
async fn product_stats_compare_this_month_with_last() {
    let db = TempDb::create();
    let clock = Arc::new(ManualClock::at(at(2, 10)));
    let services = db.services(clock.clone());

    services
        .catalog
        .add_product(new_product("tee", "Men", dec!(100)))
        .await
        .unwrap();
    services
        .catalog
        .add_product(new_product("shirt", "Men", dec!(200)))
        .await
        .unwrap();

    clock.set(at(3, 15));
    services
        .catalog
        .add_product(new_product("jacket", "Men", dec!(300)))
        .await
        .unwrap();
    services
        .catalog
        .add_product(new_product("dress", "Women", dec!(100)))
        .await
        .unwrap();
    let mut discounted = new_product("romper", "Kids", dec!(100));
    discounted.discount = 20;
    services.catalog.add_product(discounted).await.unwrap();

    // The current window is [start of month, now), so read stats a moment later.
    clock.advance(Duration::seconds(1));
    let response = services.statistics.product_stats().await.unwrap();
    assert_eq!(response.source, Source::Fresh);

    let stats = response.stats;
    assert_eq!(stats.total_products, 5);
    assert_eq!(stats.total_products_change, 50);
    assert_eq!(stats.categories, 3);
    assert_eq!(stats.new_categories, 2);
    assert_eq!(stats.on_discount, 1);
    assert_eq!(stats.discount_change, 100);
    assert_eq!(stats.avg_price, dec!(160));
    assert_eq!(stats.price_change, 7);
    assert_eq!(stats.updated_at, at(3, 15) + Duration::seconds(1));
}

#[tokio::test]
async fn cached_stats_survive_until_ttl_or_a_write() {
    let db = TempDb::create();
    let clock = Arc::new(ManualClock::at(at(5, 15)));
    let services = db.services(clock.clone());

    let first = services.statistics.product_stats().await.unwrap();
    assert_eq!(first.source, Source::Fresh);
    assert_eq!(first.stats.total_products, 0);

    clock.advance(Duration::seconds(60));
    let cached = services.statistics.product_stats().await.unwrap();
    assert_eq!(cached.source, Source::Cache);
    assert_eq!(cached.stats, first.stats);

    services
        .catalog
        .add_product(new_product("tee", "Men", dec!(10)))
        .await
        .unwrap();
    let after_write = services.statistics.product_stats().await.unwrap();
    assert_eq!(after_write.source, Source::Fresh);
    assert_eq!(after_write.stats.total_products, 1);

    clock.advance(Duration::seconds(301));
    let expired = services.statistics.product_stats().await.unwrap();
    assert_eq!(expired.source, Source::Fresh);
    assert_eq!(expired.stats.updated_at, clock_now(&clock));
}

fn clock_now(clock: &ManualClock) -> chrono::DateTime<chrono::Utc> {
    use storefront::port::Clock;
    clock.now()
}

#[tokio::test]
async fn order_stats_track_statuses_and_invalidate_on_order_writes() {
    let db = TempDb::create();
    let clock = Arc::new(ManualClock::at(at(4, 12)));
    let services = db.services(clock.clone());

    let session = services
        .auth
        .register(Registration {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password: "password123".into(),
        })
        .await
        .unwrap();
    let user = session.user_id.unwrap();

    services
        .orders
        .place_cod(&user, checkout("tee", dec!(100)))
        .await
        .unwrap();

    clock.set(at(5, 12));
    let paid = services
        .orders
        .place_cod(&user, checkout("shirt", dec!(300)))
        .await
        .unwrap();

    clock.advance(Duration::seconds(1));
    let stats = services.statistics.order_stats().await.unwrap();
    assert_eq!(stats.source, Source::Fresh);
    assert_eq!(stats.stats.total_orders, 2);
    assert_eq!(stats.stats.total_orders_change, 0);
    assert_eq!(stats.stats.count(OrderStatus::OrderPlaced), 2);
    assert_eq!(stats.stats.avg_amount, dec!(200));
    assert_eq!(stats.stats.amount_change, 100);

    let cached = services.statistics.order_stats().await.unwrap();
    assert_eq!(cached.source, Source::Cache);

    services
        .orders
        .update_status(&paid.id, OrderStatus::Shipped)
        .await
        .unwrap();
    let refreshed = services.statistics.order_stats().await.unwrap();
    assert_eq!(refreshed.source, Source::Fresh);
    assert_eq!(refreshed.stats.count(OrderStatus::Shipped), 1);
    assert_eq!(refreshed.stats.count(OrderStatus::OrderPlaced), 1);
    assert_eq!(refreshed.stats.statuses, 2);
    assert_eq!(refreshed.stats.new_statuses, 1);
}

#[tokio::test]
async fn records_created_at_the_read_instant_are_not_yet_counted() {
    let db = TempDb::create();
    let clock = Arc::new(ManualClock::at(at(7, 9)));
    let services = db.services(clock.clone());

    services
        .catalog
        .add_product(new_product("tee", "Men", dec!(10)))
        .await
        .unwrap();

    let same_instant = services.statistics.product_stats().await.unwrap();
    assert_eq!(same_instant.stats.total_products, 1);
    assert_eq!(same_instant.stats.total_products_change, 0);
    assert_eq!(same_instant.stats.new_categories, 0);

    clock.advance(Duration::seconds(301));
    let later = services.statistics.product_stats().await.unwrap();
    assert_eq!(later.source, Source::Fresh);
    assert_eq!(later.stats.total_products_change, 100);
    assert_eq!(later.stats.new_categories, 1);
}

#[tokio::test]
async fn envelope_uses_camel_case_keys() {
    let db = TempDb::create();
    let services = db.services(Arc::new(ManualClock::default()));

    let response = services.statistics.order_stats().await;
    let value = serde_json::to_value(StatsEnvelope::from(response)).unwrap();

    assert_eq!(value["success"], true);
    assert_eq!(value["source"], "fresh");
    assert_eq!(value["stats"]["totalOrders"], 0);
    assert_eq!(value["stats"]["totalOrdersChange"], 0);
    assert!(value["stats"]["byStatus"].is_object());
    assert!(value.get("message").is_none());
}
