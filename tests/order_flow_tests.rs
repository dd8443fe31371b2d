mod harness;

use std::sync::Arc;

use rust_decimal_macros::dec;

use harness::temp_db::{at, TempDb, ADMIN_EMAIL, ADMIN_PASSWORD, PAYMENT_SECRET};
use storefront::adapter::outbound::payment::HmacPaymentGateway;
use storefront::adapter::outbound::sqlite::SqliteStore;
use storefront::application::orders::PaymentConfirmation;
use storefront::application::statistics::Source;
use storefront::application::AppServices;
use storefront::domain::id::UserId;
use storefront::domain::order::{OrderStatus, PaymentMethod};
use storefront::domain::product::ReviewOutcome;
use storefront::domain::user::Registration;
use storefront::error::{AuthError, Error, PaymentError};
use storefront::testkit::clock::ManualClock;
use storefront::testkit::domain::{checkout, new_product};

async fn register(services: &AppServices<SqliteStore>, email: &str) -> UserId {
    services
        .auth
        .register(Registration {
            name: "Asha".into(),
            email: email.into(),
            password: "password123".into(),
        })
        .await
        .unwrap()
        .user_id
        .unwrap()
}

#[tokio::test]
async fn cart_checkout_clears_cart_and_shows_in_profile() {
    let db = TempDb::create();
    let services = db.services(Arc::new(ManualClock::at(at(6, 14))));
    let user = register(&services, "asha@example.com").await;

    let product = services
        .catalog
        .add_product(new_product("tee", "Men", dec!(25)))
        .await
        .unwrap();

    services.cart.add(&user, &product.id, "M").await.unwrap();
    let cart = services.cart.add(&user, &product.id, "M").await.unwrap();
    assert_eq!(cart.quantity(&product.id, "M"), 2);

    let order = services
        .orders
        .place_cod(&user, checkout(product.id.as_str(), dec!(50)))
        .await
        .unwrap();
    assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);
    assert!(!order.payment);
    assert_eq!(order.status, OrderStatus::OrderPlaced);

    assert!(services.cart.get(&user).await.unwrap().is_empty());

    let profile = services.auth.current_user(&user).await.unwrap();
    assert_eq!(profile.orders, vec![order.id.to_string()]);

    let mine = services.orders.user_orders(&user).await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn online_payment_is_marked_paid_only_with_a_valid_signature() {
    let db = TempDb::create();
    let services = db.services(Arc::new(ManualClock::at(at(6, 14))));
    let user = register(&services, "pay@example.com").await;

    let checkout_result = services
        .orders
        .place_online(&user, checkout("tee", dec!(499.50)))
        .await
        .unwrap();
    assert_eq!(checkout_result.request.amount_minor, 49950);
    assert!(!checkout_result.order.payment);

    let order_id = checkout_result.order.id.clone();
    let bad = services
        .orders
        .verify_payment(
            &user,
            PaymentConfirmation {
                order_id: order_id.clone(),
                gateway_order_id: "order_gw_1".into(),
                payment_id: "pay_1".into(),
                signature: "deadbeef".into(),
            },
        )
        .await;
    assert!(matches!(
        bad,
        Err(Error::Payment(PaymentError::InvalidSignature))
    ));

    let gateway = HmacPaymentGateway::new("rzp_test_key", PAYMENT_SECRET, "INR");
    let signature = gateway.sign("order_gw_1", "pay_1").unwrap();
    let confirmation = PaymentConfirmation {
        order_id: order_id.clone(),
        gateway_order_id: "order_gw_1".into(),
        payment_id: "pay_1".into(),
        signature,
    };
    let paid = services
        .orders
        .verify_payment(&user, confirmation.clone())
        .await
        .unwrap();
    assert!(paid.payment);

    let again = services.orders.verify_payment(&user, confirmation).await;
    assert!(matches!(
        again,
        Err(Error::Payment(PaymentError::AlreadyPaid(_)))
    ));

    let stats = services.statistics.order_stats().await.unwrap();
    assert_eq!(stats.source, Source::Fresh);
    assert_eq!(stats.stats.paid_orders, 1);
}

#[tokio::test]
async fn customers_cancel_only_their_own_orders() {
    let db = TempDb::create();
    let services = db.services(Arc::new(ManualClock::at(at(6, 14))));
    let owner = register(&services, "owner@example.com").await;
    let other = register(&services, "other@example.com").await;

    let order = services
        .orders
        .place_cod(&owner, checkout("tee", dec!(20)))
        .await
        .unwrap();

    let forbidden = services.orders.cancel(&other, &order.id).await;
    assert!(matches!(forbidden, Err(Error::Auth(AuthError::Forbidden(_)))));

    services
        .orders
        .update_status(&order.id, OrderStatus::OutForDelivery)
        .await
        .unwrap();
    assert!(matches!(
        services.orders.cancel(&owner, &order.id).await,
        Err(Error::Domain(_))
    ));

    services
        .orders
        .update_status(&order.id, OrderStatus::Packing)
        .await
        .unwrap();
    let cancelled = services.orders.cancel(&owner, &order.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    assert_eq!(services.orders.clear_all().await.unwrap(), 1);
    assert!(services.orders.all_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn reviews_are_upserted_per_user() {
    let db = TempDb::create();
    let services = db.services(Arc::new(ManualClock::at(at(6, 14))));
    let user = register(&services, "critic@example.com").await;
    let product = services
        .catalog
        .add_product(new_product("tee", "Men", dec!(25)))
        .await
        .unwrap();

    let first = services
        .catalog
        .add_review(&product.id, &user, 2, Some("thin fabric".into()))
        .await
        .unwrap();
    let second = services
        .catalog
        .add_review(&product.id, &user, 4, None)
        .await
        .unwrap();
    assert_eq!(first, ReviewOutcome::Added);
    assert_eq!(second, ReviewOutcome::Updated);

    let stored = services.catalog.get_product(&product.id).await.unwrap();
    assert_eq!(stored.reviews.len(), 1);
    assert_eq!(stored.average_rating(), Some(4.0));

    assert!(services
        .catalog
        .add_review(&product.id, &user, 6, None)
        .await
        .is_err());
}

#[tokio::test]
async fn wishlist_resolves_products_and_skips_removed_ones() {
    let db = TempDb::create();
    let services = db.services(Arc::new(ManualClock::at(at(6, 14))));
    let user = register(&services, "wish@example.com").await;
    let keep = services
        .catalog
        .add_product(new_product("tee", "Men", dec!(25)))
        .await
        .unwrap();
    let gone = services
        .catalog
        .add_product(new_product("cap", "Men", dec!(5)))
        .await
        .unwrap();

    services.wishlist.add(&user, &keep.id).await.unwrap();
    services.wishlist.add(&user, &keep.id).await.unwrap();
    services.wishlist.add(&user, &gone.id).await.unwrap();
    services.catalog.remove_product(&gone.id).await.unwrap();

    let wishlist = services.wishlist.list(&user).await.unwrap();
    assert_eq!(wishlist.count, 1);
    assert_eq!(wishlist.products[0].id, keep.id);
}

#[tokio::test]
async fn admin_and_customer_tokens_are_kept_apart() {
    let db = TempDb::create();
    let services = db.services(Arc::new(ManualClock::at(at(6, 14))));

    let admin = services.auth.admin_login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    assert!(services.auth.require_admin(Some(&admin.token)).is_ok());
    assert!(matches!(
        services.auth.require_customer(Some(&admin.token)),
        Err(Error::Auth(AuthError::Forbidden(_)))
    ));

    services
        .auth
        .register(Registration {
            name: "Asha".into(),
            email: "Login@Example.com".into(),
            password: "password123".into(),
        })
        .await
        .unwrap();
    let session = services
        .auth
        .login("login@example.com", "password123")
        .await
        .unwrap();
    assert!(services.auth.require_customer(Some(&session.token)).is_ok());
    assert!(matches!(
        services.auth.require_admin(Some(&session.token)),
        Err(Error::Auth(AuthError::AdminRequired))
    ));

    assert!(matches!(
        services.auth.login("login@example.com", "wrong-password").await,
        Err(Error::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        services.auth.admin_login(ADMIN_EMAIL, "nope"),
        Err(Error::Auth(AuthError::InvalidCredentials))
    ));
}
