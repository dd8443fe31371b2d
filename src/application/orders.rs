//! Checkout, payment verification and order lifecycle.
//!
//! Every successful write clears the `order:` cache prefix.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::application::cache::ORDER_PREFIX;
use crate::application::statistics::StatsCache;
use crate::domain::id::{OrderId, UserId};
use crate::domain::order::{Order, OrderStatus, PaymentMethod, PlaceOrder};
use crate::domain::user::User;
use crate::error::{AuthError, Error, PaymentError, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::payment::{GatewayOrderRequest, PaymentGateway};
use crate::port::outbound::store::{OrderStore, UserStore};

/// An unpaid online order and the request the checkout client sends to the gateway.
#[derive(Debug, Clone, Serialize)]
pub struct OnlineCheckout {
    pub order: Order,
    pub request: GatewayOrderRequest,
}

/// Callback fields returned by the gateway after a payment.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PaymentConfirmation {
    pub order_id: OrderId,
    pub gateway_order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Order placement and management.
pub struct OrderService<S> {
    store: Arc<S>,
    cache: Arc<StatsCache>,
    clock: Arc<dyn Clock>,
    gateway: Option<Arc<dyn PaymentGateway>>,
}

impl<S> OrderService<S>
where
    S: OrderStore + UserStore,
{
    pub fn new(
        store: Arc<S>,
        cache: Arc<StatsCache>,
        clock: Arc<dyn Clock>,
        gateway: Option<Arc<dyn PaymentGateway>>,
    ) -> Self {
        Self {
            store,
            cache,
            clock,
            gateway,
        }
    }

    /// True when online payments can be taken.
    #[must_use]
    pub fn online_payments_enabled(&self) -> bool {
        self.gateway.is_some()
    }

    fn invalidate(&self) {
        self.cache.invalidate(ORDER_PREFIX);
    }

    fn gateway(&self) -> Result<&Arc<dyn PaymentGateway>> {
        self.gateway
            .as_ref()
            .ok_or(Error::Payment(PaymentError::NotConfigured))
    }

    async fn user(&self, id: &UserId) -> Result<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| Error::not_found("user", id))
    }

    async fn order(&self, id: &OrderId) -> Result<Order> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| Error::not_found("order", id))
    }

    async fn clear_cart(&self, mut account: User) -> Result<()> {
        account.cart.clear();
        account.updated_at = Some(self.clock.now());
        self.store.update_user(&account).await?;
        Ok(())
    }

    /// Place a cash-on-delivery order and empty the user's cart.
    pub async fn place_cod(&self, user: &UserId, request: PlaceOrder) -> Result<Order> {
        let order =
            request.into_order(user.clone(), PaymentMethod::CashOnDelivery, self.clock.now())?;
        let account = self.user(user).await?;
        self.store.insert_order(&order).await?;
        self.invalidate();
        self.clear_cart(account).await?;

        info!(order = %order.id, user = %user, amount = %order.amount, "COD order placed");
        Ok(order)
    }

    /// Create an unpaid online order and the matching gateway request.
    pub async fn place_online(&self, user: &UserId, request: PlaceOrder) -> Result<OnlineCheckout> {
        let gateway = self.gateway()?;
        let order = request.into_order(user.clone(), PaymentMethod::Online, self.clock.now())?;
        self.user(user).await?;

        let gateway_request = gateway.order_request(&order.id, order.amount)?;
        self.store.insert_order(&order).await?;
        self.invalidate();

        info!(
            order = %order.id,
            user = %user,
            amount_minor = gateway_request.amount_minor,
            "Online order created"
        );
        Ok(OnlineCheckout {
            order,
            request: gateway_request,
        })
    }

    /// Check the gateway signature and mark the order paid.
    ///
    /// The user's cart is emptied once the payment is confirmed.
    pub async fn verify_payment(
        &self,
        user: &UserId,
        confirmation: PaymentConfirmation,
    ) -> Result<Order> {
        let gateway = self.gateway()?;
        let mut order = self.order(&confirmation.order_id).await?;
        if &order.user_id != user {
            return Err(AuthError::Forbidden(format!("order {}", order.id)).into());
        }
        if order.payment {
            return Err(PaymentError::AlreadyPaid(order.id.to_string()).into());
        }

        if let Err(e) = gateway.verify(
            &confirmation.gateway_order_id,
            &confirmation.payment_id,
            &confirmation.signature,
        ) {
            warn!(order = %order.id, "Payment signature mismatch");
            return Err(e.into());
        }

        order.payment = true;
        order.payment_id = Some(confirmation.payment_id);
        self.persist(&order).await?;
        if let Some(account) = self.store.get_user(user).await? {
            self.clear_cart(account).await?;
        }

        info!(order = %order.id, "Payment verified");
        Ok(order)
    }

    /// Every order, newest first.
    pub async fn all_orders(&self) -> Result<Vec<Order>> {
        self.store.list_orders().await
    }

    /// One user's orders, newest first.
    pub async fn user_orders(&self, user: &UserId) -> Result<Vec<Order>> {
        self.store.list_orders_for_user(user).await
    }

    /// Set an order's status.
    pub async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<Order> {
        let mut order = self.order(id).await?;
        order.status = status;
        self.persist(&order).await?;
        info!(order = %id, status = %status, "Order status updated");
        Ok(order)
    }

    /// Cancel the user's own order before it is out for delivery.
    pub async fn cancel(&self, user: &UserId, id: &OrderId) -> Result<Order> {
        let mut order = self.order(id).await?;
        if &order.user_id != user {
            return Err(AuthError::Forbidden(format!("order {id}")).into());
        }
        order.cancel()?;
        self.persist(&order).await?;
        info!(order = %id, user = %user, "Order cancelled");
        Ok(order)
    }

    /// Write back an existing order. An order deleted since it was read is not found.
    async fn persist(&self, order: &Order) -> Result<()> {
        if !self.store.update_order(order).await? {
            return Err(Error::not_found("order", &order.id));
        }
        self.invalidate();
        Ok(())
    }

    /// Delete every order. Returns count deleted.
    pub async fn clear_all(&self) -> Result<usize> {
        let deleted = self.store.delete_all_orders().await?;
        self.invalidate();
        warn!(deleted, "All orders deleted");
        Ok(deleted)
    }
}
