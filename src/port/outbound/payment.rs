//! Online payment gateway port.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::id::OrderId;
use crate::error::PaymentError;

/// Order request handed to the client-side checkout widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayOrderRequest {
    /// Public key the checkout widget authenticates with.
    pub key_id: String,
    /// Amount in the currency's minor unit (paise, cents).
    pub amount_minor: i64,
    pub currency: String,
    /// Our order ID, echoed back by the gateway.
    pub receipt: String,
}

/// Payment gateway operations.
///
/// Remote order creation is left to the gateway's own client; this port
/// only shapes the request and checks the callback signature.
pub trait PaymentGateway: Send + Sync {
    /// Build the gateway order request for `amount`.
    fn order_request(
        &self,
        order: &OrderId,
        amount: Decimal,
    ) -> Result<GatewayOrderRequest, PaymentError>;

    /// Verify the signature the gateway attached to a completed payment.
    fn verify(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), PaymentError>;
}
