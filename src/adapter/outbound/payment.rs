//! HMAC-signed payment gateway adapter.
//!
//! The gateway signs `"{gateway_order_id}|{payment_id}"` with the merchant
//! key secret (HMAC-SHA256, hex). Remote order creation is done by the
//! checkout client with the request built here.

use hmac::{Hmac, Mac};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sha2::Sha256;

use crate::domain::id::OrderId;
use crate::error::PaymentError;
use crate::port::outbound::payment::{GatewayOrderRequest, PaymentGateway};

type HmacSha256 = Hmac<Sha256>;

/// Gateway configured with merchant credentials.
#[derive(Clone)]
pub struct HmacPaymentGateway {
    key_id: String,
    key_secret: String,
    currency: String,
}

impl std::fmt::Debug for HmacPaymentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacPaymentGateway")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("currency", &self.currency)
            .finish()
    }
}

impl HmacPaymentGateway {
    #[must_use]
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            currency: currency.into(),
        }
    }

    fn mac(&self, gateway_order_id: &str, payment_id: &str) -> Result<HmacSha256, PaymentError> {
        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())
            .map_err(|_| PaymentError::NotConfigured)?;
        mac.update(gateway_order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Ok(mac)
    }

    /// Hex signature for a completed payment, as the gateway would send it.
    pub fn sign(&self, gateway_order_id: &str, payment_id: &str) -> Result<String, PaymentError> {
        let mac = self.mac(gateway_order_id, payment_id)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Convert a major-unit amount to minor units (x100), rounding half away from zero.
///
/// `None` when the result does not fit in an `i64`.
#[must_use]
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

impl PaymentGateway for HmacPaymentGateway {
    fn order_request(
        &self,
        order: &OrderId,
        amount: Decimal,
    ) -> Result<GatewayOrderRequest, PaymentError> {
        if self.key_secret.is_empty() {
            return Err(PaymentError::NotConfigured);
        }
        let amount_minor =
            to_minor_units(amount).ok_or(PaymentError::AmountOutOfRange(amount))?;
        Ok(GatewayOrderRequest {
            key_id: self.key_id.clone(),
            amount_minor,
            currency: self.currency.to_uppercase(),
            receipt: order.to_string(),
        })
    }

    fn verify(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), PaymentError> {
        let expected = hex::decode(signature.trim()).map_err(|_| PaymentError::InvalidSignature)?;
        self.mac(gateway_order_id, payment_id)?
            .verify_slice(&expected)
            .map_err(|_| PaymentError::InvalidSignature)
    }
}
