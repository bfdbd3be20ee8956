//! # Payment Strategy Trait
//!
//! Seam between the HTTP gateway and the payment processor.
//!
//! The gateway only ever talks to a `PaymentStrategy`; the Stripe
//! implementation lives in `pay-stripe`, and tests plug in fakes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PaymentStrategy (trait)                  │
//! │  ├── create_checkout()                                      │
//! │  ├── verify_webhook()                                       │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!          ┌───────┴───────┐   ┌───────┴───────┐
//!          │StripeCheckout │   │  test fakes   │
//!          │   Strategy    │   │               │
//!          └───────────────┘   └───────────────┘
//! ```

use crate::checkout::{CheckoutRequest, CheckoutSession};
use crate::error::{PaymentResult, VerificationError};
use crate::event::WebhookEvent;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Create a hosted checkout session.
    ///
    /// # Arguments
    /// * `request` - Line items, mode, and redirect URLs for the session
    ///
    /// # Returns
    /// The provider's session object, including its identifier.
    async fn create_checkout(&self, request: &CheckoutRequest) -> PaymentResult<CheckoutSession>;

    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    /// * `payload` - Raw webhook body bytes
    /// * `signature` - Signature header from the request, if one was sent
    ///
    /// # Returns
    /// Either the verified event or the reason verification failed.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, VerificationError>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::LineItem;

    struct EchoStrategy;

    #[async_trait]
    impl PaymentStrategy for EchoStrategy {
        async fn create_checkout(
            &self,
            request: &CheckoutRequest,
        ) -> PaymentResult<CheckoutSession> {
            Ok(CheckoutSession::new(format!("cs_{}", request.line_items[0].price)))
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            signature: Option<&str>,
        ) -> Result<WebhookEvent, VerificationError> {
            match signature {
                None => Err(VerificationError::MissingHeader),
                Some(_) => Err(VerificationError::SignatureMismatch),
            }
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_strategy_behind_arc() {
        let strategy: BoxedPaymentStrategy = Arc::new(EchoStrategy);
        let request = CheckoutRequest::payment(
            vec![LineItem::new("price_1", 1)],
            "http://localhost/success",
            "http://localhost/cancel",
        );

        let session = strategy.create_checkout(&request).await.unwrap();
        assert_eq!(session.id, "cs_price_1");
        assert_eq!(strategy.provider_name(), "echo");
        assert_eq!(
            strategy.verify_webhook(b"{}", None).await,
            Err(VerificationError::MissingHeader)
        );
    }
}
