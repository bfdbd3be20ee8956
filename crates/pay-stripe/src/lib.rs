//! # pay-stripe
//!
//! Stripe payment strategy for the hosted checkout gateway.
//!
//! - **StripeCheckoutStrategy** creates Checkout Sessions for existing prices
//!   and verifies webhook deliveries.
//! - **signature** implements Stripe's `Stripe-Signature` HMAC scheme.
//! - **webhook** turns verified events into typed callbacks.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::StripeCheckoutStrategy;
//! use pay_core::{CheckoutRequest, LineItem, PaymentStrategy};
//!
//! let strategy = StripeCheckoutStrategy::from_env()?;
//!
//! let session = strategy.create_checkout(&CheckoutRequest::payment(
//!     vec![LineItem::new("price_123", 1)],
//!     "https://example.com/success",
//!     "https://example.com/cancel",
//! )).await?;
//!
//! // Hand session.id to Stripe.js redirectToCheckout
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use pay_stripe::{dispatch_webhook_event, LoggingWebhookHandler};
//!
//! let event = strategy.verify_webhook(payload, Some(signature)).await?;
//! dispatch_webhook_event(&LoggingWebhookHandler, &event)?;
//! ```

pub mod checkout;
pub mod config;
pub mod signature;
pub mod webhook;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
pub use webhook::{
    dispatch_webhook_event, CheckoutCompletedData, LoggingWebhookHandler, WebhookHandler,
    REQUIRED_WEBHOOK_EVENTS,
};
