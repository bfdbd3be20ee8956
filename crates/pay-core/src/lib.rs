//! # pay-core
//!
//! Core types and traits for the hosted checkout gateway.
//!
//! This crate provides:
//! - `PaymentStrategy` trait for implementing payment providers
//! - `LineItem`, `CheckoutRequest`, and `CheckoutSession` for the checkout flow
//! - `WebhookEvent` for verified provider notifications
//! - `PaymentError` and `VerificationError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{CheckoutRequest, LineItem, PaymentStrategy};
//!
//! let request = CheckoutRequest::payment(
//!     vec![LineItem::new("price_123", 1)],
//!     "http://localhost:3000/success",
//!     "http://localhost:3000/cancel",
//! );
//!
//! let session = strategy.create_checkout(&request).await?;
//! println!("session id: {}", session.id);
//! ```

pub mod checkout;
pub mod error;
pub mod event;
pub mod strategy;

// Re-exports for convenience
pub use checkout::{CheckoutMode, CheckoutRequest, CheckoutSession, LineItem};
pub use error::{PaymentError, PaymentResult, VerificationError};
pub use event::{WebhookEvent, WebhookEventData, WebhookEventType, CHECKOUT_SESSION_COMPLETED};
pub use strategy::{BoxedPaymentStrategy, PaymentStrategy};
