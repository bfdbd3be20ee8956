//! # Stripe Webhook Handling
//!
//! Typed views of verified webhook events and a small dispatch layer.

use pay_core::{PaymentError, PaymentResult, WebhookEvent, WebhookEventType};
use std::collections::HashMap;
use tracing::{debug, info};

/// Parsed checkout.session.completed event data
#[derive(Debug, Clone)]
pub struct CheckoutCompletedData {
    pub session_id: String,
    pub payment_intent_id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_email: Option<String>,
    pub amount_total: i64,
    pub currency: String,
    pub payment_status: String,
    pub metadata: HashMap<String, String>,
}

impl CheckoutCompletedData {
    /// Parse from a webhook event
    pub fn from_event(event: &WebhookEvent) -> PaymentResult<Self> {
        let obj = event.object();

        let str_field = |key: &str| obj.get(key).and_then(|v| v.as_str()).map(String::from);

        let session_id = str_field("id")
            .ok_or_else(|| PaymentError::WebhookParseError("Missing session id".to_string()))?;

        let customer_email = obj
            .get("customer_details")
            .and_then(|cd| cd.get("email"))
            .and_then(|v| v.as_str())
            .map(String::from);

        let amount_total = obj
            .get("amount_total")
            .and_then(|v| v.as_i64())
            .unwrap_or(0);

        let metadata = obj
            .get("metadata")
            .and_then(|m| m.as_object())
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            session_id,
            payment_intent_id: str_field("payment_intent"),
            customer_id: str_field("customer"),
            customer_email,
            amount_total,
            currency: str_field("currency").unwrap_or_else(|| "usd".to_string()),
            payment_status: str_field("payment_status").unwrap_or_else(|| "unknown".to_string()),
            metadata,
        })
    }

    /// Check if payment was successful
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// Webhook event handler trait
///
/// Implement this trait to act on verified events.
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    /// Called when a checkout session is completed
    fn on_checkout_completed(&self, data: CheckoutCompletedData) -> PaymentResult<()> {
        info!(
            session_id = %data.session_id,
            amount_total = data.amount_total,
            currency = %data.currency,
            payment_status = %data.payment_status,
            paid = data.is_paid(),
            customer_email = ?data.customer_email,
            "Checkout completed"
        );
        Ok(())
    }

    /// Called for events the gateway does not act on
    fn on_unknown_event(&self, event: &WebhookEvent) -> PaymentResult<()> {
        debug!("Unhandled webhook event: type={}, id={}", event.event_type, event.id);
        Ok(())
    }
}

/// Default webhook handler (just logs events)
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Dispatch a webhook event to the appropriate handler method
pub fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: &WebhookEvent,
) -> PaymentResult<()> {
    match &event.event_type {
        WebhookEventType::CheckoutSessionCompleted => {
            let data = CheckoutCompletedData::from_event(event)?;
            handler.on_checkout_completed(data)
        }
        WebhookEventType::Other(_) => handler.on_unknown_event(event),
    }
}

/// Events the webhook endpoint should be subscribed to in the Stripe Dashboard
pub const REQUIRED_WEBHOOK_EVENTS: &[&str] = &[pay_core::CHECKOUT_SESSION_COMPLETED];
