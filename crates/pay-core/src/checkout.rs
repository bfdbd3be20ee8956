//! # Checkout Types
//!
//! Line items, checkout requests, and the sessions a provider returns for them.

use serde::{Deserialize, Serialize};

/// A line item referencing a price that already exists at the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Provider price identifier (e.g. `price_...`)
    pub price: String,

    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    pub fn new(price: impl Into<String>, quantity: u32) -> Self {
        Self {
            price: price.into(),
            quantity,
        }
    }
}

/// Checkout mode. The gateway only sells one-time payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    #[default]
    Payment,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
        }
    }
}

/// Everything a provider needs to open a hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Items being purchased
    pub line_items: Vec<LineItem>,

    /// Checkout mode
    #[serde(default)]
    pub mode: CheckoutMode,

    /// Accepted payment method types
    #[serde(default = "default_payment_method_types")]
    pub payment_method_types: Vec<String>,

    /// Where the provider sends the browser after payment
    pub success_url: String,

    /// Where the provider sends the browser if the customer backs out
    pub cancel_url: String,
}

fn default_payment_method_types() -> Vec<String> {
    vec!["card".to_string()]
}

impl CheckoutRequest {
    /// One-time card payment for the given items
    pub fn payment(
        line_items: Vec<LineItem>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            line_items,
            mode: CheckoutMode::Payment,
            payment_method_types: default_payment_method_types(),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Total number of units across all line items
    pub fn item_count(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}

/// A checkout session as returned by the provider.
///
/// Only `id` and `url` are interpreted; every other field is kept so the
/// full session object can be handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Opaque session identifier used to resume the flow client-side
    pub id: String,

    /// Hosted checkout page URL
    #[serde(default)]
    pub url: Option<String>,

    /// Remaining provider fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CheckoutSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_request_defaults() {
        let request = CheckoutRequest::payment(
            vec![LineItem::new("price_123", 2), LineItem::new("price_456", 1)],
            "http://localhost:3000/success",
            "http://localhost:3000/cancel",
        );

        assert_eq!(request.mode, CheckoutMode::Payment);
        assert_eq!(request.payment_method_types, vec!["card".to_string()]);
        assert_eq!(request.item_count(), 3);
        assert!(!request.is_empty());
    }

    #[test]
    fn test_line_item_quantity_defaults_to_one() {
        let item: LineItem = serde_json::from_value(json!({ "price": "price_123" })).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_session_keeps_unknown_fields() {
        let body = json!({
            "id": "cs_test_123",
            "object": "checkout.session",
            "url": "https://checkout.stripe.com/c/pay/cs_test_123",
            "mode": "payment",
            "amount_total": 2000
        });

        let session: CheckoutSession = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(session.id, "cs_test_123");
        assert_eq!(session.extra.get("amount_total"), Some(&json!(2000)));

        assert_eq!(serde_json::to_value(&session).unwrap(), body);
    }
}
