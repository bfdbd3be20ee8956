//! # Webhook Events
//!
//! Provider-neutral shape of a verified webhook notification.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire name of the event sent when a hosted checkout finishes
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// Webhook event types the gateway distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    CheckoutSessionCompleted,
    Other(String),
}

impl WebhookEventType {
    pub fn as_str(&self) -> &str {
        match self {
            WebhookEventType::CheckoutSessionCompleted => CHECKOUT_SESSION_COMPLETED,
            WebhookEventType::Other(name) => name,
        }
    }
}

// A delivery without a `type` is treated as an unnamed event.
impl Default for WebhookEventType {
    fn default() -> Self {
        WebhookEventType::Other(String::new())
    }
}

impl From<&str> for WebhookEventType {
    fn from(name: &str) -> Self {
        match name {
            CHECKOUT_SESSION_COMPLETED => WebhookEventType::CheckoutSessionCompleted,
            other => WebhookEventType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WebhookEventType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WebhookEventType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(WebhookEventType::from(name.as_str()))
    }
}

/// A webhook event whose signature has already been verified.
///
/// Any JSON object parses; envelope fields the delivery omits are left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Provider event ID (`evt_...`)
    #[serde(default)]
    pub id: String,

    /// Declared event type
    #[serde(rename = "type", default)]
    pub event_type: WebhookEventType,

    /// Unix timestamp the provider created the event at
    #[serde(default)]
    pub created: i64,

    /// Event payload
    #[serde(default)]
    pub data: WebhookEventData,
}

/// The `data` envelope of a webhook event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookEventData {
    /// The object the event is about (e.g. a checkout session)
    #[serde(default)]
    pub object: serde_json::Map<String, serde_json::Value>,
}

impl WebhookEvent {
    pub fn is_checkout_completed(&self) -> bool {
        self.event_type == WebhookEventType::CheckoutSessionCompleted
    }

    /// The embedded object the event describes
    pub fn object(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.data.object
    }
}
