//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;

/// Stripe API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// API version pinned for every request
pub const DEFAULT_API_VERSION: &str = "2024-04-10";

/// Maximum age of a webhook signature timestamp, in seconds
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Publishable key (pk_test_... or pk_live_...)
    pub publishable_key: String,

    /// Webhook signing secret (whsec_...)
    pub webhook_secret: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Accepted webhook timestamp skew
    pub webhook_tolerance_secs: i64,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    /// - `STRIPE_WEBHOOK_SECRET`
    ///
    /// Optional:
    /// - `STRIPE_API_BASE_URL`
    /// - `STRIPE_WEBHOOK_TOLERANCE_SECS` (0 disables the timestamp check)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PaymentError> {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| PaymentError::Configuration(format!("{} not set", key)))
        };

        let secret_key = require("STRIPE_SECRET_KEY")?;
        let publishable_key = require("STRIPE_PUBLISHABLE_KEY")?;
        let webhook_secret = require("STRIPE_WEBHOOK_SECRET")?;

        // Validate key formats
        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(PaymentError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !publishable_key.starts_with("pk_test_") && !publishable_key.starts_with("pk_live_") {
            return Err(PaymentError::Configuration(
                "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
            ));
        }

        if !webhook_secret.starts_with("whsec_") {
            return Err(PaymentError::Configuration(
                "STRIPE_WEBHOOK_SECRET must start with whsec_".to_string(),
            ));
        }

        let mut config = Self::new(secret_key, publishable_key, webhook_secret);
        if let Some(base_url) = lookup("STRIPE_API_BASE_URL") {
            config = config.with_api_base_url(base_url);
        }
        if let Some(tolerance) = lookup("STRIPE_WEBHOOK_TOLERANCE_SECS") {
            let secs = tolerance
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs >= 0)
                .ok_or_else(|| {
                    PaymentError::Configuration(format!(
                        "STRIPE_WEBHOOK_TOLERANCE_SECS must be whole seconds >= 0, got {:?}",
                        tolerance
                    ))
                })?;
            config = config.with_webhook_tolerance(secs);
        }
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        secret_key: impl Into<String>,
        publishable_key: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            publishable_key: publishable_key.into(),
            webhook_secret: webhook_secret.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            webhook_tolerance_secs: DEFAULT_WEBHOOK_TOLERANCE_SECS,
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set webhook timestamp tolerance
    pub fn with_webhook_tolerance(mut self, secs: i64) -> Self {
        self.webhook_tolerance_secs = secs;
        self
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[redacted]")
            .field("publishable_key", &self.publishable_key)
            .field("webhook_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("webhook_tolerance_secs", &self.webhook_tolerance_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_config_from_vars() {
        let config = StripeConfig::from_lookup(lookup_from(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz789"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_secret"),
        ]))
        .unwrap();

        assert!(config.is_test_mode());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_version, "2024-04-10");
        assert_eq!(config.webhook_tolerance_secs, 300);
    }

    #[test]
    fn test_config_base_url_override() {
        let config = StripeConfig::from_lookup(lookup_from(&[
            ("STRIPE_SECRET_KEY", "sk_live_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_live_xyz789"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_secret"),
            ("STRIPE_API_BASE_URL", "http://127.0.0.1:12111/"),
        ]))
        .unwrap();

        assert!(!config.is_test_mode());
        assert_eq!(config.api_base_url, "http://127.0.0.1:12111");
    }

    #[test]
    fn test_missing_key() {
        let result = StripeConfig::from_lookup(lookup_from(&[
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz789"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_secret"),
        ]));

        match result {
            Err(PaymentError::Configuration(msg)) => assert_eq!(msg, "STRIPE_SECRET_KEY not set"),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_webhook_secret() {
        let result = StripeConfig::from_lookup(lookup_from(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz789"),
            ("STRIPE_WEBHOOK_SECRET", "secret"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn test_webhook_tolerance_from_vars() {
        let keys = [
            ("STRIPE_SECRET_KEY", "sk_test_abc123"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_test_xyz789"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_secret"),
        ];

        let with = |value: &'static str| {
            let mut vars = keys.to_vec();
            vars.push(("STRIPE_WEBHOOK_TOLERANCE_SECS", value));
            StripeConfig::from_lookup(lookup_from(&vars))
        };

        assert_eq!(with("60").unwrap().webhook_tolerance_secs, 60);
        assert_eq!(with("0").unwrap().webhook_tolerance_secs, 0);
        assert!(matches!(with("-5"), Err(PaymentError::Configuration(_))));
        assert!(matches!(with("five"), Err(PaymentError::Configuration(_))));
    }

    #[test]
    fn test_auth_header() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789", "whsec_secret");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789", "whsec_secret");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("sk_test_abc123"));
        assert!(!rendered.contains("whsec_secret"));
        assert!(rendered.contains("pk_test_xyz789"));
    }
}
