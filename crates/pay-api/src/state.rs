//! # Application State
//!
//! Configuration loaded once at startup and shared, read-only, with every
//! request through Axum's `State` extractor.

use crate::page;
use anyhow::{bail, Context};
use pay_core::{BoxedPaymentStrategy, CheckoutRequest, LineItem};
use pay_stripe::StripeCheckoutStrategy;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for redirects
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Optional TOML file describing the checkout
    pub checkout_config_path: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            base_url: lookup("BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            checkout_config_path: lookup("CHECKOUT_CONFIG")
                .unwrap_or_else(|| "config/checkout.toml".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// The fixed checkout every `POST /checkout` opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub line_items: Vec<LineItem>,
    pub payment_method_types: Vec<String>,
    pub success_url: String,
    pub cancel_url: String,
}

/// Overrides read from the checkout TOML file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CheckoutFile {
    #[serde(default)]
    line_items: Vec<LineItem>,
    payment_method_types: Option<Vec<String>>,
    success_url: Option<String>,
    cancel_url: Option<String>,
}

impl CheckoutSettings {
    /// Defaults from environment variables, overlaid with the checkout file if it exists.
    pub fn load(config: &AppConfig) -> anyhow::Result<Self> {
        let defaults = Self::from_lookup(&config.base_url, |key| std::env::var(key).ok())?;

        let path = Path::new(&config.checkout_config_path);
        let settings = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let settings = defaults
                .overlay_toml(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            tracing::info!("Loaded checkout settings from {}", path.display());
            settings
        } else {
            defaults
        };

        settings.validate()?;
        Ok(settings)
    }

    fn from_lookup(
        base_url: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let quantity = match lookup("STRIPE_PRICE_QUANTITY") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("STRIPE_PRICE_QUANTITY is not a number: {}", raw))?,
            None => 1,
        };

        let line_items = lookup("STRIPE_PRICE_ID")
            .map(|price| vec![LineItem::new(price, quantity)])
            .unwrap_or_default();

        Ok(Self {
            line_items,
            payment_method_types: vec!["card".to_string()],
            success_url: lookup("SUCCESS_URL").unwrap_or_else(|| format!("{}/success", base_url)),
            cancel_url: lookup("CANCEL_URL").unwrap_or_else(|| format!("{}/cancel", base_url)),
        })
    }

    fn overlay_toml(mut self, content: &str) -> anyhow::Result<Self> {
        let file: CheckoutFile = toml::from_str(content)?;

        if !file.line_items.is_empty() {
            self.line_items = file.line_items;
        }
        if let Some(types) = file.payment_method_types {
            self.payment_method_types = types;
        }
        if let Some(url) = file.success_url {
            self.success_url = url;
        }
        if let Some(url) = file.cancel_url {
            self.cancel_url = url;
        }
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.line_items.is_empty() {
            bail!("No line items configured: set STRIPE_PRICE_ID or add [[line_items]] to the checkout file");
        }
        if let Some(item) = self.line_items.iter().find(|item| item.quantity == 0) {
            bail!("Line item {} has quantity 0", item.price);
        }
        Ok(())
    }

    /// The provider request for one checkout attempt
    pub fn checkout_request(&self) -> CheckoutRequest {
        let mut request = CheckoutRequest::payment(
            self.line_items.clone(),
            self.success_url.clone(),
            self.cancel_url.clone(),
        );
        request.payment_method_types = self.payment_method_types.clone();
        request
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment processor
    pub strategy: BoxedPaymentStrategy,
    /// Checkout opened by `POST /checkout`
    pub checkout: Arc<CheckoutSettings>,
    /// Pre-rendered `GET /` document
    pub checkout_page: Arc<str>,
    /// Server config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState backed by Stripe, configured from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let checkout = CheckoutSettings::load(&config)?;

        let stripe = StripeCheckoutStrategy::from_env().context("Failed to initialize Stripe")?;
        let publishable_key = stripe.config().publishable_key.clone();

        if stripe.config().is_test_mode() {
            if config.is_production() {
                warn!("Running in production with Stripe test keys");
            } else {
                info!("Using Stripe test keys");
            }
        }

        Ok(Self::with_strategy(
            Arc::new(stripe),
            &publishable_key,
            checkout,
            config,
        ))
    }

    /// Assemble state around any payment strategy
    pub fn with_strategy(
        strategy: BoxedPaymentStrategy,
        publishable_key: &str,
        checkout: CheckoutSettings,
        config: AppConfig,
    ) -> Self {
        Self {
            strategy,
            checkout: Arc::new(checkout),
            checkout_page: page::render_checkout_page(publishable_key).into(),
            config: Arc::new(config),
        }
    }
}
