//! # Request Handlers
//!
//! Axum request handlers for the checkout gateway.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
    Json,
};
use pay_core::{CheckoutSession, VerificationError};
use pay_stripe::{dispatch_webhook_event, LoggingWebhookHandler};
use tracing::{error, info, instrument, warn};

/// Header Stripe signs webhook deliveries with
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a checkout session for the configured line items
#[instrument(skip(state))]
pub async fn create_checkout(State(state): State<AppState>) -> ApiResult<Json<CheckoutSession>> {
    let request = state.checkout.checkout_request();

    info!(
        "Creating {} checkout: {} items, success_url={}, cancel_url={}",
        state.strategy.provider_name(),
        request.item_count(),
        request.success_url,
        request.cancel_url
    );

    let session = state
        .strategy
        .create_checkout(&request)
        .await
        .map_err(|e| {
            if e.is_provider_side() {
                warn!("Checkout rejected by provider: {}", e);
            } else {
                error!("Failed to create checkout: {}", e);
            }
            ApiError::Checkout(e)
        })?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(session))
}

/// Redirect target after a completed payment
pub async fn checkout_success() -> &'static str {
    "Success!"
}

/// Redirect target after an abandoned payment
pub async fn checkout_cancel() -> &'static str {
    "Canceled!"
}

/// Handle a Stripe webhook delivery.
///
/// Any verified event is acknowledged with 200 so Stripe stops redelivering it.
#[instrument(skip(state, headers, body))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<&'static str> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .map(|value| {
            value.to_str().map_err(|_| {
                reject_webhook(VerificationError::MalformedHeader(
                    "signature header is not visible ASCII".to_string(),
                ))
            })
        })
        .transpose()?;

    let event = state
        .strategy
        .verify_webhook(&body, signature)
        .await
        .map_err(reject_webhook)?;

    info!("Received webhook: type={}, id={}", event.event_type, event.id);

    if let Err(e) = dispatch_webhook_event(&LoggingWebhookHandler, &event) {
        error!("Webhook handler error: type={}, id={}: {}", event.event_type, event.id, e);
    }

    Ok("success!")
}

fn reject_webhook(reason: VerificationError) -> ApiError {
    error!("Webhook verification failed: {}", reason);
    ApiError::WebhookRejected(reason)
}

/// Page that starts the checkout from the browser
pub async fn checkout_page(State(state): State<AppState>) -> Html<String> {
    Html(state.checkout_page.to_string())
}
