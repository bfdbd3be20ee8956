//! # Routes
//!
//! Axum router configuration for the checkout gateway.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /          - Checkout page
/// - POST /checkout  - Create checkout session
/// - GET  /success   - Post-payment redirect target
/// - GET  /cancel    - Abandoned-payment redirect target
/// - POST /webhook   - Stripe webhook handler
/// - GET  /health    - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(handlers::checkout_page))
        .route("/checkout", post(handlers::create_checkout))
        .route("/success", get(handlers::checkout_success))
        .route("/cancel", get(handlers::checkout_cancel))
        .route("/webhook", post(handlers::stripe_webhook))
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
