//! # pay-api
//!
//! HTTP gateway for the hosted checkout flow.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout session creation backed by a `PaymentStrategy`
//! - Webhook verification for payment events
//! - The static checkout page
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Checkout page |
//! | POST | `/checkout` | Create checkout session |
//! | GET | `/success` | Success redirect target |
//! | GET | `/cancel` | Cancel redirect target |
//! | POST | `/webhook` | Stripe webhook |
//! | GET | `/health` | Health check |

pub mod error;
pub mod handlers;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::{AppConfig, AppState, CheckoutSettings};
