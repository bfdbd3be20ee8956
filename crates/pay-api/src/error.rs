//! # API Errors
//!
//! Request-boundary errors and their HTTP representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pay_core::{PaymentError, VerificationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Session creation failed at the provider or before reaching it
    #[error(transparent)]
    Checkout(#[from] PaymentError),

    /// Webhook delivery failed verification
    #[error("Webhook rejected: {0}")]
    WebhookRejected(#[from] VerificationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Provider failures carry the provider's own message verbatim.
            ApiError::Checkout(PaymentError::ProviderError { message, .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::Checkout(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
            // The reason is logged by the handler; callers learn nothing.
            ApiError::WebhookRejected(_) => StatusCode::BAD_REQUEST.into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_checkout_error_is_500() {
        let response = ApiError::from(PaymentError::NetworkError("timeout".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Network error: timeout");
    }

    #[tokio::test]
    async fn test_provider_error_body_is_provider_message() {
        let response = ApiError::from(PaymentError::ProviderError {
            provider: "stripe".to_string(),
            message: "No such price: 'price_123'".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "No such price: 'price_123'");
    }

    #[test]
    fn test_webhook_rejection_is_400() {
        let response = ApiError::from(VerificationError::SignatureMismatch).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
