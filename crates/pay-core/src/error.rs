//! # Payment Error Types
//!
//! Typed error handling for the checkout gateway.
//! Provider operations return `Result<T, PaymentError>`; webhook verification
//! returns `Result<WebhookEvent, VerificationError>`.

use thiserror::Error;

/// Core error type for payment provider operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Verified webhook payload did not have the expected shape
    #[error("Webhook parse error: {0}")]
    WebhookParseError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns true if the failure originated outside this process
    pub fn is_provider_side(&self) -> bool {
        matches!(
            self,
            PaymentError::NetworkError(_) | PaymentError::ProviderError { .. }
        )
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Reason a webhook delivery was rejected.
///
/// Never sent back to the caller; only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("missing signature header")]
    MissingHeader,

    #[error("malformed signature header: {0}")]
    MalformedHeader(String),

    #[error("no v1 signature found in header")]
    NoSignatures,

    #[error("timestamp outside the tolerance zone")]
    TimestampOutsideTolerance,

    #[error("no signatures found matching the expected signature for payload")]
    SignatureMismatch,

    #[error("invalid event payload: {0}")]
    InvalidPayload(String),
}
