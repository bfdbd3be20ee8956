//! # Webhook Signature Verification
//!
//! Stripe signs every webhook delivery with the endpoint's signing secret.
//! The `Stripe-Signature` header looks like:
//!
//! ```text
//! t=1717000000,v1=5257a869e7ecebeda32affa62cdca3fa51cad7e77a0e56ff536d0ce8e108d8bd,v0=...
//! ```
//!
//! The signed payload is `"{t}.{raw body}"`, authenticated with HMAC-SHA256.

use hmac::{Hmac, Mac};
use pay_core::{VerificationError, WebhookEvent};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Parsed `Stripe-Signature` header
#[derive(Debug, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<String>,
}

/// Split a `Stripe-Signature` header into its timestamp and `v1` signatures.
///
/// Unknown schemes (e.g. `v0`) are ignored.
pub fn parse_signature_header(header: &str) -> Result<SignatureHeader, VerificationError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                let parsed = value.parse().map_err(|_| {
                    VerificationError::MalformedHeader(format!("invalid timestamp {:?}", value))
                })?;
                timestamp = Some(parsed);
            }
            "v1" => signatures.push(value.to_string()),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or_else(|| {
        VerificationError::MalformedHeader("missing timestamp".to_string())
    })?;

    if signatures.is_empty() {
        return Err(VerificationError::NoSignatures);
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

/// Hex-encoded HMAC-SHA256 of `"{timestamp}.{payload}"`
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Build a header value Stripe would send for `payload` at `timestamp`.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!("t={},v1={}", timestamp, compute_signature(secret, timestamp, payload))
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Check `header` against `payload` at time `now` (unix seconds).
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<(), VerificationError> {
    let header = parse_signature_header(header)?;

    let expected = compute_signature(secret, header.timestamp, payload);
    let matched = header
        .signatures
        .iter()
        .any(|sig| constant_time_compare(sig, &expected));

    if !matched {
        return Err(VerificationError::SignatureMismatch);
    }

    if tolerance_secs > 0 && now.abs_diff(header.timestamp) > tolerance_secs.unsigned_abs() {
        return Err(VerificationError::TimestampOutsideTolerance);
    }

    Ok(())
}

/// Verify a delivery and parse its body into a [`WebhookEvent`].
pub fn construct_event(
    payload: &[u8],
    header: Option<&str>,
    secret: &str,
    tolerance_secs: i64,
) -> Result<WebhookEvent, VerificationError> {
    let header = header.ok_or(VerificationError::MissingHeader)?;
    let now = chrono::Utc::now().timestamp();

    verify_signature(payload, header, secret, tolerance_secs, now)?;

    serde_json::from_slice(payload)
        .map_err(|e| VerificationError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::WebhookEventType;

    const SECRET: &str = "whsec_test_secret";
    const PAYLOAD: &[u8] =
        br#"{"id":"evt_1","type":"checkout.session.completed","created":1,"data":{"object":{"id":"cs_1"}}}"#;

    #[test]
    fn test_parse_signature_header() {
        let header = "t=1234567890,v1=abc123,v1=def456,v0=old";
        let parsed = parse_signature_header(header).unwrap();

        assert_eq!(parsed.timestamp, 1234567890);
        assert_eq!(parsed.signatures, vec!["abc123", "def456"]);
    }

    #[test]
    fn test_parse_header_errors() {
        assert!(matches!(
            parse_signature_header("v1=abc123"),
            Err(VerificationError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse_signature_header("t=soon,v1=abc123"),
            Err(VerificationError::MalformedHeader(_))
        ));
        assert_eq!(
            parse_signature_header("t=1234567890,v0=abc123"),
            Err(VerificationError::NoSignatures)
        );
    }

    #[test]
    fn test_signature_is_hex_sha256() {
        let sig = compute_signature(SECRET, 1234567890, b"{}");

        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }

    #[test]
    fn test_verify_valid_signature() {
        let header = sign_payload(SECRET, 1_700_000_000, PAYLOAD);
        assert_eq!(
            verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_100),
            Ok(())
        );
    }

    #[test]
    fn test_verify_accepts_any_matching_v1() {
        let good = compute_signature(SECRET, 1_700_000_000, PAYLOAD);
        let header = format!("t=1700000000,v1=deadbeef,v1={}", good);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_000).is_ok());
    }

    #[test]
    fn test_verify_wrong_secret() {
        let header = sign_payload("whsec_other", 1_700_000_000, PAYLOAD);
        assert_eq!(
            verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_000),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_tampered_payload() {
        let header = sign_payload(SECRET, 1_700_000_000, PAYLOAD);
        let tampered = br#"{"id":"evt_1","type":"checkout.session.completed","created":1,"data":{"object":{"id":"cs_2"}}}"#;
        assert_eq!(
            verify_signature(tampered, &header, SECRET, 300, 1_700_000_000),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_stale_timestamp() {
        let header = sign_payload(SECRET, 1_700_000_000, PAYLOAD);
        assert_eq!(
            verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_600),
            Err(VerificationError::TimestampOutsideTolerance)
        );
        // zero tolerance disables the age check
        assert!(verify_signature(PAYLOAD, &header, SECRET, 0, 1_700_000_600).is_ok());
    }

    #[test]
    fn test_verify_extreme_timestamp_is_out_of_tolerance() {
        for timestamp in [i64::MIN, i64::MAX] {
            let header = sign_payload(SECRET, timestamp, PAYLOAD);
            assert_eq!(
                verify_signature(PAYLOAD, &header, SECRET, 300, 1_700_000_000),
                Err(VerificationError::TimestampOutsideTolerance)
            );
        }
    }

    #[test]
    fn test_construct_event() {
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(SECRET, now, PAYLOAD);

        let event = construct_event(PAYLOAD, Some(header.as_str()), SECRET, 300).unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);
    }

    #[test]
    fn test_construct_event_missing_header() {
        assert_eq!(
            construct_event(PAYLOAD, None, SECRET, 300),
            Err(VerificationError::MissingHeader)
        );
    }

    #[test]
    fn test_construct_event_accepts_bare_event() {
        let payload = br#"{"type":"customer.created"}"#;
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(SECRET, now, payload);

        let event = construct_event(payload, Some(header.as_str()), SECRET, 300).unwrap();
        assert_eq!(
            event.event_type,
            WebhookEventType::Other("customer.created".to_string())
        );
        assert!(event.id.is_empty());
    }

    #[test]
    fn test_construct_event_rejects_non_event_body() {
        let payload = b"not json";
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(SECRET, now, payload);

        assert!(matches!(
            construct_event(payload, Some(header.as_str()), SECRET, 300),
            Err(VerificationError::InvalidPayload(_))
        ));
    }
}
