//! Svix HMAC signature generation and verification.
//!
//! The signed content is `{msg_id}.{timestamp}.{payload}`, keyed with the
//! base64-decoded endpoint secret and encoded as standard base64. The
//! signature header carries one or more space-separated `v1,<signature>`
//! entries so that secrets can be rotated without downtime.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{WebhookError, WebhookResult};

type HmacSha256 = Hmac<Sha256>;

/// Prefix the provider dashboard puts in front of endpoint secrets.
pub const SECRET_PREFIX: &str = "whsec_";

/// Signature version for webhook payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureVersion {
    /// Version 1: HMAC-SHA256
    #[default]
    V1,
}

impl SignatureVersion {
    /// Returns the tag used in signature header entries.
    pub fn tag(&self) -> &'static str {
        match self {
            SignatureVersion::V1 => "v1",
        }
    }
}

/// Webhook signer for generating and verifying signatures.
#[derive(Clone)]
pub struct WebhookSigner {
    key: Vec<u8>,
    version: SignatureVersion,
}

impl std::fmt::Debug for WebhookSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookSigner")
            .field("key", &"<redacted>")
            .field("version", &self.version)
            .finish()
    }
}

impl WebhookSigner {
    /// Creates a signer from an endpoint secret, with or without the
    /// `whsec_` prefix.
    pub fn new(secret: &str) -> WebhookResult<Self> {
        let encoded = secret.trim();
        let encoded = encoded.strip_prefix(SECRET_PREFIX).unwrap_or(encoded);

        let key = STANDARD
            .decode(encoded)
            .map_err(|e| WebhookError::InvalidSecret(format!("secret is not valid base64: {e}")))?;

        Self::from_key(key)
    }

    /// Creates a signer from raw key bytes.
    pub fn from_key(key: impl Into<Vec<u8>>) -> WebhookResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(WebhookError::InvalidSecret("secret is empty".to_string()));
        }

        Ok(Self {
            key,
            version: SignatureVersion::V1,
        })
    }

    /// Generates a signature for the given message.
    pub fn sign(&self, msg_id: &str, timestamp: i64, payload: &[u8]) -> String {
        match self.version {
            SignatureVersion::V1 => {
                let digest = self.mac(msg_id, timestamp, payload).finalize();
                STANDARD.encode(digest.into_bytes())
            }
        }
    }

    /// Generates a full signature header value.
    pub fn sign_header(&self, msg_id: &str, timestamp: i64, payload: &[u8]) -> String {
        format!("{},{}", self.version.tag(), self.sign(msg_id, timestamp, payload))
    }

    /// Verifies a single base64 signature against the message.
    pub fn verify(&self, signature: &str, msg_id: &str, timestamp: i64, payload: &[u8]) -> bool {
        let Ok(raw) = STANDARD.decode(signature) else {
            return false;
        };

        // verify_slice compares in constant time
        self.mac(msg_id, timestamp, payload).verify_slice(&raw).is_ok()
    }

    /// Parses and verifies a signature header against the current time.
    pub fn verify_header(
        &self,
        header: &str,
        msg_id: &str,
        timestamp: &str,
        payload: &[u8],
        tolerance_secs: i64,
    ) -> Result<(), SignatureError> {
        let now = chrono::Utc::now().timestamp();
        self.verify_header_at(header, msg_id, timestamp, payload, tolerance_secs, now)
    }

    /// Same as [`WebhookSigner::verify_header`] with an explicit clock.
    pub fn verify_header_at(
        &self,
        header: &str,
        msg_id: &str,
        timestamp: &str,
        payload: &[u8],
        tolerance_secs: i64,
        now: i64,
    ) -> Result<(), SignatureError> {
        let timestamp = timestamp
            .trim()
            .parse::<i64>()
            .map_err(|_| SignatureError::InvalidFormat)?;

        // Reject both stale and future-dated messages
        if now.abs_diff(timestamp) > tolerance_secs.unsigned_abs() {
            return Err(SignatureError::Expired);
        }

        let entries = parse_signature_header(header)?;
        let tag = self.version.tag();

        let matched = entries
            .iter()
            .filter(|(version, _)| *version == tag)
            .any(|(_, signature)| self.verify(signature, msg_id, timestamp, payload));

        if matched {
            Ok(())
        } else {
            Err(SignatureError::Invalid)
        }
    }

    fn mac(&self, msg_id: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");

        // Sign: msg_id.timestamp.payload
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac
    }
}

/// Signature verification errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Invalid signature or timestamp format.
    InvalidFormat,
    /// No signature entry matched.
    Invalid,
    /// Timestamp outside the tolerance window.
    Expired,
}

impl std::fmt::Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureError::InvalidFormat => write!(f, "Invalid signature format"),
            SignatureError::Invalid => write!(f, "Invalid signature"),
            SignatureError::Expired => write!(f, "Signature expired"),
        }
    }
}

impl std::error::Error for SignatureError {}

/// Splits a header such as `v1,abc= v1,def=` into `(version, signature)` pairs.
fn parse_signature_header(header: &str) -> Result<Vec<(&str, &str)>, SignatureError> {
    let entries: Vec<(&str, &str)> = header
        .split_whitespace()
        .filter_map(|entry| entry.split_once(','))
        .collect();

    if entries.is_empty() {
        return Err(SignatureError::InvalidFormat);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64("test-secret-key-material")
    const SECRET: &str = "whsec_dGVzdC1zZWNyZXQta2V5LW1hdGVyaWFs";

    fn signer() -> WebhookSigner {
        WebhookSigner::new(SECRET).unwrap()
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = signer();
        let payload = b"{\"type\":\"user.created\"}";
        let timestamp = 1234567890;

        let signature = signer.sign("msg_1", timestamp, payload);
        assert!(signer.verify(&signature, "msg_1", timestamp, payload));

        // Wrong payload should fail
        assert!(!signer.verify(&signature, "msg_1", timestamp, b"wrong payload"));

        // Wrong timestamp should fail
        assert!(!signer.verify(&signature, "msg_1", timestamp + 1, payload));

        // Wrong message id should fail
        assert!(!signer.verify(&signature, "msg_2", timestamp, payload));
    }

    #[test]
    fn test_prefix_is_optional() {
        let with_prefix = signer();
        let without_prefix = WebhookSigner::new(SECRET.trim_start_matches(SECRET_PREFIX)).unwrap();

        assert_eq!(
            with_prefix.sign("msg_1", 10, b"body"),
            without_prefix.sign("msg_1", 10, b"body")
        );
    }

    #[test]
    fn test_invalid_secrets() {
        assert!(matches!(
            WebhookSigner::new("whsec_not base64!"),
            Err(WebhookError::InvalidSecret(_))
        ));
        assert!(matches!(
            WebhookSigner::new("whsec_"),
            Err(WebhookError::InvalidSecret(_))
        ));
    }

    #[test]
    fn test_sign_header() {
        let header = signer().sign_header("msg_1", 1234567890, b"test payload");
        assert!(header.starts_with("v1,"));
    }

    #[test]
    fn test_verify_header() {
        let signer = signer();
        let payload = b"test payload";
        let now = 1_700_000_000;

        let header = signer.sign_header("msg_1", now, payload);
        let result =
            signer.verify_header_at(&header, "msg_1", &now.to_string(), payload, 300, now);
        assert!(result.is_ok());
    }

    #[test]
    fn test_verify_header_with_current_clock() {
        let signer = signer();
        let now = chrono::Utc::now().timestamp();

        let header = signer.sign_header("msg_1", now, b"payload");
        assert!(signer.verify_header(&header, "msg_1", &now.to_string(), b"payload", 300).is_ok());
    }

    #[test]
    fn test_any_matching_v1_entry_passes() {
        let signer = signer();
        let now = 1_700_000_000;
        let good = signer.sign("msg_1", now, b"payload");

        let header = format!("v2,ignored v1,AAAA v1,{good}");
        let ts = now.to_string();
        let result = signer.verify_header_at(&header, "msg_1", &ts, b"payload", 300, now);
        assert!(result.is_ok());
    }

    #[test]
    fn test_expired_and_future_timestamps() {
        let signer = signer();
        let now = 1_700_000_000;

        for timestamp in [now - 600, now + 600] {
            let header = signer.sign_header("msg_1", timestamp, b"payload");
            let ts = timestamp.to_string();
            let result = signer.verify_header_at(&header, "msg_1", &ts, b"payload", 300, now);
            assert_eq!(result, Err(SignatureError::Expired));
        }
    }

    #[test]
    fn test_extreme_timestamp_rejected() {
        let signer = signer();
        let now = 1_700_000_000;

        for ts in [i64::MIN, i64::MAX] {
            let result =
                signer.verify_header_at("v1,AAAA", "msg_1", &ts.to_string(), b"payload", 300, now);
            assert_eq!(result, Err(SignatureError::Expired));
        }

        // Clock and timestamp at opposite ends of the range
        let min = i64::MIN.to_string();
        let result = signer.verify_header_at("v1,AAAA", "msg_1", &min, b"", 300, i64::MAX);
        assert_eq!(result, Err(SignatureError::Expired));
    }

    #[test]
    fn test_malformed_headers() {
        let signer = signer();
        let now = 1_700_000_000;
        let header = signer.sign_header("msg_1", now, b"payload");

        let result = signer.verify_header_at(&header, "msg_1", "yesterday", b"payload", 300, now);
        assert_eq!(result, Err(SignatureError::InvalidFormat));

        let ts = now.to_string();
        let result = signer.verify_header_at("garbage", "msg_1", &ts, b"payload", 300, now);
        assert_eq!(result, Err(SignatureError::InvalidFormat));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let now = 1_700_000_000;
        let header = signer().sign_header("msg_1", now, b"payload");

        let other = WebhookSigner::from_key(b"another-key".to_vec()).unwrap();
        let ts = now.to_string();
        let result = other.verify_header_at(&header, "msg_1", &ts, b"payload", 300, now);
        assert_eq!(result, Err(SignatureError::Invalid));
    }
}
