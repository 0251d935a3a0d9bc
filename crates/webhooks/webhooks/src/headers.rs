//! The three transport headers that accompany every Svix delivery.

use http::HeaderMap;

use crate::error::{WebhookError, WebhookResult};

/// Unique message identifier, stable across redeliveries.
pub const SVIX_ID: &str = "svix-id";
/// Unix timestamp (seconds) of the delivery attempt.
pub const SVIX_TIMESTAMP: &str = "svix-timestamp";
/// Space-separated list of versioned signatures.
pub const SVIX_SIGNATURE: &str = "svix-signature";

/// Signature headers extracted from an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvixHeaders {
    pub id: String,
    pub timestamp: String,
    pub signature: String,
}

impl SvixHeaders {
    /// Extracts the headers, treating absent, empty or non-ASCII values as missing.
    pub fn from_header_map(headers: &HeaderMap) -> WebhookResult<Self> {
        Ok(Self {
            id: required(headers, SVIX_ID)?,
            timestamp: required(headers, SVIX_TIMESTAMP)?,
            signature: required(headers, SVIX_SIGNATURE)?,
        })
    }
}

fn required(headers: &HeaderMap, name: &'static str) -> WebhookResult<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(WebhookError::MissingHeaders(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn full_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SVIX_ID, HeaderValue::from_static("msg_1"));
        headers.insert(SVIX_TIMESTAMP, HeaderValue::from_static("1700000000"));
        headers.insert(SVIX_SIGNATURE, HeaderValue::from_static("v1,abc"));
        headers
    }

    #[test]
    fn test_extracts_all_headers() {
        let parsed = SvixHeaders::from_header_map(&full_headers()).unwrap();
        assert_eq!(parsed.id, "msg_1");
        assert_eq!(parsed.timestamp, "1700000000");
        assert_eq!(parsed.signature, "v1,abc");
    }

    #[test]
    fn test_each_header_is_required() {
        for name in [SVIX_ID, SVIX_TIMESTAMP, SVIX_SIGNATURE] {
            let mut headers = full_headers();
            headers.remove(name);

            let err = SvixHeaders::from_header_map(&headers).unwrap_err();
            assert!(matches!(err, WebhookError::MissingHeaders(missing) if missing == name));
        }
    }

    #[test]
    fn test_empty_header_counts_as_missing() {
        let mut headers = full_headers();
        headers.insert(SVIX_ID, HeaderValue::from_static(""));

        assert!(SvixHeaders::from_header_map(&headers).is_err());
    }
}
