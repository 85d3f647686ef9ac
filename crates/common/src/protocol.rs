//! Request and response types exchanged with API clients.
//!
//! Every business response leaves the service as a [`ResponseEnvelope`]
//! serialised to JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Uniform result record wrapping code, message and payload.
///
/// `data` and `encrypt_data` are never both present: once a payload is
/// sealed the plaintext field is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Application-level result code (not the HTTP status).
    pub code: i64,
    /// Unix timestamp (seconds) taken when the envelope was assembled.
    pub time: i64,
    /// Human-readable message safe to expose to callers.
    pub message: String,
    /// Plaintext payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Base64 AES-256-CBC ciphertext of the JSON-serialised payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypt_data: Option<String>,
    /// Total number of items, present on paginated envelopes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl ResponseEnvelope {
    /// Construct a bare envelope with no payload.
    pub fn new(code: i64, time: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            time,
            message: message.into(),
            data: None,
            encrypt_data: None,
            count: None,
        }
    }

    /// Returns `true` if the payload has been replaced by ciphertext.
    pub fn is_sealed(&self) -> bool {
        self.encrypt_data.is_some()
    }
}

// ---------------------------------------------------------------------------
// Inbound bodies
// ---------------------------------------------------------------------------

/// Request body carrying an AES-encrypted JSON object.
///
/// Only a body whose sole key is `encrypt_data` matches; anything else is a
/// plain payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SealedBody {
    /// Base64 ciphertext produced with the request's key material.
    pub encrypt_data: String,
}

/// Request body for `POST /echo/page`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Items on the current page.
    pub items: Vec<Value>,
    /// Total item count; anything other than a non-negative integer counts as 0.
    #[serde(default)]
    pub total: Value,
    /// Optional message override.
    #[serde(default)]
    pub message: Option<String>,
}

/// Plaintext of the RSA-wrapped key exchange header.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyExchange {
    /// 32-byte AES key.
    pub aes_key: String,
    /// 16-byte AES IV.
    pub aes_iv: String,
}

impl std::fmt::Debug for KeyExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyExchange")
            .field("aes_key", &"[REDACTED]")
            .field("aes_iv", &"[REDACTED]")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Transport-level error response
// ---------------------------------------------------------------------------

/// Error body returned when a request is aborted outside the envelope flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether response encryption is switched on.
    pub encryption_enabled: bool,
    /// Whether the RSA private key parsed successfully at startup.
    pub rsa_key_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_envelope_omits_optional_fields() {
        let env = ResponseEnvelope::new(0, 1_700_000_000, "ok");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v, json!({"code": 0, "time": 1_700_000_000, "message": "ok"}));
    }

    #[test]
    fn paginated_envelope_keeps_empty_data() {
        let mut env = ResponseEnvelope::new(0, 1, "load complete");
        env.data = Some(json!([]));
        env.count = Some(0);
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["data"], json!([]));
        assert_eq!(v["count"], 0);
        assert!(v.get("encrypt_data").is_none());
    }

    #[test]
    fn sealed_body_requires_sole_key() {
        let sealed: SealedBody = serde_json::from_value(json!({"encrypt_data": "AAAA"})).unwrap();
        assert_eq!(sealed.encrypt_data, "AAAA");
        assert!(serde_json::from_value::<SealedBody>(json!({"encrypt_data": "AAAA", "id": 7})).is_err());
        assert!(serde_json::from_value::<SealedBody>(json!({"encrypt_data": 1})).is_err());
    }

    #[test]
    fn page_request_total_defaults_to_null() {
        let req: PageRequest = serde_json::from_value(json!({"items": [1, 2]})).unwrap();
        assert!(req.total.is_null());
        assert!(req.message.is_none());
    }

    #[test]
    fn key_exchange_debug_is_redacted() {
        let kx = KeyExchange {
            aes_key: "k".repeat(32),
            aes_iv: "i".repeat(16),
        };
        let dbg = format!("{kx:?}");
        assert!(dbg.contains("REDACTED"));
        assert!(!dbg.contains("kkkk"));
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("bad_request", "missing items");
        assert_eq!(e.code, "bad_request");
        assert!(e.message.contains("missing items"));
    }
}
