//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use axum::http::HeaderName;

use crate::config::CryptoSettings;
use crate::crypto::CryptoEngine;
use crate::envelope::Responder;

/// Application state shared across all request handlers.
///
/// All fields are `Arc`-backed so Axum can clone the state per request.
#[derive(Clone)]
pub struct AppState {
    /// Envelope pipeline bound to the process-wide settings.
    pub responder: Responder,
    /// RSA key holder for the key exchange header.
    pub engine: Arc<CryptoEngine>,
    /// Header carrying the RSA-wrapped AES key material.
    pub key_header: Arc<HeaderName>,
}

impl AppState {
    /// Create a new [`AppState`], parsing the RSA key once.
    ///
    /// # Errors
    ///
    /// Returns an error if `key_header_name` is not a valid HTTP header name.
    pub fn new(settings: CryptoSettings, key_header_name: &str) -> anyhow::Result<Self> {
        let key_header = HeaderName::try_from(key_header_name)
            .map_err(|e| anyhow::anyhow!("invalid key header name {key_header_name:?}: {e}"))?;
        let engine = CryptoEngine::new(settings.rsa_private_key.as_deref());
        Ok(Self {
            responder: Responder::new(Arc::new(settings)),
            engine: Arc::new(engine),
            key_header: Arc::new(key_header),
        })
    }
}

impl Default for AppState {
    /// Encryption off, no RSA key, default header; suitable for tests.
    fn default() -> Self {
        Self {
            responder: Responder::new(Arc::new(CryptoSettings::default())),
            engine: Arc::new(CryptoEngine::new(None)),
            key_header: Arc::new(HeaderName::from_static("x-encrypted-key")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_header_name() {
        assert!(AppState::new(CryptoSettings::default(), "bad header\n").is_err());
    }

    #[test]
    fn header_name_is_normalised() {
        let state = AppState::new(CryptoSettings::default(), "X-Encrypted-Key").unwrap();
        assert_eq!(state.key_header.as_str(), "x-encrypted-key");
        assert!(!state.engine.rsa_key_loaded());
    }
}
