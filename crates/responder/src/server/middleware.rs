//! Axum middleware layers applied to the router.
//!
//! Includes the RSA key exchange and the per-request timeout.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use common::protocol::KeyExchange;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::state::AppState;
use super::transport::envelope_transport;
use crate::envelope::{Draft, Terminate};
use crate::policy::EncryptionContext;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Decrypt the key exchange header, if any, into an [`EncryptionContext`]
/// request extension.
///
/// A header that cannot be decrypted or parsed ends the request with an error
/// envelope. A missing header leaves the request without key material.
pub async fn key_exchange(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match exchange(&state, &req) {
        Ok(Some(ctx)) => {
            req.extensions_mut().insert(ctx);
        }
        Ok(None) => {}
        Err(halted) => return halted.into_response(),
    }
    next.run(req).await
}

fn exchange(state: &AppState, req: &Request) -> Result<Option<EncryptionContext>, Terminate<Response>> {
    let Some(header) = req.headers().get(&*state.key_header) else {
        return Ok(None);
    };

    // Non-ASCII header bytes fall through as empty input and fail like any bad credential.
    let encoded = header.to_str().unwrap_or_default();
    let plaintext = match state.engine.rsa_decrypt(encoded) {
        Ok(p) => Zeroizing::new(p),
        Err(e) => match state.responder.halt(&envelope_transport(), Draft::error(e.to_string()), None)? {},
    };

    match serde_json::from_str::<KeyExchange>(plaintext.as_str()) {
        Ok(kx) => {
            debug!("key exchange completed");
            Ok(Some(EncryptionContext::new(kx.aes_key.into_bytes(), kx.aes_iv.into_bytes())))
        }
        Err(e) => {
            // Only the category: serde messages can quote the offending value.
            warn!(category = ?e.classify(), column = e.column(), "key exchange plaintext is not a valid credential");
            let message = crate::crypto::CryptoError::RsaDecrypt.to_string();
            match state.responder.halt(&envelope_transport(), Draft::error(message), None)? {}
        }
    }
}
