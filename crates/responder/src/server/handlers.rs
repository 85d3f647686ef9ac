//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::{
    protocol::{ErrorResponse, HealthResponse, PageRequest, SealedBody},
    ServiceError,
};
use serde_json::Value;

use super::state::AppState;
use super::transport::{abort, envelope_transport};
use crate::crypto::CryptoEngine;
use crate::envelope::{Draft, Terminate, TotalCount, Transport};
use crate::policy::{self, EncryptionContext};

/// Largest page `POST /echo/page` accepts.
pub const MAX_PAGE_ITEMS: usize = 1000;

/// Either a delivered envelope (return mode) or an early, already-delivered response.
pub type EnvelopeResult = Result<Response, Terminate<Response>>;

/// `GET /health` — liveness plus encryption readiness.
///
/// Always `200 OK`; `status` is `"degraded"` when encryption is on but no RSA
/// key is available for the key exchange.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let encryption_enabled = state.responder.settings().enable;
    let rsa_key_loaded = state.engine.rsa_key_loaded();
    let status = if encryption_enabled && !rsa_key_loaded {
        "degraded"
    } else {
        "ok"
    };
    Json(HealthResponse {
        status: status.into(),
        encryption_enabled,
        rsa_key_loaded,
    })
}

/// `POST /echo` — reply with the request body as a success envelope.
///
/// A body of the form `{"encrypt_data": "..."}` is decrypted with the
/// request's key material first.
pub async fn echo(
    State(state): State<AppState>,
    ctx: Option<Extension<EncryptionContext>>,
    Json(body): Json<Value>,
) -> EnvelopeResult {
    let ctx = ctx.map(|Extension(c)| c);
    let payload = match serde_json::from_value::<SealedBody>(body.clone()) {
        Ok(sealed) => open_body(&state, &sealed.encrypt_data, ctx.as_ref())?,
        Err(_) => body,
    };
    let envelope = state.responder.build(Draft::success("ok").data(payload), ctx.as_ref());
    Ok(envelope_transport().deliver(envelope))
}

/// `POST /echo/page` — reply with a paginated envelope.
pub async fn echo_page(
    State(state): State<AppState>,
    ctx: Option<Extension<EncryptionContext>>,
    Json(body): Json<Value>,
) -> EnvelopeResult {
    let req: PageRequest = serde_json::from_value(body)
        .map_err(|e| abort(ServiceError::BadRequest(format!("invalid page body: {e}"))))?;
    if req.items.len() > MAX_PAGE_ITEMS {
        return Err(abort(ServiceError::PayloadTooLarge(format!(
            "{} items exceeds the limit of {MAX_PAGE_ITEMS}",
            req.items.len()
        ))));
    }
    let mut draft = Draft::paginate(Value::Array(req.items), TotalCount::from(&req.total));
    if let Some(message) = req.message {
        draft = draft.message(message);
    }
    let ctx = ctx.map(|Extension(c)| c);
    Ok(envelope_transport().deliver(state.responder.build(draft, ctx.as_ref())))
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Decrypt an inbound sealed body, ending the request with an error envelope
/// when the key material is missing or decryption fails.
fn open_body(
    state: &AppState,
    encoded: &str,
    ctx: Option<&EncryptionContext>,
) -> Result<Value, Terminate<Response>> {
    let transport = envelope_transport();
    let keys = match policy::resolve_key_material(ctx) {
        Ok(keys) => keys,
        Err(e) => match state.responder.halt(&transport, Draft::error(e.to_string()), None)? {},
    };
    match CryptoEngine::aes_decrypt(encoded, keys.key, keys.iv) {
        Ok(map) => Ok(Value::Object(map)),
        Err(e) => match state.responder.halt(&transport, Draft::error(e.to_string()), None)? {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CryptoSettings;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    fn test_router(state: AppState) -> Router {
        Router::new().route("/health", get(health)).with_state(state)
    }

    async fn health_body(state: AppState) -> HealthResponse {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = test_router(state).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_ok_when_encryption_off() {
        let body = health_body(AppState::default()).await;
        assert_eq!(body.status, "ok");
        assert!(!body.encryption_enabled);
        assert!(!body.rsa_key_loaded);
    }

    #[tokio::test]
    async fn health_degraded_without_rsa_key() {
        let settings = CryptoSettings {
            enable: true,
            ..Default::default()
        };
        let state = AppState::new(settings, "X-Encrypted-Key").unwrap();
        let body = health_body(state).await;
        assert_eq!(body.status, "degraded");
        assert!(body.encryption_enabled);
    }

    #[test]
    fn open_body_without_keys_halts() {
        let state = AppState::default();
        let halted = open_body(&state, "AAAA", None).unwrap_err().into_inner();
        assert_eq!(halted.status(), StatusCode::OK);
        assert_eq!(halted.headers()[axum::http::header::CACHE_CONTROL], "no-store");
    }
}
