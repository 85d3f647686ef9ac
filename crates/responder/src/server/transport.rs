//! JSON delivery of envelopes over Axum, plus transport-level aborts.

use axum::{
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::{protocol::ErrorResponse, ResponseEnvelope, ServiceError};

use crate::envelope::{Terminate, Transport};

/// Delivers envelopes as `200 OK` JSON with optional extra headers.
#[derive(Debug, Clone, Default)]
pub struct JsonTransport {
    headers: HeaderMap,
}

impl JsonTransport {
    /// Add a header to every response this transport delivers.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Transport for every envelope the service emits. Envelopes carry user data,
/// sealed or not, so they are marked uncacheable.
pub fn envelope_transport() -> JsonTransport {
    JsonTransport::default().with_header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
}

impl Transport for JsonTransport {
    type Output = Response;

    fn deliver(&self, envelope: ResponseEnvelope) -> Response {
        (StatusCode::OK, self.headers.clone(), Json(envelope)).into_response()
    }
}

impl<O: IntoResponse> IntoResponse for Terminate<O> {
    fn into_response(self) -> Response {
        self.into_inner().into_response()
    }
}

/// Stop the request with a bare HTTP error, bypassing the envelope.
pub fn abort(err: ServiceError) -> Terminate<Response> {
    let status = StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::new(err.code(), err.to_string());
    Terminate((status, Json(body)).into_response())
}
