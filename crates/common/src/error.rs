//! Transport-level error type shared across crates.

use thiserror::Error;

/// Errors that abort a request outside the envelope flow.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::PayloadTooLarge`] → 413
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body did not have the expected shape.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The page carried more items than the service accepts.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::PayloadTooLarge(_) => 413,
        }
    }

    /// Short machine-readable code used in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::PayloadTooLarge(_) => "payload_too_large",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::PayloadTooLarge("x".into()).http_status(), 413);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("missing items".into());
        assert!(e.to_string().contains("missing items"));
        assert_eq!(e.code(), "bad_request");
    }
}
