//! Reference Axum service hosting the envelope layer.
//!
//! # Responsibilities
//! - Perform the RSA key exchange and attach key material to each request.
//! - Define the Axum router with all routes and shared middleware.
//! - Deliver envelopes as JSON through [`transport::JsonTransport`].

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod transport;
