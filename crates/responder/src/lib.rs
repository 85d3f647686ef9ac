//! Encrypted response envelopes.
//!
//! - [`crypto`]: AES-256-CBC sealing and RSA key-exchange decryption with
//!   sanitized errors.
//! - [`policy`]: when a payload must be sealed and with which key material.
//! - [`envelope`]: success / error / paginated envelope assembly and delivery.
//! - [`server`]: an Axum host that wires the above to HTTP.

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod policy;
pub mod server;
pub mod telemetry;
