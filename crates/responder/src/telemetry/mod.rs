//! Tracing setup: structured JSON logs, optional OTLP span export.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext payloads or ciphertext** may appear in any
//!   span attribute or log field. Crypto faults are logged by kind and cause
//!   only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`) and can be
//!   overridden with `RUST_LOG`.

pub mod init;

pub use init::init_telemetry;
