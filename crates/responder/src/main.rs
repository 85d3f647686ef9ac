//! `responder` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from `responder.toml` and the environment.
//! 2. Initialise structured logging (plus OTLP export when configured).
//! 3. Parse the RSA private key once and build [`AppState`].
//! 4. Build the Axum router and start serving.

use anyhow::{Context, Result};
use tracing::{info, warn};

use responder::config::Config;
use responder::server::{self, state::AppState};
use responder::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::load().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        encryption_enabled = cfg.response.enable,
        "sealed-response starting"
    );

    // -----------------------------------------------------------------------
    // 3. Application state
    // -----------------------------------------------------------------------
    let state = AppState::new(cfg.response.clone(), &cfg.key_header_name)?;
    if !state.engine.rsa_key_loaded() {
        warn!("no usable RSA private key; key exchange requests will be rejected");
    }

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(state);
    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router).await?;

    Ok(())
}
