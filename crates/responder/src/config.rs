//! Configuration loading and validation.
//!
//! Values come from an optional TOML file (path in `RESPONDER_CONFIG`, default
//! `responder.toml`) overlaid by environment variables. Nested keys use `__`
//! as separator, e.g. `RESPONSE__CODE__SUCCESS=200`.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Request header carrying the RSA-wrapped AES key material.
    #[serde(default = "default_key_header")]
    pub key_header_name: String,

    /// Optional OTLP endpoint; spans are only exported when set.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Envelope and encryption settings.
    #[serde(default)]
    pub response: CryptoSettings,
}

/// Process-wide envelope settings, read-only after load.
#[derive(Clone, Default, Deserialize)]
pub struct CryptoSettings {
    /// Master switch for response encryption.
    #[serde(default)]
    pub enable: bool,

    /// Default envelope codes.
    #[serde(default)]
    pub code: ResponseCodes,

    /// PEM-encoded RSA private key for the inbound key exchange.
    #[serde(default, rename = "rsa_private")]
    pub rsa_private_key: Option<String>,
}

/// Default `code` values for success and error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResponseCodes {
    #[serde(default = "default_success_code")]
    pub success: i64,
    #[serde(default = "default_error_code")]
    pub error: i64,
}

impl Default for ResponseCodes {
    fn default() -> Self {
        Self {
            success: default_success_code(),
            error: default_error_code(),
        }
    }
}

impl CryptoSettings {
    pub fn success_code(&self) -> i64 {
        self.code.success
    }

    pub fn error_code(&self) -> i64 {
        self.code.error
    }
}

impl std::fmt::Debug for CryptoSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoSettings")
            .field("enable", &self.enable)
            .field("code", &self.code)
            .field(
                "rsa_private_key",
                &self.rsa_private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

fn default_listen_port() -> u16 {
    8080
}
fn default_key_header() -> String {
    "X-Encrypted-Key".into()
}
fn default_log_level() -> String {
    "info".into()
}
fn default_success_code() -> i64 {
    0
}
fn default_error_code() -> i64 {
    -1
}

/// File source (optional) overlaid by `env`, nested on `__`.
fn layered(
    path: &str,
    env: config::Environment,
) -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(env.separator("__"))
}

impl Config {
    /// Load and validate configuration from the optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a value cannot be parsed,
    /// or validation fails.
    pub fn load() -> Result<Self> {
        let path = std::env::var("RESPONDER_CONFIG").unwrap_or_else(|_| "responder.toml".into());
        Self::from_builder(layered(&path, config::Environment::default()))
    }

    /// Build, deserialise and validate from an arbitrary set of sources.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let cfg = builder
            .build()
            .context("failed to build configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.listen_port == 0 {
            anyhow::bail!("LISTEN_PORT must be > 0");
        }
        if self.key_header_name.trim().is_empty() {
            anyhow::bail!("KEY_HEADER_NAME is required and must not be empty");
        }
        if self.response.code.success == self.response.code.error {
            anyhow::bail!("response.code.success and response.code.error must differ");
        }
        Ok(())
    }
}
