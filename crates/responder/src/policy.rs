//! Encryption gating: when to seal a payload and with which key material.

use serde_json::Value;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::CryptoSettings;

/// Per-request symmetric key material, as supplied by the session layer.
///
/// Either half may be absent; [`resolve_key_material`] decides whether the
/// pair is usable. Zeroized on drop and never printed.
#[derive(Clone, Default)]
pub struct EncryptionContext {
    aes_key: Option<Zeroizing<Vec<u8>>>,
    aes_iv: Option<Zeroizing<Vec<u8>>>,
}

impl EncryptionContext {
    pub fn new(aes_key: impl Into<Vec<u8>>, aes_iv: impl Into<Vec<u8>>) -> Self {
        Self {
            aes_key: Some(Zeroizing::new(aes_key.into())),
            aes_iv: Some(Zeroizing::new(aes_iv.into())),
        }
    }

    pub fn with_key(mut self, aes_key: impl Into<Vec<u8>>) -> Self {
        self.aes_key = Some(Zeroizing::new(aes_key.into()));
        self
    }

    pub fn with_iv(mut self, aes_iv: impl Into<Vec<u8>>) -> Self {
        self.aes_iv = Some(Zeroizing::new(aes_iv.into()));
        self
    }
}

impl std::fmt::Debug for EncryptionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionContext")
            .field("aes_key", &self.aes_key.as_ref().map(|_| "[REDACTED]"))
            .field("aes_iv", &self.aes_iv.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A usable key/IV pair borrowed from an [`EncryptionContext`].
///
/// Lengths are not checked here; the cipher rejects wrong sizes.
#[derive(Clone, Copy)]
pub struct KeyMaterial<'a> {
    pub key: &'a [u8],
    pub iv: &'a [u8],
}

/// Encryption was required but the request carried no usable key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("aes_key or aes_iv is empty")]
pub struct MissingKeyMaterial;

/// Encrypt iff the master switch is on and `value` carries a payload.
pub fn should_encrypt(settings: &CryptoSettings, value: Option<&Value>) -> bool {
    settings.enable && has_payload(value)
}

/// `false` for absent, `null`, `""`, `[]` and `{}`; `true` otherwise.
pub fn has_payload(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => true,
    }
}

/// Require both halves of the key material to be present and non-empty.
pub fn resolve_key_material(
    context: Option<&EncryptionContext>,
) -> Result<KeyMaterial<'_>, MissingKeyMaterial> {
    let ctx = context.ok_or(MissingKeyMaterial)?;
    match (ctx.aes_key.as_deref(), ctx.aes_iv.as_deref()) {
        (Some(key), Some(iv)) if !key.is_empty() && !iv.is_empty() => Ok(KeyMaterial { key, iv }),
        _ => Err(MissingKeyMaterial),
    }
}
