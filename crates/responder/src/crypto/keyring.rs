//! RSA private key holder for the inbound key exchange (PKCS#1 v1.5).

use rsa::{pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey, Pkcs1v15Encrypt, RsaPrivateKey};

use super::encoding;
use super::error::Fault;

/// Outcome of parsing the configured PEM, held for the process lifetime.
enum KeyState {
    Missing,
    Invalid(String),
    Ready(RsaPrivateKey),
}

/// The configured RSA private key, parsed once.
pub struct RsaKeyring {
    state: KeyState,
}

impl RsaKeyring {
    /// Parse `pem` as PKCS#8 or PKCS#1. A blank or absent value is "missing".
    ///
    /// Parse errors are remembered rather than returned so that every
    /// decryption attempt fails the same way.
    pub fn from_pem(pem: Option<&str>) -> Self {
        let state = match pem.map(str::trim).filter(|p| !p.is_empty()) {
            None => KeyState::Missing,
            Some(pem) => match RsaPrivateKey::from_pkcs8_pem(pem) {
                Ok(key) => KeyState::Ready(key),
                Err(pkcs8_err) => match RsaPrivateKey::from_pkcs1_pem(pem) {
                    Ok(key) => KeyState::Ready(key),
                    Err(pkcs1_err) => KeyState::Invalid(format!("pkcs8: {pkcs8_err}; pkcs1: {pkcs1_err}")),
                },
            },
        };
        Self { state }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, KeyState::Ready(_))
    }

    /// Strictly decode `encoded`, then PKCS#1 v1.5 decrypt it to UTF-8 text.
    pub fn decrypt(&self, encoded: &str) -> Result<String, Fault> {
        if encoded.is_empty() {
            return Err(Fault::EmptyInput);
        }
        let key = match &self.state {
            KeyState::Missing => return Err(Fault::KeyMissing),
            KeyState::Invalid(detail) => return Err(Fault::KeyInvalid(detail.clone())),
            KeyState::Ready(key) => key,
        };
        let ciphertext = encoding::decode_strict(encoded)?;
        let plaintext = key
            .decrypt(Pkcs1v15Encrypt, &ciphertext)
            .map_err(|e| Fault::Cipher(e.to_string()))?;
        String::from_utf8(plaintext).map_err(|_| Fault::Cipher("plaintext is not valid UTF-8".into()))
    }
}

impl std::fmt::Debug for RsaKeyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            KeyState::Missing => "missing",
            KeyState::Invalid(_) => "invalid",
            KeyState::Ready(_) => "[REDACTED]",
        };
        f.debug_struct("RsaKeyring").field("state", &state).finish()
    }
}
