//! [`CryptoEngine`]: the sanitized public face of the crypto primitives.

use serde::Serialize;
use serde_json::{Map, Value};

use super::cipher;
use super::error::{CryptoError, Operation};
use super::keyring::RsaKeyring;
use super::sanitize::sanitize;

/// Encrypt/decrypt operations whose failures are logged in full and reported
/// to callers only as a fixed per-operation [`CryptoError`].
///
/// Holds the parsed RSA key; cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct CryptoEngine {
    keyring: RsaKeyring,
}

impl CryptoEngine {
    /// Build an engine, parsing `rsa_private_pem` once.
    pub fn new(rsa_private_pem: Option<&str>) -> Self {
        Self {
            keyring: RsaKeyring::from_pem(rsa_private_pem),
        }
    }

    /// Returns `true` if the configured RSA key parsed successfully.
    pub fn rsa_key_loaded(&self) -> bool {
        self.keyring.is_loaded()
    }

    /// Decrypt a strictly-base64 RSA PKCS#1 v1.5 ciphertext to text.
    pub fn rsa_decrypt(&self, encoded: &str) -> Result<String, CryptoError> {
        sanitize(Operation::RsaDecrypt, self.keyring.decrypt(encoded))
    }

    /// Decrypt a leniently-base64 AES-256-CBC payload to a JSON object.
    pub fn aes_decrypt(encoded: &str, key: &[u8], iv: &[u8]) -> Result<Map<String, Value>, CryptoError> {
        sanitize(Operation::AesDecrypt, cipher::open(encoded, key, iv))
    }

    /// Serialise `value` to JSON and AES-256-CBC encrypt it to standard base64.
    pub fn aes_encrypt<T: Serialize + ?Sized>(value: &T, key: &[u8], iv: &[u8]) -> Result<String, CryptoError> {
        sanitize(Operation::AesEncrypt, cipher::seal(value, key, iv))
    }
}
