//! Internal fault taxonomy and the caller-visible crypto error.

use thiserror::Error;

/// Which half of the symmetric key material was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPart {
    Key,
    Iv,
}

impl std::fmt::Display for KeyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyPart::Key => f.write_str("AES key"),
            KeyPart::Iv => f.write_str("AES IV"),
        }
    }
}

/// Coarse classification of a [`Fault`], recorded in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Input,
    Key,
    Format,
    MalformedPayload,
    Crypto,
    Serialization,
}

impl FaultKind {
    /// Stable label used as a log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Input => "input_error",
            FaultKind::Key => "key_error",
            FaultKind::Format => "format_error",
            FaultKind::MalformedPayload => "malformed_payload",
            FaultKind::Crypto => "crypto_failure",
            FaultKind::Serialization => "serialization_error",
        }
    }
}

/// Detailed failure inside a crypto operation.
///
/// Never leaves the `crypto` module: [`super::sanitize`] logs it and hands the
/// caller a [`CryptoError`] instead.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("input is empty")]
    EmptyInput,

    #[error("no RSA private key configured")]
    KeyMissing,

    #[error("RSA private key could not be parsed: {0}")]
    KeyInvalid(String),

    #[error("{part} must be {expected} bytes, got {actual}")]
    KeyLength {
        part: KeyPart,
        expected: usize,
        actual: usize,
    },

    #[error("invalid base64: {0}")]
    Format(#[from] base64::DecodeError),

    #[error("decrypted payload is not a JSON object: {0}")]
    MalformedPayload(String),

    #[error("cipher operation failed: {0}")]
    Cipher(String),

    #[error("payload could not be serialised: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::EmptyInput => FaultKind::Input,
            Fault::KeyMissing | Fault::KeyInvalid(_) | Fault::KeyLength { .. } => FaultKind::Key,
            Fault::Format(_) => FaultKind::Format,
            Fault::MalformedPayload(_) => FaultKind::MalformedPayload,
            Fault::Cipher(_) => FaultKind::Crypto,
            Fault::Serialization(_) => FaultKind::Serialization,
        }
    }
}

/// The operation a crypto call belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RsaDecrypt,
    AesDecrypt,
    AesEncrypt,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RsaDecrypt => "rsa_decrypt",
            Operation::AesDecrypt => "aes_decrypt",
            Operation::AesEncrypt => "aes_encrypt",
        }
    }
}

/// Caller-visible crypto failure.
///
/// Carries only the operation: the display text is fixed per operation so
/// that distinct causes (bad key, bad ciphertext, malformed input) are
/// indistinguishable to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("RSA decryption failed")]
    RsaDecrypt,

    #[error("AES decryption failed")]
    AesDecrypt,

    #[error("AES encryption failed")]
    AesEncrypt,
}

impl From<Operation> for CryptoError {
    fn from(op: Operation) -> Self {
        match op {
            Operation::RsaDecrypt => CryptoError::RsaDecrypt,
            Operation::AesDecrypt => CryptoError::AesDecrypt,
            Operation::AesEncrypt => CryptoError::AesEncrypt,
        }
    }
}
