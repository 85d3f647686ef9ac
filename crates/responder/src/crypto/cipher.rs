//! AES-256-CBC sealing of JSON payloads.
//!
//! **Format:** `base64(AES-256-CBC(PKCS#7(json)))` with the caller-supplied
//! key and IV. No version prefix, no MAC: the ciphertext is exactly what the
//! client library expects to feed into its own CBC decryptor.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use serde::Serialize;
use serde_json::{Map, Value};

use super::encoding;
use super::error::{Fault, KeyPart};

/// Byte length of an AES-256 key.
pub const KEY_LEN: usize = 32;

/// Byte length of a CBC initialisation vector.
pub const IV_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Serialise `value` to JSON and seal it, returning standard base64.
///
/// # Errors
///
/// [`Fault::KeyLength`] before any cipher work if `key`/`iv` are the wrong
/// size; [`Fault::Serialization`] if `value` is not representable as JSON.
pub fn seal<T: Serialize + ?Sized>(value: &T, key: &[u8], iv: &[u8]) -> Result<String, Fault> {
    check_lengths(key, iv)?;
    let plaintext = serde_json::to_vec(value).map_err(Fault::Serialization)?;
    let ciphertext = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| Fault::Cipher(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(&plaintext);
    Ok(encoding::encode(&ciphertext))
}

/// Decode (leniently), decrypt and parse a sealed payload.
///
/// # Errors
///
/// [`Fault::EmptyInput`], [`Fault::KeyLength`], [`Fault::Format`] for bad
/// base64, [`Fault::Cipher`] for a padding/key mismatch and
/// [`Fault::MalformedPayload`] when the plaintext is not a JSON object.
pub fn open(sealed: &str, key: &[u8], iv: &[u8]) -> Result<Map<String, Value>, Fault> {
    if sealed.is_empty() {
        return Err(Fault::EmptyInput);
    }
    check_lengths(key, iv)?;
    let ciphertext = encoding::decode_lenient(sealed)?;
    let plaintext = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| Fault::Cipher(e.to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|e| Fault::Cipher(e.to_string()))?;

    match serde_json::from_slice::<Value>(&plaintext) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Fault::MalformedPayload(format!("found {}", json_type(&other)))),
        Err(e) => Err(Fault::MalformedPayload(e.to_string())),
    }
}

fn check_lengths(key: &[u8], iv: &[u8]) -> Result<(), Fault> {
    if key.len() != KEY_LEN {
        return Err(Fault::KeyLength {
            part: KeyPart::Key,
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    if iv.len() != IV_LEN {
        return Err(Fault::KeyLength {
            part: KeyPart::Iv,
            expected: IV_LEN,
            actual: iv.len(),
        });
    }
    Ok(())
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
