//! Base64 decoding modes.
//!
//! The RSA path decodes **strictly**: canonical, padded, standard alphabet.
//! The AES path decodes **leniently**: anything outside the standard alphabet
//! (whitespace, padding, stray symbols) is skipped before decoding. The
//! asymmetry is deliberate and covered by tests.

use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    DecodeError, Engine as _,
};

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Decode canonical standard base64, rejecting anything else.
pub fn decode_strict(input: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(input)
}

/// Decode base64, ignoring characters outside the standard alphabet.
///
/// A single symbol left over after the last full quantum is rejected rather
/// than silently dropped, so truncated ciphertext fails at decode time.
pub fn decode_lenient(input: &str) -> Result<Vec<u8>, DecodeError> {
    let filtered: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+' || *c == '/')
        .collect();
    LENIENT.decode(filtered)
}

/// Encode with the standard alphabet and padding.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
