//! AES-256-CBC payload sealing and RSA key-exchange decryption.
//!
//! This module is free of HTTP and configuration dependencies: key material is
//! always passed in explicitly.
//!
//! # Error sanitisation
//!
//! Every public operation goes through [`sanitize::sanitize`], which logs the
//! detailed [`error::Fault`] and returns a fixed [`CryptoError`]. Callers can
//! not tell a bad key from bad ciphertext.

pub mod cipher;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod keyring;
pub mod sanitize;

pub use cipher::{IV_LEN, KEY_LEN};
pub use engine::CryptoEngine;
pub use error::CryptoError;
