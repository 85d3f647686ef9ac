//! [`Responder`]: assembles envelopes and seals their payloads.

use std::sync::Arc;

use common::ResponseEnvelope;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::draft::{Draft, DraftKind, Message, DEFAULT_ERROR_MESSAGE, DEFAULT_SUCCESS_MESSAGE};
use crate::config::CryptoSettings;
use crate::crypto::{CryptoEngine, CryptoError};
use crate::policy::{self, EncryptionContext, MissingKeyMaterial};

/// Why a payload could not be sealed. Both variants carry only safe text.
#[derive(Debug, Error)]
enum SealError {
    #[error(transparent)]
    MissingKeys(#[from] MissingKeyMaterial),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Stateless envelope pipeline: `draft → assemble → [seal] → envelope`.
#[derive(Debug, Clone)]
pub struct Responder {
    settings: Arc<CryptoSettings>,
}

impl Responder {
    pub fn new(settings: Arc<CryptoSettings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CryptoSettings {
        &self.settings
    }

    /// Return mode: build the final envelope for `draft`.
    ///
    /// When sealing is required but impossible (no key material, cipher
    /// failure) the result is an error envelope; never plaintext.
    pub fn build(&self, draft: Draft, context: Option<&EncryptionContext>) -> ResponseEnvelope {
        let seal = self.wants_seal(&draft);
        let envelope = self.assemble(draft);
        let seal = match seal {
            Some(requested) => requested && policy::has_payload(envelope.data.as_ref()),
            None => policy::should_encrypt(&self.settings, envelope.data.as_ref()),
        };
        if !seal {
            return envelope;
        }
        match self.seal(envelope, context) {
            Ok(sealed) => sealed,
            Err(e) => {
                warn!(error = %e, "payload could not be sealed; replying with error envelope");
                self.failure(e.to_string())
            }
        }
    }

    /// `Some(flag)` for an explicit or error-kind decision, `None` to defer to settings.
    fn wants_seal(&self, draft: &Draft) -> Option<bool> {
        match draft.encrypt {
            Some(flag) => Some(flag),
            None if draft.kind.encrypts_by_default() => None,
            None => Some(false),
        }
    }

    fn assemble(&self, draft: Draft) -> ResponseEnvelope {
        let now = chrono::Utc::now().timestamp();
        let (default_code, default_message) = match draft.kind {
            DraftKind::Error => (self.settings.error_code(), DEFAULT_ERROR_MESSAGE),
            DraftKind::Success | DraftKind::Page { .. } => {
                (self.settings.success_code(), DEFAULT_SUCCESS_MESSAGE)
            }
        };
        let code = draft.code.unwrap_or(default_code);

        let mut envelope = match draft.message {
            Message::Payload(payload) => {
                let mut env = ResponseEnvelope::new(code, now, default_message);
                env.data = Some(payload);
                env
            }
            Message::Text(text) => {
                let mut env = ResponseEnvelope::new(code, now, text);
                env.data = draft.data.filter(|d| !d.is_null());
                env
            }
        };

        if let DraftKind::Page { count } = draft.kind {
            envelope.data.get_or_insert(Value::Array(Vec::new()));
            envelope.count = Some(count);
        }
        envelope
    }

    fn seal(
        &self,
        mut envelope: ResponseEnvelope,
        context: Option<&EncryptionContext>,
    ) -> Result<ResponseEnvelope, SealError> {
        let keys = policy::resolve_key_material(context)?;
        let data = envelope.data.take().unwrap_or(Value::Null);
        let sealed = CryptoEngine::aes_encrypt(&data, keys.key, keys.iv)?;
        debug!(code = envelope.code, "payload sealed");
        envelope.encrypt_data = Some(sealed);
        Ok(envelope)
    }

    /// Error envelope used when sealing fails: no payload, never sealed.
    fn failure(&self, message: String) -> ResponseEnvelope {
        ResponseEnvelope::new(self.settings.error_code(), chrono::Utc::now().timestamp(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResponseCodes;
    use crate::crypto::{IV_LEN, KEY_LEN};
    use serde_json::json;

    const KEY: &[u8; KEY_LEN] = b"abcdefghijklmnopqrstuvwxyz012345";
    const IV: &[u8; IV_LEN] = b"0011223344556677";

    fn responder(enable: bool) -> Responder {
        Responder::new(Arc::new(CryptoSettings {
            enable,
            code: ResponseCodes {
                success: 200,
                error: 500,
            },
            rsa_private_key: None,
        }))
    }

    fn keys() -> EncryptionContext {
        EncryptionContext::new(KEY.to_vec(), IV.to_vec())
    }

    fn assert_exclusive(env: &ResponseEnvelope) {
        assert!(!(env.data.is_some() && env.encrypt_data.is_some()), "{env:?}");
    }

    #[test]
    fn success_text_only() {
        let before = chrono::Utc::now().timestamp();
        let env = responder(false).build(Draft::success("ok"), None);
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v.as_object().unwrap().len(), 3);
        assert_eq!(v["code"], 200);
        assert_eq!(v["message"], "ok");
        assert!(env.time >= before);
    }

    #[test]
    fn success_mapping_as_message() {
        let env = responder(false).build(Draft::success(json!({"a": 1})), None);
        assert_eq!(env.message, "operation succeeded");
        assert_eq!(env.data, Some(json!({"a": 1})));
        assert_eq!(env.code, 200);
    }

    #[test]
    fn payload_in_message_slot_wins_over_data() {
        let draft = Draft::success(json!([1, 2])).data(json!({"ignored": true}));
        let env = responder(false).build(draft, None);
        assert_eq!(env.data, Some(json!([1, 2])));
    }

    #[test]
    fn message_override_on_mapping_keeps_data() {
        let env = responder(false).build(Draft::success(json!({"a": 1})).message("hi"), None);
        assert_eq!(env.message, "hi");
        assert_eq!(env.data, Some(json!({"a": 1})));
        assert!(env.encrypt_data.is_none());
    }

    #[test]
    fn message_override_on_mapping_is_sealed() {
        let env = responder(true).build(Draft::success(json!({"a": 1})).message("hi"), Some(&keys()));
        assert_exclusive(&env);
        assert_eq!(env.message, "hi");
        assert_eq!(env.code, 200);
        let opened = CryptoEngine::aes_decrypt(env.encrypt_data.as_deref().unwrap(), KEY, IV).unwrap();
        assert_eq!(Value::Object(opened), json!({"a": 1}));
    }

    #[test]
    fn success_with_data_and_code() {
        let draft = Draft::success("done").data(json!({"id": 3})).code(201);
        let env = responder(false).build(draft, None);
        assert_eq!(env.code, 201);
        assert_eq!(env.message, "done");
        assert_eq!(env.data, Some(json!({"id": 3})));
    }

    #[test]
    fn null_data_is_omitted() {
        let env = responder(false).build(Draft::success("ok").data(Value::Null), None);
        assert!(env.data.is_none());
    }

    #[test]
    fn error_uses_error_code_and_skips_encryption() {
        let draft = Draft::error("bad").data(json!({"field": "name"}));
        let env = responder(true).build(draft, None);
        assert_eq!(env.code, 500);
        assert_eq!(env.message, "bad");
        assert_eq!(env.data, Some(json!({"field": "name"})));
        assert!(env.encrypt_data.is_none());
    }

    #[test]
    fn error_mapping_as_message() {
        let env = responder(false).build(Draft::error(json!({"e": 1})), None);
        assert_eq!(env.message, "operation failed");
        assert_eq!(env.code, 500);
    }

    #[test]
    fn error_can_opt_into_encryption() {
        let draft = Draft::error("bad").data(json!({"x": 1})).encrypt(true);
        let env = responder(false).build(draft, Some(&keys()));
        assert!(env.is_sealed());
        assert_exclusive(&env);
    }

    #[test]
    fn paginate_clamps_negative_total() {
        let env = responder(false).build(Draft::paginate(json!([1, 2]), -5i64), None);
        assert_eq!(env.count, Some(0));
        assert_eq!(env.message, "load complete");
        assert_eq!(env.code, 200);
        assert_eq!(env.data, Some(json!([1, 2])));
    }

    #[test]
    fn paginate_keeps_empty_data_unsealed() {
        let env = responder(true).build(Draft::paginate(json!([]), 0i64), None);
        assert_eq!(env.data, Some(json!([])));
        assert_eq!(env.count, Some(0));
        assert!(env.encrypt_data.is_none());
        assert!(env.time > 0);
    }

    #[test]
    fn paginate_seals_when_enabled() {
        let draft = Draft::paginate(json!([{"id": 1}]), 40i64).message("page 1");
        let env = responder(true).build(draft, Some(&keys()));
        assert_eq!(env.count, Some(40));
        assert_eq!(env.message, "page 1");
        assert!(env.data.is_none());
        let expected = CryptoEngine::aes_encrypt(&json!([{"id": 1}]), KEY, IV).unwrap();
        assert_eq!(env.encrypt_data, Some(expected));
    }

    #[test]
    fn enabled_seals_payload_and_decrypts_back() {
        let data = json!({"user": "alice", "roles": ["admin"]});
        let env = responder(true).build(Draft::success("ok").data(data.clone()), Some(&keys()));
        assert_exclusive(&env);
        assert!(env.data.is_none());
        let opened = CryptoEngine::aes_decrypt(env.encrypt_data.as_deref().unwrap(), KEY, IV).unwrap();
        assert_eq!(Value::Object(opened), data);
    }

    #[test]
    fn enabled_without_keys_becomes_error_envelope() {
        let env = responder(true).build(Draft::success("ok").data(json!({"secret": 1})), None);
        assert_eq!(env.code, 500);
        assert_eq!(env.message, "aes_key or aes_iv is empty");
        assert!(env.data.is_none());
        assert!(env.encrypt_data.is_none());
    }

    #[test]
    fn enabled_with_half_keys_becomes_error_envelope() {
        let ctx = EncryptionContext::default().with_key(KEY.to_vec());
        let env = responder(true).build(Draft::success(json!({"secret": 1})), Some(&ctx));
        assert_eq!(env.code, 500);
        assert!(env.data.is_none());
    }

    #[test]
    fn wrong_key_length_becomes_sanitized_error_envelope() {
        let ctx = EncryptionContext::new(b"short".to_vec(), IV.to_vec());
        let env = responder(true).build(Draft::success("ok").data(json!({"a": 1})), Some(&ctx));
        assert_eq!(env.code, 500);
        assert_eq!(env.message, "AES encryption failed");
        assert!(env.data.is_none());
        assert!(env.encrypt_data.is_none());
    }

    #[test]
    fn enabled_with_empty_payload_is_not_sealed() {
        let env = responder(true).build(Draft::success("ok").data(json!({})), None);
        assert_eq!(env.code, 200);
        assert_eq!(env.data, Some(json!({})));
        assert!(env.encrypt_data.is_none());
    }

    #[test]
    fn explicit_opt_out_overrides_switch() {
        let draft = Draft::success("ok").data(json!({"a": 1})).encrypt(false);
        let env = responder(true).build(draft, None);
        assert_eq!(env.data, Some(json!({"a": 1})));
    }

    #[test]
    fn no_envelope_carries_both_fields() {
        let r = responder(true);
        let ctx = keys();
        let drafts = vec![
            Draft::success("a"),
            Draft::success(json!({"a": 1})),
            Draft::success("b").data(json!([1])),
            Draft::error("c").data(json!({"x": 1})),
            Draft::error("d").data(json!({"x": 1})).encrypt(true),
            Draft::paginate(json!([1]), 1i64),
            Draft::paginate(json!([]), -1i64),
        ];
        for draft in drafts {
            assert_exclusive(&r.build(draft.clone(), Some(&ctx)));
            assert_exclusive(&r.build(draft, None));
        }
    }
}
