//! [`Draft`]: the caller's description of an envelope before assembly.

use serde_json::Value;

/// Message used when a success call passes its payload in the message slot.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "operation succeeded";
/// Message used when an error call passes its payload in the message slot.
pub const DEFAULT_ERROR_MESSAGE: &str = "operation failed";
/// Default message for paginated envelopes.
pub const DEFAULT_PAGE_MESSAGE: &str = "load complete";

/// The first argument of `success`/`error`.
///
/// A JSON object or array given as the message is treated as the payload and
/// the envelope gets the kind's default message instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Payload(Value),
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_owned())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<Value> for Message {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(_) | Value::Array(_) => Message::Payload(v),
            Value::String(s) => Message::Text(s),
            other => Message::Text(other.to_string()),
        }
    }
}

/// Total item count for a paginated envelope.
///
/// Negative or non-integer inputs clamp to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TotalCount(pub u64);

impl From<i64> for TotalCount {
    fn from(n: i64) -> Self {
        TotalCount(u64::try_from(n).unwrap_or(0))
    }
}

impl From<i32> for TotalCount {
    fn from(n: i32) -> Self {
        TotalCount::from(i64::from(n))
    }
}

impl From<u64> for TotalCount {
    fn from(n: u64) -> Self {
        TotalCount(n)
    }
}

impl From<usize> for TotalCount {
    fn from(n: usize) -> Self {
        TotalCount(n as u64)
    }
}

impl From<&Value> for TotalCount {
    fn from(v: &Value) -> Self {
        match v.as_u64() {
            Some(n) => TotalCount(n),
            None => TotalCount(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DraftKind {
    Success,
    Error,
    Page { count: u64 },
}

impl DraftKind {
    /// Errors are diagnostic and never sealed unless explicitly asked.
    pub(crate) fn encrypts_by_default(self) -> bool {
        !matches!(self, DraftKind::Error)
    }
}

/// An envelope request: kind, message, payload and overrides.
#[derive(Debug, Clone)]
pub struct Draft {
    pub(crate) kind: DraftKind,
    pub(crate) message: Message,
    pub(crate) data: Option<Value>,
    pub(crate) code: Option<i64>,
    pub(crate) encrypt: Option<bool>,
}

impl Draft {
    fn new(kind: DraftKind, message: Message) -> Self {
        Self {
            kind,
            message,
            data: None,
            code: None,
            encrypt: None,
        }
    }

    /// A success envelope; code defaults to `code.success`, sealing to `enable`.
    pub fn success(msg: impl Into<Message>) -> Self {
        Self::new(DraftKind::Success, msg.into())
    }

    /// An error envelope; code defaults to `code.error`, never sealed by default.
    pub fn error(msg: impl Into<Message>) -> Self {
        Self::new(DraftKind::Error, msg.into())
    }

    /// A paginated envelope. `data` is always emitted, together with `count`.
    pub fn paginate(data: Value, total: impl Into<TotalCount>) -> Self {
        let TotalCount(count) = total.into();
        let mut draft = Self::new(DraftKind::Page { count }, Message::Text(DEFAULT_PAGE_MESSAGE.into()));
        draft.data = Some(data);
        draft
    }

    /// Attach a payload. Ignored when the message slot already held one.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Replace the message text.
    ///
    /// A payload previously given in the message slot moves to `data`, still
    /// taking precedence over anything passed to [`Draft::data`].
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let previous = std::mem::replace(&mut self.message, Message::Text(msg.into()));
        if let Message::Payload(payload) = previous {
            self.data = Some(payload);
        }
        self
    }

    /// Override the default code.
    pub fn code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Override the default sealing decision.
    pub fn encrypt(mut self, encrypt: bool) -> Self {
        self.encrypt = Some(encrypt);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn containers_become_payload() {
        assert_eq!(Message::from(json!({"a": 1})), Message::Payload(json!({"a": 1})));
        assert_eq!(Message::from(json!([1])), Message::Payload(json!([1])));
    }

    #[test]
    fn scalars_become_text() {
        assert_eq!(Message::from(json!("hi")), Message::Text("hi".into()));
        assert_eq!(Message::from(json!(3)), Message::Text("3".into()));
        assert_eq!(Message::from("hi"), Message::Text("hi".into()));
    }

    #[test]
    fn total_count_clamps() {
        assert_eq!(TotalCount::from(-5i64), TotalCount(0));
        assert_eq!(TotalCount::from(-1i32), TotalCount(0));
        assert_eq!(TotalCount::from(12i64), TotalCount(12));
        assert_eq!(TotalCount::from(&json!(2.5)), TotalCount(0));
        assert_eq!(TotalCount::from(&json!("7")), TotalCount(0));
        assert_eq!(TotalCount::from(&json!(-3)), TotalCount(0));
        assert_eq!(TotalCount::from(&json!(9)), TotalCount(9));
    }

    #[test]
    fn message_override_keeps_slot_payload() {
        let draft = Draft::success(json!({"a": 1})).message("hi");
        assert_eq!(draft.message, Message::Text("hi".into()));
        assert_eq!(draft.data, Some(json!({"a": 1})));

        let draft = Draft::error(json!([1])).data(json!("later")).message("bad");
        assert_eq!(draft.data, Some(json!([1])));
    }

    #[test]
    fn error_kind_does_not_encrypt_by_default() {
        assert!(DraftKind::Success.encrypts_by_default());
        assert!(DraftKind::Page { count: 0 }.encrypts_by_default());
        assert!(!DraftKind::Error.encrypts_by_default());
    }
}
