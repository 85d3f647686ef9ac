//! The single boundary where a detailed [`Fault`] becomes a generic [`CryptoError`].

use tracing::error;

use super::error::{CryptoError, Fault, Operation};

/// Log `fault` with full detail and return the fixed error for `op`.
pub fn sanitize<T>(op: Operation, outcome: Result<T, Fault>) -> Result<T, CryptoError> {
    sanitize_with(op, outcome, |op, fault| {
        error!(
            operation = op.as_str(),
            kind = fault.kind().as_str(),
            error = %fault,
            detail = ?fault,
            "crypto operation failed"
        );
    })
}

/// Like [`sanitize`], but reports the fault to `sink` instead of the log.
pub fn sanitize_with<T, F>(op: Operation, outcome: Result<T, Fault>, sink: F) -> Result<T, CryptoError>
where
    F: FnOnce(Operation, &Fault),
{
    outcome.map_err(|fault| {
        sink(op, &fault);
        CryptoError::from(op)
    })
}
