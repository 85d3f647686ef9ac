//! Wire types and errors shared across `sealed-response` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
pub use protocol::ResponseEnvelope;
