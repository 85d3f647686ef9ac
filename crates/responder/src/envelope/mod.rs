//! Response envelope assembly and delivery.
//!
//! A [`Draft`] describes the envelope; [`Responder::build`] assembles it,
//! seals the payload when policy requires and returns it (return mode).
//! [`Responder::halt`] does the same and hands the result to a [`Transport`]
//! (terminating mode). Both share one pipeline.

pub mod builder;
pub mod delivery;
pub mod draft;

pub use builder::Responder;
pub use delivery::{Terminate, Transport};
pub use draft::{Draft, Message, TotalCount};
