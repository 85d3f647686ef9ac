//! Terminating delivery: hand a finished envelope to a transport and stop.
//!
//! [`Responder::halt`] returns `Result<Infallible, Terminate<_>>`, so a
//! handler written as `responder.halt(..)?;` never runs past that line. The
//! control transfer is an ordinary `Err`, not a panic.

use std::convert::Infallible;

use common::ResponseEnvelope;

use super::builder::Responder;
use super::draft::Draft;
use crate::policy::EncryptionContext;

/// Delivers a finished envelope to the client.
#[cfg_attr(test, mockall::automock(type Output = String;))]
pub trait Transport {
    /// What the surrounding framework needs to finish the request.
    type Output;

    fn deliver(&self, envelope: ResponseEnvelope) -> Self::Output;
}

/// A delivered response travelling up the call stack to the framework.
#[derive(Debug)]
pub struct Terminate<O>(pub O);

impl<O> Terminate<O> {
    pub fn into_inner(self) -> O {
        self.0
    }
}

impl Responder {
    /// Terminating mode: build `draft`, deliver it through `transport`, and
    /// signal that the current request flow is over.
    pub fn halt<T: Transport>(
        &self,
        transport: &T,
        draft: Draft,
        context: Option<&EncryptionContext>,
    ) -> Result<Infallible, Terminate<T::Output>> {
        let envelope = self.build(draft, context);
        Err(Terminate(transport.deliver(envelope)))
    }
}
