use crate::Signature;
use std::any::Any;
use thiserror::Error;

/// An argument pack didn't fit the bound method's parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("method takes {expected} but was invoked with {found}")]
pub struct Mismatch {
    pub expected: Signature,
    pub found: Signature,
}

/// Why a dispatch didn't reach, or didn't complete in, the receiver
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Mismatch(#[from] Mismatch),

    #[error("receiver method failed: {0:#}")]
    Failed(anyhow::Error),

    #[error("receiver method panicked: {0}")]
    Panicked(String),
}

impl DispatchError {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_owned(),
                None => String::from("<non-string panic payload>"),
            },
        };

        DispatchError::Panicked(message)
    }
}
