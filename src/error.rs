//! Error taxonomy for the sizing engine.
//!
//! Only two things can actually fail: an input outside its numeric domain,
//! or a lookup for a market/plan the registries don't know. Guardrail
//! breaches are deliberately *not* errors — they come back as warnings on
//! the result so the trader still sees the full calculation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A numeric input outside its required domain, or a stop-size
    /// composition that resolves to zero or negative ticks. Also raised at
    /// registry construction for a malformed scaling ladder.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown market symbol or account-plan id.
    #[error("unknown {kind} '{id}'")]
    NotFound { kind: &'static str, id: String },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
