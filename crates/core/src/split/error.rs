//! Split error types.
//!
//! The engine itself is total and never fails; these errors only come from
//! parsing policy tags at the edges.

use thiserror::Error;

/// Errors raised while reading split configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Split policy tag not recognised.
    #[error("Unknown split type: {0}")]
    UnknownPolicy(String),

    /// Rounding mode tag not recognised.
    #[error("Unknown rounding mode: {0}")]
    UnknownRoundingMode(String),

    /// Remainder target tag not recognised.
    #[error("Unknown remainder target: {0}")]
    UnknownRemainderTo(String),
}
