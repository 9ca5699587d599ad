//! Pool error types.

use thiserror::Error;

use crate::pool::types::LineStatus;

/// Maximum pool title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum member display name length, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 50;
/// Maximum member contact length, in characters.
pub const MAX_CONTACT_LEN: usize = 100;

/// Pool-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Pool title is empty.
    #[error("Pool title cannot be empty")]
    EmptyTitle,

    /// Pool title is too long.
    #[error("Pool title exceeds {MAX_TITLE_LEN} characters")]
    TitleTooLong,

    /// Seat total is zero or negative.
    #[error("Seat total must be at least 1, got {0}")]
    InvalidSeatTotal(i64),

    /// Member display name is empty.
    #[error("Member name cannot be empty")]
    EmptyDisplayName,

    /// Member display name is too long.
    #[error("Member name exceeds {MAX_DISPLAY_NAME_LEN} characters")]
    DisplayNameTooLong,

    /// Member contact is too long.
    #[error("Member contact exceeds {MAX_CONTACT_LEN} characters")]
    ContactTooLong,

    /// Member weight or amount is negative.
    #[error("Member value cannot be negative, got {0}")]
    NegativeValue(i64),

    /// Attempted an invalid line status transition.
    #[error("Invalid line status transition from {from} to {to}")]
    InvalidLineTransition {
        /// The current status.
        from: LineStatus,
        /// The attempted target status.
        to: LineStatus,
    },
}
