//! Charge error types.

use subpool_shared::types::{PoolId, SubscriptionId};
use thiserror::Error;

/// Charge-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChargeError {
    /// Archived subscriptions are no longer billed.
    #[error("Subscription is archived: {0}")]
    Archived(SubscriptionId),

    /// Subscription amount must be positive.
    #[error("Charge amount must be positive, got {0}")]
    InvalidAmount(i64),

    /// A pool passed in belongs to another subscription.
    #[error("Pool {pool_id} does not belong to subscription {subscription_id}")]
    PoolSubscriptionMismatch {
        /// The offending pool.
        pool_id: PoolId,
        /// The subscription being charged.
        subscription_id: SubscriptionId,
    },

    /// Charge has already been paid.
    #[error("Charge is already paid")]
    AlreadyPaid,
}
