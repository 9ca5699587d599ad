//! Charge data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use subpool_shared::types::{ChargeId, Currency, Money, SubscriptionId};

use crate::pool::{Pool, PoolMember, PoolPeriod};

/// The slice of a subscription record needed to bill it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Subscription name.
    pub name: String,
    /// Amount per billing cycle, in minor units.
    pub amount: i64,
    /// Billing currency.
    pub currency: Currency,
    /// Archived subscriptions are not charged.
    #[serde(default)]
    pub archived: bool,
}

/// Charge status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeStatus {
    /// Not yet paid to the provider.
    #[default]
    Pending,
    /// Paid to the provider.
    Paid,
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

/// One billing-cycle occurrence of a subscription's cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    /// Charge ID.
    pub id: ChargeId,
    /// Subscription charged.
    pub subscription_id: SubscriptionId,
    /// Billing date.
    pub charge_date: NaiveDate,
    /// Amount in minor units.
    pub amount: i64,
    /// Currency.
    pub currency: Currency,
    /// Payment status.
    pub status: ChargeStatus,
    /// When the charge was paid.
    pub paid_at: Option<DateTime<Utc>>,
}

impl Charge {
    /// The charge amount as money.
    #[must_use]
    pub const fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }
}

/// A pool together with its members, as loaded for charge generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolWithMembers {
    /// The pool.
    pub pool: Pool,
    /// All members, active or not.
    pub members: Vec<PoolMember>,
}

/// A new charge and the pool periods generated for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeBatch {
    /// The charge.
    pub charge: Charge,
    /// One period per active pool.
    pub periods: Vec<PoolPeriod>,
}
