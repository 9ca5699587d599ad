//! Pool data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use subpool_shared::types::{
    ChargeId, Currency, PoolId, PoolLineId, PoolMemberId, PoolPeriodId, SubscriptionId,
};

use crate::split::{RemainderTo, RoundingMode, SplitPolicy};

/// A group of members sharing one subscription's cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    /// Pool ID.
    pub id: PoolId,
    /// Subscription whose charges this pool splits.
    pub subscription_id: SubscriptionId,
    /// Pool title.
    pub title: String,
    /// How charges are split.
    pub split_policy: SplitPolicy,
    /// Total seats for seat splits, including unoccupied ones.
    pub seat_total: Option<u32>,
    /// Rounding mode.
    pub rounding_mode: RoundingMode,
    /// Remainder target.
    pub remainder_to: RemainderTo,
    /// Inactive pools are skipped when charges are generated.
    pub active: bool,
}

/// A member of a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolMember {
    /// Member ID.
    pub id: PoolMemberId,
    /// Owning pool.
    pub pool_id: PoolId,
    /// Display name.
    pub display_name: String,
    /// Optional contact (email, handle, ...).
    pub contact: Option<String>,
    /// Weight, seat count, or fixed amount depending on the pool's policy.
    pub value: Option<i64>,
    /// Removed members stay on record but are no longer billed.
    pub active: bool,
}

/// Line status within a pool period.
///
/// Lines start as `Pending` and move once to either `Paid` or `Waived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    /// Awaiting payment.
    #[default]
    Pending,
    /// Paid by the member.
    Paid,
    /// Forgiven by the pool owner.
    Waived,
}

impl LineStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Waived => "waived",
        }
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One member's share of one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolLine {
    /// Line ID.
    pub id: PoolLineId,
    /// Parent period.
    pub pool_period_id: PoolPeriodId,
    /// Member who owes this line.
    pub pool_member_id: PoolMemberId,
    /// Member display name at generation time.
    pub display_name: String,
    /// Amount due in minor units.
    pub amount_due: i64,
    /// Payment status.
    pub status: LineStatus,
    /// Optional note, e.g. why the line was waived.
    pub note: Option<String>,
    /// When the line was paid.
    pub paid_at: Option<DateTime<Utc>>,
}

/// A pool's share of one subscription charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolPeriod {
    /// Period ID.
    pub id: PoolPeriodId,
    /// Pool ID.
    pub pool_id: PoolId,
    /// Charge this period was generated for.
    pub charge_id: ChargeId,
    /// `YYYY-MM` of the charge date.
    pub period_key: String,
    /// Total being split, in minor units.
    pub total_amount: i64,
    /// Currency of the charge.
    pub currency: Currency,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Per-member lines, in member order.
    pub lines: Vec<PoolLine>,
}

impl PoolPeriod {
    /// Sum of amounts still pending.
    #[must_use]
    pub fn outstanding(&self) -> i64 {
        self.sum_where(LineStatus::Pending)
    }

    /// Sum of amounts paid so far.
    #[must_use]
    pub fn collected(&self) -> i64 {
        self.sum_where(LineStatus::Paid)
    }

    /// Returns true once no line is pending.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.lines.iter().all(|l| l.status != LineStatus::Pending)
    }

    fn sum_where(&self, status: LineStatus) -> i64 {
        self.lines
            .iter()
            .filter(|l| l.status == status)
            .map(|l| l.amount_due)
            .sum()
    }
}

/// Input for creating a pool.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePoolInput {
    /// Subscription to split.
    pub subscription_id: SubscriptionId,
    /// Pool title.
    pub title: String,
    /// Split policy.
    pub split_policy: SplitPolicy,
    /// Seat total; must be at least 1 when present.
    #[serde(default)]
    pub seat_total: Option<i64>,
    /// Rounding mode.
    #[serde(default)]
    pub rounding_mode: RoundingMode,
    /// Remainder target.
    #[serde(default)]
    pub remainder_to: RemainderTo,
}

/// Input for adding a member to a pool.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePoolMemberInput {
    /// Display name.
    pub display_name: String,
    /// Optional contact.
    #[serde(default)]
    pub contact: Option<String>,
    /// Weight, seat count, or fixed amount; must be non-negative when present.
    #[serde(default)]
    pub value: Option<i64>,
    /// Whether the member is billed.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
