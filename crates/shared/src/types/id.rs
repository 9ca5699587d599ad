//! Typed IDs for pools, members, periods and charges.
//!
//! Every record gets a UUIDv7, so IDs minted during one charge run sort in
//! creation order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mints a fresh time-ordered ID.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

typed_id!(
    /// A subscription being billed.
    SubscriptionId
);
typed_id!(
    /// One billing-cycle charge of a subscription.
    ChargeId
);
typed_id!(
    /// A cost-sharing pool.
    PoolId
);
typed_id!(
    /// A member of a pool.
    PoolMemberId
);
typed_id!(
    /// One billing period of a pool, tied to a charge.
    PoolPeriodId
);
typed_id!(
    /// A member's line within a pool period.
    PoolLineId
);
