//! JSON input documents accepted by the CLI.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use subpool_core::charge::{PoolWithMembers, Subscription};
use subpool_core::pool::{CreatePoolInput, CreatePoolMemberInput, PoolService};
use subpool_core::split::{RawNumber, RemainderTo, RoundingMode, SplitMember, SplitOptions, SplitPolicy};
use subpool_shared::AppError;
use subpool_shared::types::{Currency, Money};

use crate::error::map_pool_error;

/// Rounding defaults applied where a document leaves them out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitDefaults {
    pub rounding_mode: RoundingMode,
    pub remainder_to: RemainderTo,
}

impl SplitDefaults {
    pub fn options(self) -> SplitOptions {
        SplitOptions::default()
            .with_rounding_mode(self.rounding_mode)
            .with_remainder_to(self.remainder_to)
    }
}

/// `subpool preview` input.
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    pub members: Vec<SplitMember>,
    pub total: PreviewTotal,
    pub policy: SplitPolicy,
    #[serde(default)]
    pub options: Option<PreviewOptions>,
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// A total in minor units, or `{"major": "12.34"}` in major units.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum PreviewTotal {
    Minor(RawNumber),
    Major { major: Decimal },
}

impl PreviewTotal {
    /// The total in minor units of `currency`.
    pub fn minor_units(self, currency: Currency) -> Result<RawNumber, AppError> {
        match self {
            Self::Minor(total) => Ok(total),
            Self::Major { major } => Money::to_minor_units(major, currency)
                .map(RawNumber::Integer)
                .ok_or_else(|| {
                    AppError::Validation(format!("total {major} {currency} is out of range"))
                }),
        }
    }
}

/// Preview options: a bare seat total or a partial options object.
///
/// Anything left out falls back to the configured defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum PreviewOptions {
    SeatTotal(RawNumber),
    Fields {
        #[serde(default)]
        seat_total: Option<RawNumber>,
        #[serde(default)]
        rounding_mode: Option<RoundingMode>,
        #[serde(default)]
        remainder_to: Option<RemainderTo>,
    },
}

impl SplitRequest {
    /// Split options with the configured defaults filled in.
    pub fn options(&self, defaults: SplitDefaults) -> SplitOptions {
        let base = defaults.options();
        match self.options {
            None => base,
            Some(PreviewOptions::SeatTotal(seat_total)) => base.with_seat_total(seat_total),
            Some(PreviewOptions::Fields {
                seat_total,
                rounding_mode,
                remainder_to,
            }) => SplitOptions {
                seat_total,
                rounding_mode: rounding_mode.unwrap_or(defaults.rounding_mode),
                remainder_to: remainder_to.unwrap_or(defaults.remainder_to),
            },
        }
    }
}

/// `subpool charge` input.
#[derive(Debug, Deserialize)]
pub struct ChargeRequest {
    pub subscription: Subscription,
    pub charge_date: NaiveDate,
    #[serde(default)]
    pub pools: Vec<PoolRequest>,
}

#[derive(Debug, Deserialize)]
pub struct PoolRequest {
    pub title: String,
    pub split_policy: SplitPolicy,
    #[serde(default)]
    pub seat_total: Option<i64>,
    #[serde(default)]
    pub rounding_mode: Option<RoundingMode>,
    #[serde(default)]
    pub remainder_to: Option<RemainderTo>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub members: Vec<CreatePoolMemberInput>,
}

fn default_active() -> bool {
    true
}

impl ChargeRequest {
    /// Validates every pool and member and builds them for `self.subscription`.
    pub fn pools(&self, defaults: SplitDefaults) -> Result<Vec<PoolWithMembers>, AppError> {
        self.pools
            .iter()
            .map(|req| {
                let mut pool = PoolService::create_pool(CreatePoolInput {
                    subscription_id: self.subscription.id,
                    title: req.title.clone(),
                    split_policy: req.split_policy,
                    seat_total: req.seat_total,
                    rounding_mode: req.rounding_mode.unwrap_or(defaults.rounding_mode),
                    remainder_to: req.remainder_to.unwrap_or(defaults.remainder_to),
                })
                .map_err(|e| map_pool_error(&e))?;
                pool.active = req.active;

                let members = req
                    .members
                    .iter()
                    .map(|m| PoolService::add_member(&pool, m.clone()).map_err(|e| map_pool_error(&e)))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(PoolWithMembers { pool, members })
            })
            .collect()
    }
}
