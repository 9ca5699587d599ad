//! Split engine data types.

use serde::{Deserialize, Serialize};

use super::error::SplitError;

/// A raw numeric input as received from callers, before sanitization.
///
/// The presentation layer may hand over floats (or even `NaN`/infinity from
/// a half-filled form), so both shapes are accepted and normalized later.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// Integral value.
    Integer(i64),
    /// Floating-point value; truncated toward zero during normalization.
    Float(f64),
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawNumber {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for RawNumber {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A participant in a split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitMember {
    /// Member identifier, unique within one call.
    pub id: String,
    /// Name shown next to the allocation.
    pub display_name: String,
    /// Ratio weight, seat count, or fixed minor-unit amount depending on the
    /// split policy. Absent means the policy default.
    #[serde(default)]
    pub value: Option<RawNumber>,
}

impl SplitMember {
    /// Creates a member without a weight or amount.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            value: None,
        }
    }

    /// Sets the member's weight, seat count, or fixed amount.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<RawNumber>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// How a total is divided among members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitPolicy {
    /// Every member carries the same weight.
    #[default]
    Equal,
    /// Every member pays its own fixed amount; the remainder slot absorbs the rest.
    Fixed,
    /// Members are weighted by their value.
    Ratio,
    /// Members are weighted by seat count; unoccupied seats go to the remainder slot.
    Seat,
}

/// How fractional minor units are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Hand out leftover units one at a time, largest remainder first.
    #[default]
    Minor,
    /// Give every leftover unit to the remainder slot.
    Floor,
    /// Round every share up, then take the overshoot back.
    Ceil,
}

/// Which member absorbs leftovers and unassigned seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderTo {
    /// The pool owner. Resolves to the first member until pools track an owner.
    #[default]
    Owner,
    /// The first member.
    First,
    /// The last member.
    Last,
}

impl RemainderTo {
    /// Index of the member holding the remainder slot among `count` members.
    #[must_use]
    pub const fn slot(self, count: usize) -> usize {
        match self {
            Self::Last if count > 0 => count - 1,
            Self::Owner | Self::First | Self::Last => 0,
        }
    }

    /// Whether equal-remainder ties resolve toward the higher index.
    #[must_use]
    pub const fn prefers_last(self) -> bool {
        matches!(self, Self::Last)
    }
}

/// Rounding and seat configuration for one split call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "OptionsRepr")]
pub struct SplitOptions {
    /// Total seat count of the pool, including unoccupied seats.
    pub seat_total: Option<RawNumber>,
    /// Rounding mode, `Minor` by default.
    pub rounding_mode: RoundingMode,
    /// Remainder target, `Owner` by default.
    pub remainder_to: RemainderTo,
}

impl SplitOptions {
    /// Sets the pool seat total.
    #[must_use]
    pub fn with_seat_total(mut self, seat_total: impl Into<RawNumber>) -> Self {
        self.seat_total = Some(seat_total.into());
        self
    }

    /// Sets the rounding mode.
    #[must_use]
    pub const fn with_rounding_mode(mut self, rounding_mode: RoundingMode) -> Self {
        self.rounding_mode = rounding_mode;
        self
    }

    /// Sets the remainder target.
    #[must_use]
    pub const fn with_remainder_to(mut self, remainder_to: RemainderTo) -> Self {
        self.remainder_to = remainder_to;
        self
    }
}

/// A bare number is shorthand for the seat total.
impl From<i64> for SplitOptions {
    fn from(seat_total: i64) -> Self {
        Self::default().with_seat_total(seat_total)
    }
}

impl From<u32> for SplitOptions {
    fn from(seat_total: u32) -> Self {
        Self::default().with_seat_total(seat_total)
    }
}

impl From<Option<SplitOptions>> for SplitOptions {
    fn from(options: Option<SplitOptions>) -> Self {
        options.unwrap_or_default()
    }
}

/// Wire shape of [`SplitOptions`]: either a full object or a bare seat total.
#[derive(Deserialize)]
#[serde(untagged)]
enum OptionsRepr {
    SeatTotal(RawNumber),
    Full(OptionsFields),
}

#[derive(Deserialize)]
#[serde(default)]
struct OptionsFields {
    seat_total: Option<RawNumber>,
    rounding_mode: RoundingMode,
    remainder_to: RemainderTo,
}

impl Default for OptionsFields {
    fn default() -> Self {
        let defaults = SplitOptions::default();
        Self {
            seat_total: defaults.seat_total,
            rounding_mode: defaults.rounding_mode,
            remainder_to: defaults.remainder_to,
        }
    }
}

impl From<OptionsRepr> for SplitOptions {
    fn from(repr: OptionsRepr) -> Self {
        match repr {
            OptionsRepr::SeatTotal(seat_total) => Self::default().with_seat_total(seat_total),
            OptionsRepr::Full(fields) => Self {
                seat_total: fields.seat_total,
                rounding_mode: fields.rounding_mode,
                remainder_to: fields.remainder_to,
            },
        }
    }
}

/// One member's allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    /// Member identifier, copied from the input.
    pub member_id: String,
    /// Display name, copied from the input.
    pub display_name: String,
    /// Allocated amount in minor units.
    pub amount: i64,
}

macro_rules! tag_enum {
    ($name:ident, $err:ident, { $($variant:ident => $tag:literal),+ $(,)? }) => {
        impl $name {
            /// Wire tag of this variant.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $tag,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = SplitError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($tag => Ok(Self::$variant),)+
                    _ => Err(SplitError::$err(s.to_string())),
                }
            }
        }
    };
}

tag_enum!(SplitPolicy, UnknownPolicy, {
    Equal => "equal",
    Fixed => "fixed",
    Ratio => "ratio",
    Seat => "seat",
});

tag_enum!(RoundingMode, UnknownRoundingMode, {
    Minor => "minor",
    Floor => "floor",
    Ceil => "ceil",
});

tag_enum!(RemainderTo, UnknownRemainderTo, {
    Owner => "owner",
    First => "first",
    Last => "last",
});
