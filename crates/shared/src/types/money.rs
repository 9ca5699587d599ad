//! Money type stored in integer minor units with currency metadata.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are kept as `i64` minor units (e.g., cents); conversions to and
//! from major units go through `rust_decimal::Decimal`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in the smallest currency unit (e.g., cents).
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Chinese Yuan
    #[default]
    Cny,
    /// Japanese Yen
    Jpy,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Self; 4] = [Self::Cny, Self::Jpy, Self::Usd, Self::Eur];

    /// Number of decimal places in one major unit.
    #[must_use]
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Jpy => 0,
            Self::Cny | Self::Usd | Self::Eur => 2,
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Cny | Self::Jpy => "¥",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: 0,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Converts a major-unit decimal amount into minor units.
    ///
    /// Rounds to the currency precision using banker's rounding. Returns
    /// `None` if the result does not fit in an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use subpool_shared::types::{Currency, Money};
    ///
    /// assert_eq!(Money::to_minor_units(dec!(12.34), Currency::Usd), Some(1234));
    /// assert_eq!(Money::to_minor_units(dec!(500), Currency::Jpy), Some(500));
    /// ```
    #[must_use]
    pub fn to_minor_units(amount: Decimal, currency: Currency) -> Option<i64> {
        let scale = Decimal::from(10_i64.pow(currency.decimals()));
        amount
            .checked_mul(scale)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i64()
    }

    /// Converts minor units into a major-unit decimal amount.
    #[must_use]
    pub fn from_minor_units(amount: i64, currency: Currency) -> Decimal {
        Decimal::new(amount, currency.decimals())
    }

    /// Returns the amount in major units.
    #[must_use]
    pub fn major(&self) -> Decimal {
        Self::from_minor_units(self.amount, self.currency)
    }

    /// Formats the amount with the currency symbol, e.g. `$12.34` or `¥500`.
    #[must_use]
    pub fn format(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.major())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cny => write!(f, "CNY"),
            Self::Jpy => write!(f, "JPY"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CNY" => Ok(Self::Cny),
            "JPY" => Ok(Self::Jpy),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
