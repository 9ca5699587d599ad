//! Numeric sanitization for split inputs.
//!
//! Everything the arithmetic sees passes through here first: non-finite
//! values become 0, fractions truncate toward zero, and magnitudes stay
//! within the safe-integer range.

use super::types::RawNumber;

/// Largest integer exactly representable as an IEEE-754 double.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Truncates a raw number to a safe integer. Non-finite input yields 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn to_safe_int(value: RawNumber) -> i64 {
    match value {
        RawNumber::Integer(int) => int.clamp(-MAX_SAFE_INTEGER, MAX_SAFE_INTEGER),
        RawNumber::Float(float) if !float.is_finite() => 0,
        RawNumber::Float(float) => {
            let bound = MAX_SAFE_INTEGER as f64;
            // Within +-2^53 the cast is exact after truncation.
            float.trunc().clamp(-bound, bound) as i64
        }
    }
}

/// Truncates to a safe integer and clamps negatives to zero.
#[must_use]
pub fn clamp_non_negative(value: RawNumber) -> i64 {
    to_safe_int(value).max(0)
}

/// Resolves a member value to a non-negative integer.
///
/// Absent values and `NaN` fall back to `default`; every other value,
/// including infinities, is sanitized with [`clamp_non_negative`].
#[must_use]
pub fn value_or(value: Option<RawNumber>, default: i64) -> i64 {
    match value {
        None => default,
        Some(RawNumber::Float(float)) if float.is_nan() => default,
        Some(raw) => clamp_non_negative(raw),
    }
}
