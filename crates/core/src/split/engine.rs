//! Split policy dispatch.
//!
//! [`calculate_split`] is the single entry point. It sanitizes the total,
//! picks the policy handler, and maps amounts back onto the members in input
//! order. It is total: malformed numbers are coerced rather than rejected.

use super::apportion::{apportion_by_weights, narrow, reduce_to_total, wide_sum};
use super::normalize;
use super::types::{
    RawNumber, RemainderTo, RoundingMode, SplitMember, SplitOptions, SplitPolicy, SplitResult,
};

/// Divides `total` minor units among `members` under `policy`.
///
/// Guarantees, for every input:
/// - one result per member, in input order
/// - every amount is `>= 0`
/// - amounts sum to the sanitized total
///
/// The total is truncated to a safe integer and negative totals are treated
/// as zero.
///
/// # Example
///
/// ```
/// use subpool_core::split::{calculate_split, SplitMember, SplitOptions, SplitPolicy};
///
/// let members = vec![
///     SplitMember::new("a", "Ann"),
///     SplitMember::new("b", "Bo"),
///     SplitMember::new("c", "Cy"),
/// ];
/// let result = calculate_split(&members, 100, SplitPolicy::Equal, SplitOptions::default());
/// let amounts: Vec<i64> = result.iter().map(|r| r.amount).collect();
/// assert_eq!(amounts, vec![34, 33, 33]);
/// ```
#[must_use]
pub fn calculate_split(
    members: &[SplitMember],
    total: impl Into<RawNumber>,
    policy: SplitPolicy,
    options: impl Into<SplitOptions>,
) -> Vec<SplitResult> {
    if members.is_empty() {
        return Vec::new();
    }

    let options = options.into();
    let total = normalize::to_safe_int(total.into()).max(0);
    let SplitOptions {
        seat_total,
        rounding_mode,
        remainder_to,
    } = options;

    let amounts = match policy {
        SplitPolicy::Equal => split_equal(members.len(), total, rounding_mode, remainder_to),
        SplitPolicy::Fixed => split_fixed(members, total, remainder_to),
        SplitPolicy::Ratio => split_ratio(members, total, rounding_mode, remainder_to),
        SplitPolicy::Seat => {
            let seat_total = seat_total.map(normalize::clamp_non_negative);
            split_seat(members, total, seat_total, rounding_mode, remainder_to)
        }
    };

    members
        .iter()
        .zip(amounts)
        .map(|(member, amount)| SplitResult {
            member_id: member.id.clone(),
            display_name: member.display_name.clone(),
            amount,
        })
        .collect()
}

fn split_equal(
    count: usize,
    total: i64,
    rounding_mode: RoundingMode,
    remainder_to: RemainderTo,
) -> Vec<i64> {
    apportion_by_weights(total, &vec![1; count], rounding_mode, remainder_to)
}

fn split_fixed(members: &[SplitMember], total: i64, remainder_to: RemainderTo) -> Vec<i64> {
    let slot = remainder_to.slot(members.len());
    let mut amounts: Vec<i64> = members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            if i == slot {
                0
            } else {
                normalize::value_or(member.value, 0)
            }
        })
        .collect();

    let remainder = i128::from(total) - wide_sum(&amounts);
    if remainder >= 0 {
        amounts[slot] = narrow(remainder);
        return amounts;
    }

    // Requested fixed amounts exceed the total: claw back from the largest.
    reduce_to_total(&mut amounts, total, slot);
    let still_over = narrow(wide_sum(&amounts) - i128::from(total));
    if still_over > 0 {
        amounts[slot] = amounts[slot].saturating_sub(still_over).max(0);
    }
    amounts
}

fn split_ratio(
    members: &[SplitMember],
    total: i64,
    rounding_mode: RoundingMode,
    remainder_to: RemainderTo,
) -> Vec<i64> {
    let weights: Vec<i64> = members
        .iter()
        .map(|member| normalize::value_or(member.value, 1))
        .collect();
    apportion_by_weights(total, &weights, rounding_mode, remainder_to)
}

fn split_seat(
    members: &[SplitMember],
    total: i64,
    seat_total: Option<i64>,
    rounding_mode: RoundingMode,
    remainder_to: RemainderTo,
) -> Vec<i64> {
    let seats: Vec<i64> = members
        .iter()
        .map(|member| normalize::value_or(member.value, 1))
        .collect();

    let occupied = wide_sum(&seats);
    if occupied == 0 {
        return split_equal(members.len(), total, rounding_mode, remainder_to);
    }

    // Unoccupied seats are priced like members and billed to the remainder slot.
    let unoccupied = seat_total.map_or(0, |seat_total| {
        narrow((i128::from(seat_total) - occupied).max(0))
    });
    if unoccupied == 0 {
        return apportion_by_weights(total, &seats, rounding_mode, remainder_to);
    }

    let mut weights = seats;
    weights.push(unoccupied);
    let mut amounts = apportion_by_weights(total, &weights, rounding_mode, remainder_to);
    let unoccupied_amount = amounts.pop().unwrap_or(0);
    amounts[remainder_to.slot(members.len())] += unoccupied_amount;
    amounts
}
