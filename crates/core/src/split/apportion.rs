//! Weighted apportionment of an integer total.
//!
//! Shared by the equal, ratio and seat policies:
//! 1. Floor each exact share `total * w / sum(w)` and keep its remainder
//! 2. Resolve the unallocated units according to the rounding mode
//! 3. Take back any overshoot introduced by ceiling rounding
//!
//! All inputs are expected to be sanitized already: `total >= 0` and every
//! weight `>= 0`.

use std::cmp::Ordering;

use super::types::{RemainderTo, RoundingMode};

#[derive(Debug, Clone, Copy)]
enum Direction {
    Ascending,
    Descending,
}

/// Apportions `total` over `weights` so the parts sum exactly to `total`.
///
/// All-zero weights fall back to an equal split over the same count.
pub(crate) fn apportion_by_weights(
    total: i64,
    weights: &[i64],
    rounding_mode: RoundingMode,
    remainder_to: RemainderTo,
) -> Vec<i64> {
    if weights.is_empty() {
        return Vec::new();
    }

    let denom: i128 = weights.iter().map(|&w| i128::from(w.max(0))).sum();
    if denom == 0 {
        return apportion_by_weights(total, &vec![1; weights.len()], rounding_mode, remainder_to);
    }

    let wide_total = i128::from(total);
    let (mut amounts, remainders): (Vec<i64>, Vec<i128>) = weights
        .iter()
        .map(|&w| {
            let product = wide_total * i128::from(w.max(0));
            (narrow(product.div_euclid(denom)), product.rem_euclid(denom))
        })
        .unzip();

    if rounding_mode == RoundingMode::Ceil {
        for (amount, remainder) in amounts.iter_mut().zip(&remainders) {
            if *remainder > 0 {
                *amount += 1;
            }
        }
    }

    let diff = total - amounts.iter().sum::<i64>();
    if diff == 0 {
        return amounts;
    }

    if rounding_mode == RoundingMode::Floor {
        let slot = remainder_to.slot(amounts.len());
        amounts[slot] += diff;
        return amounts;
    }

    if diff < 0 {
        subtract_units(&mut amounts, -diff, &remainders, remainder_to);
        return amounts;
    }

    // Minor: one unit at a time, largest remainder first.
    let order = indices_by_remainder(&remainders, Direction::Descending, remainder_to);
    for &idx in order.iter().cycle().take(usize::try_from(diff).unwrap_or(usize::MAX)) {
        amounts[idx] += 1;
    }
    amounts
}

/// Removes `units` from `amounts` without driving any entry below zero.
///
/// The remainder slot gives first, then the others in ascending remainder
/// order. Units that cannot be taken are dropped.
fn subtract_units(
    amounts: &mut [i64],
    units: i64,
    remainders: &[i128],
    remainder_to: RemainderTo,
) {
    let target = remainder_to.slot(amounts.len());
    let take = units.min(amounts[target]).max(0);
    amounts[target] -= take;
    let mut remaining = units - take;

    for idx in indices_by_remainder(remainders, Direction::Ascending, remainder_to) {
        if remaining == 0 {
            break;
        }
        if idx == target {
            continue;
        }
        let take = remaining.min(amounts[idx]).max(0);
        amounts[idx] -= take;
        remaining -= take;
    }
}

/// Lowers `amounts` until their sum is at most `total`.
///
/// The entry at `remainder_index` is left alone; the others are reduced
/// largest first, ties by ascending index, never below zero.
pub(crate) fn reduce_to_total(amounts: &mut [i64], total: i64, remainder_index: usize) {
    let total = i128::from(total);
    let mut current = wide_sum(amounts);
    if current <= total {
        return;
    }

    let mut order: Vec<usize> = (0..amounts.len()).filter(|&i| i != remainder_index).collect();
    order.sort_by(|&a, &b| amounts[b].cmp(&amounts[a]).then(a.cmp(&b)));

    for idx in order {
        if current <= total {
            break;
        }
        let take = narrow((current - total).min(i128::from(amounts[idx])).max(0));
        amounts[idx] -= take;
        current -= i128::from(take);
    }
}

/// Member indices sorted by remainder.
///
/// Equal remainders resolve toward the last index when the remainder goes
/// to the last member, otherwise toward the first.
fn indices_by_remainder(
    remainders: &[i128],
    direction: Direction,
    remainder_to: RemainderTo,
) -> Vec<usize> {
    let prefer_last = remainder_to.prefers_last();
    let mut order: Vec<usize> = (0..remainders.len()).collect();
    order.sort_by(|&a, &b| {
        let by_remainder = match direction {
            Direction::Descending => remainders[b].cmp(&remainders[a]),
            Direction::Ascending => remainders[a].cmp(&remainders[b]),
        };
        by_remainder.then_with(|| {
            if prefer_last {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        })
    });
    order
}

/// Sum without overflow, however many members carry large values.
pub(crate) fn wide_sum(values: &[i64]) -> i128 {
    values.iter().map(|&v| i128::from(v)).sum()
}

/// Saturating conversion back to `i64`.
pub(crate) fn narrow(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(match value.cmp(&0) {
        Ordering::Less => i64::MIN,
        Ordering::Equal | Ordering::Greater => i64::MAX,
    })
}
