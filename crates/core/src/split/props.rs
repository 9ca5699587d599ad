//! Property-based tests for the split engine.
//!
//! - Sum invariant: allocations add up to the sanitized total
//! - Non-negativity: no member is ever owed a negative amount
//! - Shape: one result per member, in input order
//! - Determinism: identical inputs give identical outputs

use proptest::prelude::*;

use super::engine::calculate_split;
use super::normalize;
use super::types::{
    RawNumber, RemainderTo, RoundingMode, SplitMember, SplitOptions, SplitPolicy,
};

fn policy() -> impl Strategy<Value = SplitPolicy> {
    prop_oneof![
        Just(SplitPolicy::Equal),
        Just(SplitPolicy::Fixed),
        Just(SplitPolicy::Ratio),
        Just(SplitPolicy::Seat),
    ]
}

fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::Minor),
        Just(RoundingMode::Floor),
        Just(RoundingMode::Ceil),
    ]
}

fn remainder_to() -> impl Strategy<Value = RemainderTo> {
    prop_oneof![
        Just(RemainderTo::Owner),
        Just(RemainderTo::First),
        Just(RemainderTo::Last),
    ]
}

/// Member values as callers actually send them, malformed ones included.
fn raw_value() -> impl Strategy<Value = Option<RawNumber>> {
    prop_oneof![
        4 => (0i64..1_000).prop_map(|v| Some(RawNumber::Integer(v))),
        1 => Just(None),
        1 => (-1_000i64..0).prop_map(|v| Some(RawNumber::Integer(v))),
        1 => (-1_000.0f64..100_000.0).prop_map(|v| Some(RawNumber::Float(v))),
        1 => Just(Some(RawNumber::Float(f64::NAN))),
        1 => (0i64..normalize::MAX_SAFE_INTEGER).prop_map(|v| Some(RawNumber::Integer(v))),
    ]
}

fn members() -> impl Strategy<Value = Vec<SplitMember>> {
    prop::collection::vec(raw_value(), 0..25).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| SplitMember {
                id: format!("member-{i}"),
                display_name: format!("Member {i}"),
                value,
            })
            .collect()
    })
}

fn options() -> impl Strategy<Value = SplitOptions> {
    (
        prop::option::of(0i64..200),
        rounding_mode(),
        remainder_to(),
    )
        .prop_map(|(seat_total, rounding_mode, remainder_to)| SplitOptions {
            seat_total: seat_total.map(RawNumber::Integer),
            rounding_mode,
            remainder_to,
        })
}

fn total() -> impl Strategy<Value = i64> {
    prop_oneof![
        0i64..1_000,
        0i64..100_000_000,
        Just(normalize::MAX_SAFE_INTEGER),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Allocations sum exactly to the total.
    #[test]
    fn prop_sum_equals_total(
        members in members(),
        total in total(),
        policy in policy(),
        options in options(),
    ) {
        let result = calculate_split(&members, total, policy, options);
        if !members.is_empty() {
            let sum: i128 = result.iter().map(|r| i128::from(r.amount)).sum();
            prop_assert_eq!(sum, i128::from(total), "policy {} options {:?}", policy, options);
        }
    }

    /// No allocation is negative.
    #[test]
    fn prop_amounts_non_negative(
        members in members(),
        total in total(),
        policy in policy(),
        options in options(),
    ) {
        let result = calculate_split(&members, total, policy, options);
        for r in &result {
            prop_assert!(r.amount >= 0, "{} got {}", r.member_id, r.amount);
        }
    }

    /// One result per member, in the same order.
    #[test]
    fn prop_shape_matches_input(
        members in members(),
        total in total(),
        policy in policy(),
        options in options(),
    ) {
        let result = calculate_split(&members, total, policy, options);
        prop_assert_eq!(result.len(), members.len());
        for (member, r) in members.iter().zip(&result) {
            prop_assert_eq!(&member.id, &r.member_id);
            prop_assert_eq!(&member.display_name, &r.display_name);
        }
    }

    /// Repeated calls agree.
    #[test]
    fn prop_deterministic(
        members in members(),
        total in total(),
        policy in policy(),
        options in options(),
    ) {
        let first = calculate_split(&members, total, policy, options);
        let second = calculate_split(&members, total, policy, options);
        prop_assert_eq!(first, second);
    }

    /// Equal shares never differ by more than one unit under `Minor`.
    #[test]
    fn prop_equal_minor_is_balanced(
        count in 1usize..50,
        total in 0i64..10_000_000,
        remainder_to in remainder_to(),
    ) {
        let members: Vec<SplitMember> = (0..count)
            .map(|i| SplitMember::new(i.to_string(), i.to_string()))
            .collect();
        let options = SplitOptions::default().with_remainder_to(remainder_to);
        let result = calculate_split(&members, total, SplitPolicy::Equal, options);
        let max = result.iter().map(|r| r.amount).max().unwrap_or(0);
        let min = result.iter().map(|r| r.amount).min().unwrap_or(0);
        prop_assert!(max - min <= 1);
    }

    /// Fixed members within budget are charged exactly what they asked for.
    #[test]
    fn prop_fixed_within_budget_is_exact(
        values in prop::collection::vec(0i64..1_000, 2..10),
        slack in 0i64..10_000,
    ) {
        let members: Vec<SplitMember> = values
            .iter()
            .enumerate()
            .map(|(i, v)| SplitMember::new(i.to_string(), i.to_string()).with_value(*v))
            .collect();
        let requested: i64 = values.iter().skip(1).sum();
        let total = requested + slack;

        let result = calculate_split(&members, total, SplitPolicy::Fixed, SplitOptions::default());
        prop_assert_eq!(result[0].amount, slack);
        for (r, v) in result.iter().zip(&values).skip(1) {
            prop_assert_eq!(r.amount, *v);
        }
    }

    /// Any finite float total behaves like its truncation.
    #[test]
    fn prop_float_total_truncates(
        whole in 0i64..1_000_000,
        frac in 0.0f64..0.999,
        policy in policy(),
    ) {
        let members: Vec<SplitMember> = (0..3)
            .map(|i| SplitMember::new(i.to_string(), i.to_string()).with_value(i + 1))
            .collect();
        #[allow(clippy::cast_precision_loss, clippy::float_arithmetic)]
        let float_total = whole as f64 + frac;
        let from_float = calculate_split(&members, float_total, policy, SplitOptions::default());
        let from_int = calculate_split(&members, whole, policy, SplitOptions::default());
        prop_assert_eq!(from_float, from_int);
    }
}
