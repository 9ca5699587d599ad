//! Cost apportionment for shared subscriptions.
//!
//! This module divides a monetary total (integer minor units) among pool
//! members under one of four policies:
//! - `Equal` - every member carries the same weight
//! - `Fixed` - members pay their own amounts, the remainder slot absorbs the rest
//! - `Ratio` - members are weighted by their value
//! - `Seat` - members are weighted by seat count, unoccupied seats go to the remainder slot
//!
//! Every call returns one allocation per member, in input order, with
//! non-negative amounts that sum exactly to the total.

mod apportion;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::calculate_split;
pub use error::SplitError;
pub use types::{
    RawNumber, RemainderTo, RoundingMode, SplitMember, SplitOptions, SplitPolicy, SplitResult,
};
