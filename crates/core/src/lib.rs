//! Core business logic for Subpool.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `split` - Cost apportionment among pool members
//! - `pool` - Pools, members, previews and per-charge periods
//! - `charge` - Subscription charges and their fan-out to pools

pub mod charge;
pub mod pool;
pub mod split;
