//! Subscription charges and their fan-out to pools.

pub mod error;
pub mod service;
pub mod types;

pub use error::ChargeError;
pub use service::ChargeService;
pub use types::{Charge, ChargeBatch, ChargeStatus, PoolWithMembers, Subscription};
