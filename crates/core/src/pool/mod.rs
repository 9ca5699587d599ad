//! Cost-sharing pools.
//!
//! A pool splits every charge of one subscription among its active members
//! using the split engine, producing one period with a pending line per member.

pub mod error;
pub mod service;
pub mod types;

pub use error::PoolError;
pub use service::PoolService;
pub use types::{
    CreatePoolInput, CreatePoolMemberInput, LineStatus, Pool, PoolLine, PoolMember, PoolPeriod,
};
