// Tidal Reward Accumulator Package

#![no_std]

pub mod error;
pub mod growth;
pub mod types;
pub mod settle;

pub use error::AccumError;
pub use growth::{
    growth_get,
    growth_add_assign,
    growth_sub,
    growth_per_liquidity,
    GrowthDelta,
};
pub use types::{AccumPosition, AccumulatorRecord, ScaledReward};
pub use settle::{
    init_or_update_position,
    settle_pending,
    claim_rewards,
    add_to_accumulator,
    redeposit,
};
