// Accumulator Types

use soroban_sdk::{contracttype, Address, Env, Map};

/// Per-pool reward stream
///
/// `value` is the monotonically increasing growth per unit of liquidity
/// for each denom, Q64.64 scaled.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct AccumulatorRecord {
    pub value: Map<Address, u128>,
    pub total_shares: u128,
}

impl AccumulatorRecord {
    pub fn new(env: &Env) -> Self {
        Self {
            value: Map::new(env),
            total_shares: 0,
        }
    }
}

/// Settled reward split into whole token units and a 2^-64 remainder
#[contracttype]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScaledReward {
    pub amount: u128,
    pub dust: u64,
}

/// A position's stake in one accumulator
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct AccumPosition {
    /// Liquidity of the position
    pub shares: u128,
    /// Growth inside the position's range at the last settlement
    pub value_at_last_update: Map<Address, u128>,
    /// Rewards settled but not yet claimed
    pub unclaimed: Map<Address, ScaledReward>,
}
