use soroban_sdk::{contracttype, Address};

/// A funded emission schedule for one pool
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct IncentiveRecord {
    pub incentive_id: u64,
    pub pool_id: u64,
    pub token: Address,
    /// Tokens not yet emitted
    pub remaining: i128,
    /// Tokens per second
    pub emission_rate: i128,
    pub start_time: u64,
    /// Uptime tier in seconds
    pub min_uptime: u64,
}

/// Emission that produced no growth
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmissionAnomaly {
    /// Emitted amount is too small to move growth
    Truncated { incentive_id: u64, amount: i128 },
    /// Growth delta does not fit in 128 bits
    Overflow { incentive_id: u64, amount: i128 },
    /// No active liquidity; the record keeps its tokens
    ZeroLiquidity { incentive_id: u64, amount: i128 },
}
