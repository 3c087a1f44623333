// Tick Types

use soroban_sdk::{contracttype, Address, Env, Map, Vec};

/// Information stored for each initialized tick
///
/// The `*_opposite` snapshots hold the growth accrued on the side of the
/// tick opposite to the direction of its last traversal.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick
    pub liquidity_gross: i128,
    /// Net liquidity change when crossing left-to-right
    pub liquidity_net: i128,
    /// Spread reward growth on the opposite side, per denom
    pub spread_reward_growth_opposite: Map<Address, u128>,
    /// Uptime growth on the opposite side, one map per uptime tier
    pub uptime_growth_opposite: Vec<Map<Address, u128>>,
}

impl TickInfo {
    pub fn new(env: &Env) -> Self {
        Self {
            liquidity_gross: 0,
            liquidity_net: 0,
            spread_reward_growth_opposite: Map::new(env),
            uptime_growth_opposite: Vec::new(env),
        }
    }
}

/// Pool-wide growth at a point in time
#[derive(Clone, Debug)]
pub struct GrowthSnapshot {
    pub spread_reward: Map<Address, u128>,
    pub uptime: Vec<Map<Address, u128>>,
}

/// Which level of the tick bitmap a word belongs to
#[contracttype]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitmapLevel {
    /// One bit per compressed tick
    Tick,
    /// One bit per non-empty tick word
    Summary,
}

/// Direction of price movement
///
/// `ZeroForOne` sells token0 and walks the price down; `OneForZero`
/// sells token1 and walks it up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    ZeroForOne,
    OneForZero,
}
