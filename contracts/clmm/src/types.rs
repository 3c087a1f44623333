// Contract-level records and return types

use soroban_sdk::{contracttype, Address, Env, Map, Vec};

// ============================================================
// CONFIGURATION
// ============================================================

/// Module-wide parameters set by the admin
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleParams {
    pub admin: Address,
    pub authorized_tick_spacings: Vec<u32>,
    /// Spread factors in basis points
    pub authorized_spread_factors: Vec<u32>,
    /// Uptime tiers (seconds) incentives may target
    pub authorized_uptimes: Vec<u64>,
    pub permissionless_creation: bool,
}

// ============================================================
// POOL
// ============================================================

/// Pool state
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Pool {
    pub pool_id: u64,
    pub token0: Address,
    pub token1: Address,
    pub tick_spacing: u32,
    pub current_tick: i32,
    /// Q64.64
    pub current_sqrt_price: u128,
    /// Active liquidity
    pub liquidity: i128,
    pub spread_factor_bps: u32,
    /// Ledger timestamp of the last uptime accumulator sync
    pub last_liquidity_update: u64,
}

/// Ledger of the tokens a pool holds, split by purpose
///
/// All tokens sit at the contract address; these balances keep pools and
/// purposes apart.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct PoolBalances {
    pub principal0: i128,
    pub principal1: i128,
    pub spread_rewards: Map<Address, i128>,
    pub incentives: Map<Address, i128>,
}

impl PoolBalances {
    pub fn new(env: &Env) -> Self {
        Self {
            principal0: 0,
            principal1: 0,
            spread_rewards: Map::new(env),
            incentives: Map::new(env),
        }
    }
}

// ============================================================
// RESULTS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct PositionCreated {
    pub position_id: u64,
    pub liquidity: i128,
    pub amount0: i128,
    pub amount1: i128,
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub join_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct SwapResult {
    /// Token-in paid, spread charge included
    pub amount_in: i128,
    pub amount_out: i128,
    pub spread_charge: i128,
    pub current_tick: i32,
    pub sqrt_price: u128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct IncentivesCollected {
    pub collected: Map<Address, i128>,
    /// Amounts given up because the position was younger than the tier
    pub forfeited: Map<Address, i128>,
    /// Part of `forfeited` paid back because no other liquidity was
    /// active to take it
    pub returned: Map<Address, i128>,
}

/// Active liquidity over one segment between initialized ticks
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct LiquidityDepthWithRange {
    pub liquidity_amount: i128,
    pub lower_tick: i32,
    pub upper_tick: i32,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct TickLiquidityNet {
    pub liquidity_net: i128,
    pub tick_index: i32,
}
