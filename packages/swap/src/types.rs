use soroban_sdk::Address;
use tidal_tick::{Direction, GrowthSnapshot};

/// Which side of the trade the caller fixes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapKind {
    /// `amount` is the token-in budget, spread charge included
    ExactIn,
    /// `amount` is the token-out to deliver
    ExactOut,
}

/// Whether crossed ticks are persisted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapMode {
    Execute,
    Quote,
}

/// Pool state the engine starts from
#[derive(Clone, Debug)]
pub struct SwapState {
    pub sqrt_price: u128,
    pub current_tick: i32,
    pub liquidity: u128,
    pub tick_spacing: u32,
    pub spread_factor_bps: u32,
    pub token_in: Address,
    /// Global growth, uptime accumulators already synced to now
    pub global: GrowthSnapshot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapRequest {
    pub amount: u128,
    pub kind: SwapKind,
    pub direction: Direction,
    /// Resolved limit, see `resolve_price_limit`
    pub sqrt_price_limit: u128,
}

/// Result of a swap run
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    /// Token-in taken from the trader, spread charge included
    pub amount_in: u128,
    pub amount_out: u128,
    /// Part of `amount_in` routed to spread rewards
    pub spread_charge: u128,
    pub sqrt_price: u128,
    pub current_tick: i32,
    pub liquidity: u128,
    /// Global spread reward growth after the swap
    pub spread_reward_growth: soroban_sdk::Map<Address, u128>,
    pub ticks_crossed: u32,
    /// Steps whose charge produced no growth (truncated, overflowed or
    /// charged against zero liquidity)
    pub undistributed_steps: u32,
    /// Charge carried by those steps
    pub undistributed_charge: u128,
}
