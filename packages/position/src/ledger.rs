// Position Ledger Helpers

use soroban_sdk::Env;
use tidal_math::{amounts_for_liquidity, is_tick_aligned, MAX_TICK, MIN_TICK};
use crate::error::PositionError;
use crate::types::Position;

/// Validate a position's tick range against the pool's spacing
pub fn validate_position_range(
    lower_tick: i32,
    upper_tick: i32,
    tick_spacing: u32,
) -> Result<(), PositionError> {
    if lower_tick >= upper_tick {
        return Err(PositionError::InvalidLowerUpperTick);
    }
    if lower_tick < MIN_TICK || upper_tick > MAX_TICK {
        return Err(PositionError::TickOutOfRange);
    }
    if !is_tick_aligned(lower_tick, tick_spacing) || !is_tick_aligned(upper_tick, tick_spacing) {
        return Err(PositionError::TickNotMultipleOfSpacing);
    }
    Ok(())
}

/// Whether the position's liquidity is part of the pool's active liquidity
#[inline]
pub fn is_active(position: &Position, current_tick: i32) -> bool {
    position.lower_tick <= current_tick && current_tick < position.upper_tick
}

/// Apply a signed liquidity change to a position
///
/// A negative delta must be covered by the position's liquidity.
pub fn apply_liquidity_delta(position: &mut Position, liquidity_delta: i128) -> Result<(), PositionError> {
    let updated = position
        .liquidity
        .checked_add(liquidity_delta)
        .ok_or(PositionError::LiquidityOverflow)?;
    if updated < 0 {
        return Err(PositionError::InsufficientLiquidity);
    }
    position.liquidity = updated;
    Ok(())
}

/// Token amounts backing `liquidity` of a position at the pool's price
///
/// Deposits pass `round_up = true`, withdrawals and queries `false`.
pub fn position_amounts(
    env: &Env,
    position: &Position,
    current_tick: i32,
    sqrt_price_current: u128,
    liquidity: i128,
    round_up: bool,
) -> Result<(u128, u128), PositionError> {
    if liquidity < 0 {
        return Err(PositionError::InsufficientLiquidity);
    }
    Ok(amounts_for_liquidity(
        env,
        current_tick,
        sqrt_price_current,
        position.lower_tick,
        position.upper_tick,
        liquidity as u128,
        round_up,
    )?)
}
