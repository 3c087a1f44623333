// Read-only views over pool liquidity

use soroban_sdk::{Address, Env, Vec};
use tidal_math::{MAX_TICK, MIN_TICK};
use tidal_swap::{resolve_direction, Direction};
use tidal_tick::{get_tick, next_initialized_tick};

use crate::error::ClmmError;
use crate::storage::PoolTicks;
use crate::types::{LiquidityDepthWithRange, Pool, TickLiquidityNet};

/// Active liquidity between every pair of adjacent initialized ticks,
/// lowest first
pub fn liquidity_for_full_range(env: &Env, pool: &Pool) -> Result<Vec<LiquidityDepthWithRange>, ClmmError> {
    let ticks = PoolTicks::new(pool.pool_id);
    let mut out = Vec::new(env);
    let mut liquidity: i128 = 0;
    let mut previous: Option<i32> = None;
    let mut from = MIN_TICK - 1;

    while let Some(tick) = next_initialized_tick(env, &ticks, from, pool.tick_spacing, Direction::OneForZero) {
        if let Some(lower_tick) = previous {
            out.push_back(LiquidityDepthWithRange {
                liquidity_amount: liquidity,
                lower_tick,
                upper_tick: tick,
            });
        }
        let info = get_tick(env, &ticks, tick)?;
        liquidity = liquidity.checked_add(info.liquidity_net).ok_or(ClmmError::LiquidityOverflow)?;
        previous = Some(tick);
        from = tick;
    }
    Ok(out)
}

/// Net liquidity of the initialized ticks a swap selling `token_in`
/// would cross, from `start_tick` (default: current tick) up to
/// `bound_tick` (default: the global bound)
pub fn liquidity_net_in_direction(
    env: &Env,
    pool: &Pool,
    token_in: &Address,
    start_tick: Option<i32>,
    bound_tick: Option<i32>,
) -> Result<Vec<TickLiquidityNet>, ClmmError> {
    let token_out = if *token_in == pool.token0 { &pool.token1 } else { &pool.token0 };
    let direction = resolve_direction(token_in, token_out, &pool.token0, &pool.token1)?;

    let start = start_tick.unwrap_or(pool.current_tick);
    if !(MIN_TICK..=MAX_TICK).contains(&start) {
        return Err(ClmmError::TickOutOfRange);
    }
    let bound = match direction {
        Direction::ZeroForOne => bound_tick.unwrap_or(MIN_TICK),
        Direction::OneForZero => bound_tick.unwrap_or(MAX_TICK),
    };
    let bound_valid = match direction {
        Direction::ZeroForOne => bound >= MIN_TICK && bound <= start,
        Direction::OneForZero => bound <= MAX_TICK && bound >= start,
    };
    if !bound_valid {
        return Err(ClmmError::InvalidTickBound);
    }

    let ticks = PoolTicks::new(pool.pool_id);
    let mut out = Vec::new(env);
    let mut from = start;
    while let Some(tick) = next_initialized_tick(env, &ticks, from, pool.tick_spacing, direction) {
        let past_bound = match direction {
            Direction::ZeroForOne => tick < bound,
            Direction::OneForZero => tick > bound,
        };
        if past_bound {
            break;
        }
        let info = get_tick(env, &ticks, tick)?;
        out.push_back(TickLiquidityNet {
            liquidity_net: info.liquidity_net,
            tick_index: tick,
        });
        from = match direction {
            Direction::ZeroForOne => tick - 1,
            Direction::OneForZero => tick,
        };
    }
    Ok(out)
}
