// Position lifecycle: open, withdraw, add

use soroban_sdk::{Address, Env, Map, Vec};
use tidal_accum::init_or_update_position;
use tidal_incentives::STREAM_COUNT;
use tidal_math::{liquidity_from_amounts, tick_to_sqrt_price};
use tidal_position::{apply_liquidity_delta, is_active, position_amounts, validate_position_range, Position};
use tidal_tick::{spread_reward_growth_inside, update_tick, uptime_growth_inside, GrowthSnapshot};

use crate::error::ClmmError;
use crate::pool::{credit, debit, growth_snapshot, to_i128};
use crate::rewards::{collect_incentives, collect_spread_rewards, sync_incentives};
use crate::storage::*;
use crate::types::{IncentivesCollected, Pool};

/// Growth inside a range for every stream, spread rewards first
fn streams_inside(
    env: &Env,
    ticks: &PoolTicks,
    pool: &Pool,
    position: &Position,
    global: &GrowthSnapshot,
) -> Result<Vec<Map<Address, u128>>, ClmmError> {
    let mut out = Vec::new(env);
    out.push_back(spread_reward_growth_inside(
        env,
        ticks,
        position.lower_tick,
        position.upper_tick,
        pool.current_tick,
        &global.spread_reward,
    )?);
    let uptime = uptime_growth_inside(
        env,
        ticks,
        position.lower_tick,
        position.upper_tick,
        pool.current_tick,
        &global.uptime,
    )?;
    out.append(&uptime);
    Ok(out)
}

// ============================================================
// LIQUIDITY CHANGES
// ============================================================

/// Apply a liquidity delta to the ticks, the pool and every accumulator
///
/// Syncs incentives first. Writes the pool; the caller updates the
/// position record itself.
pub fn modify_liquidity(
    env: &Env,
    pool: &mut Pool,
    position: &Position,
    liquidity_delta: i128,
) -> Result<(), ClmmError> {
    sync_incentives(env, pool)?;
    let global = growth_snapshot(env, pool.pool_id)?;
    let ticks = PoolTicks::new(pool.pool_id);

    // Boundary ticks may be removed on the way out
    let before = if liquidity_delta < 0 {
        Some(streams_inside(env, &ticks, pool, position, &global)?)
    } else {
        None
    };

    update_tick(
        env,
        &ticks,
        position.lower_tick,
        pool.current_tick,
        pool.tick_spacing,
        liquidity_delta,
        false,
        &global,
    )?;
    update_tick(
        env,
        &ticks,
        position.upper_tick,
        pool.current_tick,
        pool.tick_spacing,
        liquidity_delta,
        true,
        &global,
    )?;

    let inside = match before {
        Some(inside) => inside,
        None => streams_inside(env, &ticks, pool, position, &global)?,
    };

    if is_active(position, pool.current_tick) {
        let liquidity = pool
            .liquidity
            .checked_add(liquidity_delta)
            .ok_or(ClmmError::LiquidityOverflow)?;
        if liquidity < 0 {
            return Err(ClmmError::InsufficientLiquidity);
        }
        pool.liquidity = liquidity;
    }

    for stream in 0..STREAM_COUNT {
        let mut accum = read_accum(env, pool.pool_id, stream)?;
        let existing = read_accum_position(env, pool.pool_id, stream, position.position_id);
        let stream_inside = inside.get(stream).unwrap_or_else(|| Map::new(env));
        let record = init_or_update_position(env, &mut accum, existing, liquidity_delta, &stream_inside)?;
        write_accum(env, pool.pool_id, stream, &accum);
        write_accum_position(env, pool.pool_id, stream, position.position_id, &record);
    }

    write_pool(env, pool);
    Ok(())
}

// ============================================================
// OPEN
// ============================================================

/// Opened position and the principal it takes in
pub struct Opened {
    pub position: Position,
    pub amount0: i128,
    pub amount1: i128,
}

/// Create a position from desired amounts
///
/// Records the principal in the pool balances; token transfers are left
/// to the caller.
pub fn open_position(
    env: &Env,
    pool: &mut Pool,
    owner: &Address,
    lower_tick: i32,
    upper_tick: i32,
    amount0_desired: i128,
    amount1_desired: i128,
    amount0_min: i128,
    amount1_min: i128,
) -> Result<Opened, ClmmError> {
    validate_position_range(lower_tick, upper_tick, pool.tick_spacing)?;
    if amount0_desired < 0 || amount1_desired < 0 || amount0_min < 0 || amount1_min < 0 {
        return Err(ClmmError::NegativeAmount);
    }
    if amount0_desired == 0 && amount1_desired == 0 {
        return Err(ClmmError::ZeroAmounts);
    }

    let liquidity = liquidity_from_amounts(
        env,
        pool.current_sqrt_price,
        tick_to_sqrt_price(lower_tick)?,
        tick_to_sqrt_price(upper_tick)?,
        amount0_desired as u128,
        amount1_desired as u128,
    )?;
    if liquidity == 0 {
        return Err(ClmmError::ZeroLiquidity);
    }
    let liquidity = to_i128(liquidity)?;

    let mut position = Position {
        position_id: next_position_id(env),
        pool_id: pool.pool_id,
        owner: owner.clone(),
        lower_tick,
        upper_tick,
        liquidity: 0,
        join_time: env.ledger().timestamp(),
    };

    let (amount0, amount1) = position_amounts(
        env,
        &position,
        pool.current_tick,
        pool.current_sqrt_price,
        liquidity,
        true,
    )?;
    let amount0 = to_i128(amount0)?;
    let amount1 = to_i128(amount1)?;
    if amount0 < amount0_min || amount1 < amount1_min {
        return Err(ClmmError::InsufficientLiquidityCreated);
    }

    modify_liquidity(env, pool, &position, liquidity)?;
    apply_liquidity_delta(&mut position, liquidity)?;
    insert_position(env, &position);

    let mut balances = read_balances(env, pool.pool_id);
    credit(&mut balances.principal0, amount0)?;
    credit(&mut balances.principal1, amount1)?;
    write_balances(env, pool.pool_id, &balances);

    Ok(Opened {
        position,
        amount0,
        amount1,
    })
}

// ============================================================
// WITHDRAW
// ============================================================

/// Principal and rewards released by a withdrawal
pub struct Withdrawn {
    pub amount0: i128,
    pub amount1: i128,
    pub incentives: IncentivesCollected,
    /// Spread rewards paid when the position closed
    pub spread_rewards: Map<Address, i128>,
    pub closed: bool,
}

/// Remove liquidity from a position
///
/// Incentives are collected (and paid) first. A position left with no
/// liquidity also has its spread rewards paid, then it is deleted along
/// with its accumulator records. Principal transfers are left to the
/// caller.
pub fn withdraw_liquidity(
    env: &Env,
    pool: &mut Pool,
    position: &mut Position,
    liquidity_amount: i128,
) -> Result<Withdrawn, ClmmError> {
    if liquidity_amount <= 0 || liquidity_amount > position.liquidity {
        return Err(ClmmError::InsufficientLiquidity);
    }

    let incentives = collect_incentives(env, pool, position)?;

    modify_liquidity(env, pool, position, -liquidity_amount)?;
    apply_liquidity_delta(position, -liquidity_amount)?;

    let (amount0, amount1) = position_amounts(
        env,
        position,
        pool.current_tick,
        pool.current_sqrt_price,
        liquidity_amount,
        false,
    )?;
    let amount0 = to_i128(amount0)?;
    let amount1 = to_i128(amount1)?;

    let mut balances = read_balances(env, pool.pool_id);
    debit(&mut balances.principal0, amount0)?;
    debit(&mut balances.principal1, amount1)?;
    write_balances(env, pool.pool_id, &balances);

    let closed = position.liquidity == 0;
    let spread_rewards = if closed {
        let paid = collect_spread_rewards(env, pool, position)?;
        for stream in 0..STREAM_COUNT {
            remove_accum_position(env, pool.pool_id, stream, position.position_id);
        }
        delete_position(env, position);
        paid
    } else {
        write_position(env, position);
        Map::new(env)
    };

    Ok(Withdrawn {
        amount0,
        amount1,
        incentives,
        spread_rewards,
        closed,
    })
}

// ============================================================
// ADD
// ============================================================

/// Outcome of re-creating a position with extra principal
pub struct Added {
    pub opened: Opened,
    /// Principal the old position released
    pub withdrawn0: i128,
    pub withdrawn1: i128,
}

/// Close `position` and open a new one over the same range with its
/// principal plus the added amounts
pub fn add_to_position(
    env: &Env,
    pool: &mut Pool,
    position: &mut Position,
    amount0: i128,
    amount1: i128,
    amount0_min: i128,
    amount1_min: i128,
) -> Result<Added, ClmmError> {
    if amount0 < 0 || amount1 < 0 {
        return Err(ClmmError::NegativeAmount);
    }
    if amount0 == 0 && amount1 == 0 {
        return Err(ClmmError::ZeroAmounts);
    }
    if read_pool_positions(env, pool.pool_id).len() <= 1 {
        return Err(ClmmError::AddToLastPositionInPool);
    }

    let liquidity = position.liquidity;
    let withdrawn = withdraw_liquidity(env, pool, position, liquidity)?;

    let desired0 = withdrawn.amount0.checked_add(amount0).ok_or(ClmmError::MathOverflow)?;
    let desired1 = withdrawn.amount1.checked_add(amount1).ok_or(ClmmError::MathOverflow)?;
    let opened = open_position(
        env,
        pool,
        &position.owner,
        position.lower_tick,
        position.upper_tick,
        desired0,
        desired1,
        amount0_min,
        amount1_min,
    )?;

    Ok(Added {
        opened,
        withdrawn0: withdrawn.amount0,
        withdrawn1: withdrawn.amount1,
    })
}
