// Pool creation, balances and global growth

use soroban_sdk::{token, Address, Env, Map, Vec};
use tidal_accum::AccumulatorRecord;
use tidal_incentives::{uptime_index, uptime_stream, NUM_UPTIMES, SPREAD_REWARD_STREAM, STREAM_COUNT};
use tidal_math::{is_valid_sqrt_price, sqrt_price_to_tick, BPS_DENOMINATOR, MAX_TICK};
use tidal_tick::GrowthSnapshot;

use crate::error::ClmmError;
use crate::storage::*;
use crate::types::{ModuleParams, Pool, PoolBalances};

// ============================================================
// PARAMS
// ============================================================

pub fn validate_params(params: &ModuleParams) -> Result<(), ClmmError> {
    for spacing in params.authorized_tick_spacings.iter() {
        if spacing == 0 || spacing > MAX_TICK as u32 {
            return Err(ClmmError::InvalidParams);
        }
    }
    for spread_factor in params.authorized_spread_factors.iter() {
        if spread_factor >= BPS_DENOMINATOR {
            return Err(ClmmError::InvalidParams);
        }
    }
    for uptime in params.authorized_uptimes.iter() {
        if uptime_index(uptime).is_none() {
            return Err(ClmmError::InvalidParams);
        }
    }
    Ok(())
}

// ============================================================
// POOL CREATION
// ============================================================

/// Validate and store a new pool with empty accumulators
pub fn create_pool(
    env: &Env,
    params: &ModuleParams,
    token0: Address,
    token1: Address,
    tick_spacing: u32,
    spread_factor_bps: u32,
    initial_sqrt_price: u128,
) -> Result<Pool, ClmmError> {
    if token0 == token1 {
        return Err(ClmmError::InvalidTokenPair);
    }
    if !params.authorized_tick_spacings.contains(tick_spacing) {
        return Err(ClmmError::UnauthorizedTickSpacing);
    }
    if !params.authorized_spread_factors.contains(spread_factor_bps) {
        return Err(ClmmError::UnauthorizedSpreadFactor);
    }
    if !is_valid_sqrt_price(initial_sqrt_price) {
        return Err(ClmmError::InvalidInitialPrice);
    }
    let current_tick = sqrt_price_to_tick(initial_sqrt_price)?;

    let pool = Pool {
        pool_id: next_pool_id(env),
        token0,
        token1,
        tick_spacing,
        current_tick,
        current_sqrt_price: initial_sqrt_price,
        liquidity: 0,
        spread_factor_bps,
        last_liquidity_update: env.ledger().timestamp(),
    };
    write_pool(env, &pool);
    write_balances(env, pool.pool_id, &PoolBalances::new(env));
    for stream in 0..STREAM_COUNT {
        write_accum(env, pool.pool_id, stream, &AccumulatorRecord::new(env));
    }
    Ok(pool)
}

// ============================================================
// GROWTH
// ============================================================

/// Current global growth of every stream of a pool
pub fn growth_snapshot(env: &Env, pool_id: u64) -> Result<GrowthSnapshot, ClmmError> {
    let spread = read_accum(env, pool_id, SPREAD_REWARD_STREAM)?;
    let mut uptime = Vec::new(env);
    for tier in 0..NUM_UPTIMES {
        uptime.push_back(read_accum(env, pool_id, uptime_stream(tier))?.value);
    }
    Ok(GrowthSnapshot {
        spread_reward: spread.value,
        uptime,
    })
}

/// Uptime accumulators of a pool, indexed by tier
pub fn read_uptime_accums(env: &Env, pool_id: u64) -> Result<Vec<AccumulatorRecord>, ClmmError> {
    let mut accums = Vec::new(env);
    for tier in 0..NUM_UPTIMES {
        accums.push_back(read_accum(env, pool_id, uptime_stream(tier))?);
    }
    Ok(accums)
}

// ============================================================
// BALANCES
// ============================================================

#[inline]
pub fn to_i128(amount: u128) -> Result<i128, ClmmError> {
    i128::try_from(amount).map_err(|_| ClmmError::MathOverflow)
}

pub fn credit(balance: &mut i128, amount: i128) -> Result<(), ClmmError> {
    *balance = balance.checked_add(amount).ok_or(ClmmError::MathOverflow)?;
    Ok(())
}

pub fn debit(balance: &mut i128, amount: i128) -> Result<(), ClmmError> {
    if amount > *balance {
        return Err(ClmmError::InsufficientPoolBalance);
    }
    *balance -= amount;
    Ok(())
}

pub fn credit_denom(balances: &mut Map<Address, i128>, token: &Address, amount: i128) -> Result<(), ClmmError> {
    let mut balance = balances.get(token.clone()).unwrap_or(0);
    credit(&mut balance, amount)?;
    balances.set(token.clone(), balance);
    Ok(())
}

pub fn debit_denom(balances: &mut Map<Address, i128>, token: &Address, amount: i128) -> Result<(), ClmmError> {
    let mut balance = balances.get(token.clone()).unwrap_or(0);
    debit(&mut balance, amount)?;
    balances.set(token.clone(), balance);
    Ok(())
}

/// Principal balance of one side of the pool
pub fn principal_mut<'a>(balances: &'a mut PoolBalances, pool: &Pool, token: &Address) -> &'a mut i128 {
    if *token == pool.token0 {
        &mut balances.principal0
    } else {
        &mut balances.principal1
    }
}

// ============================================================
// TRANSFERS
// ============================================================

pub fn transfer_in(env: &Env, token: &Address, from: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(from, &env.current_contract_address(), &amount);
    }
}

pub fn transfer_out(env: &Env, token: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    }
}

/// Pay out every entry of a map of amounts
pub fn transfer_out_all(env: &Env, to: &Address, amounts: &Map<Address, i128>) {
    for (token, amount) in amounts.iter() {
        transfer_out(env, &token, to, amount);
    }
}
