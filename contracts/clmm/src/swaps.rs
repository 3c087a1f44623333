// Swap execution against pool state

use soroban_sdk::{Address, Env};
use tidal_incentives::SPREAD_REWARD_STREAM;
use tidal_swap::{
    compute_swap, resolve_direction, resolve_price_limit, SwapKind, SwapMode, SwapOutcome, SwapRequest,
    SwapState,
};

use crate::error::ClmmError;
use crate::events;
use crate::pool::{credit, credit_denom, debit, growth_snapshot, principal_mut, to_i128, transfer_in, transfer_out};
use crate::rewards::{active_liquidity, sync_incentives};
use crate::storage::*;
use crate::types::{Pool, SwapResult};

/// Slippage bound checked before anything is transferred
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountBound {
    MinOut(i128),
    MaxIn(i128),
}

impl AmountBound {
    fn check(self, outcome: &SwapOutcome) -> Result<(), ClmmError> {
        match self {
            AmountBound::MinOut(min) => {
                if to_i128(outcome.amount_out)? < min {
                    return Err(ClmmError::AmountLessThanMin);
                }
            }
            AmountBound::MaxIn(max) => {
                if to_i128(outcome.amount_in)? > max {
                    return Err(ClmmError::AmountGreaterThanMax);
                }
            }
        }
        Ok(())
    }
}

/// Run the swap loop for a pool without touching pool records
///
/// In `Execute` mode crossed ticks are written; the caller must have
/// synced the uptime accumulators.
pub fn run_swap(
    env: &Env,
    pool: &Pool,
    token_in: &Address,
    token_out: &Address,
    amount: i128,
    kind: SwapKind,
    sqrt_price_limit: u128,
    mode: SwapMode,
) -> Result<SwapOutcome, ClmmError> {
    if amount <= 0 {
        return Err(ClmmError::InvalidSwapAmount);
    }
    let direction = resolve_direction(token_in, token_out, &pool.token0, &pool.token1)?;
    let limit = resolve_price_limit(direction, pool.current_sqrt_price, sqrt_price_limit)?;

    let state = SwapState {
        sqrt_price: pool.current_sqrt_price,
        current_tick: pool.current_tick,
        liquidity: active_liquidity(pool),
        tick_spacing: pool.tick_spacing,
        spread_factor_bps: pool.spread_factor_bps,
        token_in: token_in.clone(),
        global: growth_snapshot(env, pool.pool_id)?,
    };
    let request = SwapRequest {
        amount: amount as u128,
        kind,
        direction,
        sqrt_price_limit: limit,
    };

    let ticks = PoolTicks::new(pool.pool_id);
    Ok(compute_swap(env, &ticks, &state, &request, mode)?)
}

/// Execute a swap: update pool state and balances, move tokens, emit
pub fn execute_swap(
    env: &Env,
    sender: &Address,
    pool_id: u64,
    token_in: &Address,
    token_out: &Address,
    amount: i128,
    kind: SwapKind,
    sqrt_price_limit: u128,
    bound: AmountBound,
) -> Result<SwapResult, ClmmError> {
    let mut pool = read_pool(env, pool_id)?;
    sync_incentives(env, &mut pool)?;

    let outcome = run_swap(
        env,
        &pool,
        token_in,
        token_out,
        amount,
        kind,
        sqrt_price_limit,
        SwapMode::Execute,
    )?;
    bound.check(&outcome)?;

    let amount_in = to_i128(outcome.amount_in)?;
    let amount_out = to_i128(outcome.amount_out)?;
    let spread_charge = to_i128(outcome.spread_charge)?;

    pool.current_sqrt_price = outcome.sqrt_price;
    pool.current_tick = outcome.current_tick;
    pool.liquidity = to_i128(outcome.liquidity)?;
    write_pool(env, &pool);

    let mut accum = read_accum(env, pool_id, SPREAD_REWARD_STREAM)?;
    accum.value = outcome.spread_reward_growth.clone();
    write_accum(env, pool_id, SPREAD_REWARD_STREAM, &accum);

    let mut balances = read_balances(env, pool_id);
    credit(principal_mut(&mut balances, &pool, token_in), amount_in - spread_charge)?;
    debit(principal_mut(&mut balances, &pool, token_out), amount_out)?;
    credit_denom(&mut balances.spread_rewards, token_in, spread_charge)?;
    write_balances(env, pool_id, &balances);

    transfer_in(env, token_in, sender, amount_in);
    transfer_out(env, token_out, sender, amount_out);

    if outcome.undistributed_steps > 0 {
        events::emit_reward_truncated(
            env,
            pool_id,
            token_in,
            outcome.undistributed_steps,
            outcome.undistributed_charge,
        );
    }
    events::emit_swap(env, pool_id, sender, token_in, token_out, amount_in, amount_out, spread_charge);

    Ok(SwapResult {
        amount_in,
        amount_out,
        spread_charge,
        current_tick: pool.current_tick,
        sqrt_price: pool.current_sqrt_price,
    })
}

/// Price a swap without writing anything
pub fn quote_swap(
    env: &Env,
    pool_id: u64,
    token_in: &Address,
    token_out: &Address,
    amount: i128,
    kind: SwapKind,
) -> Result<SwapResult, ClmmError> {
    let pool = read_pool(env, pool_id)?;
    let outcome = run_swap(env, &pool, token_in, token_out, amount, kind, 0, SwapMode::Quote)?;
    Ok(SwapResult {
        amount_in: to_i128(outcome.amount_in)?,
        amount_out: to_i128(outcome.amount_out)?,
        spread_charge: to_i128(outcome.spread_charge)?,
        current_tick: outcome.current_tick,
        sqrt_price: outcome.sqrt_price,
    })
}
