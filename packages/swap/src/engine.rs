use soroban_sdk::Env;
use tidal_accum::{growth_add_assign, growth_per_liquidity, GrowthDelta};
use tidal_math::{
    compute_swap_step_exact_in, compute_swap_step_exact_out, sqrt_price_to_tick,
    tick_to_sqrt_price, MathError, MAX_SWAP_ITERATIONS,
};
use tidal_tick::{cross_tick, get_tick, next_initialized_tick, TickStore};
use crate::direction::SwapDirection;
use crate::error::SwapError;
use crate::types::{SwapKind, SwapMode, SwapOutcome, SwapRequest, SwapState};

// ============================================================
// SWAP LOOP
// ============================================================

/// Run a swap against the pool's tick set
///
/// Each iteration walks the price toward the next initialized tick in the
/// swap direction, clamped to the request's limit. Spread charges accrue
/// into the token-in spread reward growth of the active liquidity. In
/// `Execute` mode every crossed tick is flipped and written once; in
/// `Quote` mode ticks are only read.
///
/// The request's limit must already be resolved (see
/// `resolve_price_limit`). Exact-in stops early when the limit is hit;
/// exact-out fails with `InsufficientLiquidity` if the full amount cannot
/// be delivered.
pub fn compute_swap<S: TickStore>(
    env: &Env,
    store: &S,
    state: &SwapState,
    request: &SwapRequest,
    mode: SwapMode,
) -> Result<SwapOutcome, SwapError> {
    if request.amount == 0 {
        return Err(SwapError::ZeroAmount);
    }
    let direction = request.direction;
    let limit = request.sqrt_price_limit;
    if !direction.is_valid_limit(state.sqrt_price, limit) {
        return Err(SwapError::PriceLimitOutOfRange);
    }

    let mut global = state.global.clone();
    let mut sqrt_price = state.sqrt_price;
    let mut current_tick = state.current_tick;
    let mut liquidity = i128::try_from(state.liquidity).map_err(|_| MathError::Overflow)?;

    let mut remaining = request.amount;
    let mut amount_in_total: u128 = 0;
    let mut amount_out_total: u128 = 0;
    let mut spread_charge_total: u128 = 0;
    let mut ticks_crossed: u32 = 0;
    let mut undistributed_steps: u32 = 0;
    let mut undistributed_charge: u128 = 0;
    let mut iterations: u32 = 0;

    while remaining > 0 && sqrt_price != limit {
        if iterations == MAX_SWAP_ITERATIONS {
            return Err(SwapError::MaxIterationsExceeded);
        }
        iterations += 1;

        let next_tick = next_initialized_tick(env, store, current_tick, state.tick_spacing, direction)
            .ok_or(SwapError::InsufficientLiquidity)?;
        let tick_price = tick_to_sqrt_price(next_tick)?;
        let target = direction.clamp_target(tick_price, limit);
        let active = liquidity as u128;

        let step = match request.kind {
            SwapKind::ExactIn => compute_swap_step_exact_in(
                env,
                sqrt_price,
                target,
                active,
                remaining,
                state.spread_factor_bps,
            )?,
            SwapKind::ExactOut => compute_swap_step_exact_out(
                env,
                sqrt_price,
                target,
                active,
                remaining,
                state.spread_factor_bps,
            )?,
        };

        let step_in = step
            .amount_in
            .checked_add(step.spread_charge)
            .ok_or(MathError::Overflow)?;
        remaining = match request.kind {
            SwapKind::ExactIn => remaining.checked_sub(step_in),
            SwapKind::ExactOut => remaining.checked_sub(step.amount_out),
        }
        .ok_or(MathError::Overflow)?;
        amount_in_total = amount_in_total.checked_add(step_in).ok_or(MathError::Overflow)?;
        amount_out_total = amount_out_total
            .checked_add(step.amount_out)
            .ok_or(MathError::Overflow)?;
        spread_charge_total = spread_charge_total
            .checked_add(step.spread_charge)
            .ok_or(MathError::Overflow)?;

        if step.spread_charge > 0 {
            match growth_per_liquidity(step.spread_charge, active) {
                GrowthDelta::Value(delta) => {
                    growth_add_assign(&mut global.spread_reward, &state.token_in, delta);
                }
                GrowthDelta::Truncated | GrowthDelta::Overflow | GrowthDelta::NoLiquidity => {
                    undistributed_steps += 1;
                    undistributed_charge = undistributed_charge.saturating_add(step.spread_charge);
                }
            }
        }

        if step.sqrt_price_next == tick_price {
            let liquidity_net = match mode {
                SwapMode::Execute => cross_tick(env, store, next_tick, &global)?,
                SwapMode::Quote => get_tick(env, store, next_tick)?.liquidity_net,
            };
            let (crossed_liquidity, crossed_tick) = direction.cross(liquidity, liquidity_net, next_tick)?;
            if crossed_liquidity < 0 {
                return Err(SwapError::LiquidityUnderflow);
            }
            liquidity = crossed_liquidity;
            current_tick = crossed_tick;
            ticks_crossed += 1;
        } else if step.sqrt_price_next != sqrt_price {
            let recovered = sqrt_price_to_tick(step.sqrt_price_next)?;
            current_tick = direction.settle_tick(recovered, current_tick);
        } else if step_in == 0 && step.amount_out == 0 {
            return Err(SwapError::SwapNoProgress);
        }

        sqrt_price = step.sqrt_price_next;
    }

    if request.kind == SwapKind::ExactOut && remaining > 0 {
        return Err(SwapError::InsufficientLiquidity);
    }

    Ok(SwapOutcome {
        amount_in: amount_in_total,
        amount_out: amount_out_total,
        spread_charge: spread_charge_total,
        sqrt_price,
        current_tick,
        liquidity: liquidity as u128,
        spread_reward_growth: global.spread_reward,
        ticks_crossed,
        undistributed_steps,
        undistributed_charge,
    })
}
