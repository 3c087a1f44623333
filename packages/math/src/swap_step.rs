// SPDX-License-Identifier: MIT
// Single Swap Step Within One Liquidity Segment

use soroban_sdk::Env;
use crate::constants::BPS_DENOMINATOR;
use crate::error::MathError;
use crate::liquidity::{amount0_delta, amount1_delta};
use crate::q64::{mul_div, mul_div_round_up};
use crate::sqrt_price::{next_sqrt_price_from_input, next_sqrt_price_from_output};

/// Result of one bounded swap step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapStep {
    /// Price reached by the step
    pub sqrt_price_next: u128,
    /// Token-in consumed, excluding the spread charge
    pub amount_in: u128,
    /// Token-out produced
    pub amount_out: u128,
    /// Spread charge taken in token-in
    pub spread_charge: u128,
}

/// Spread charged on top of `amount_in`: ceil(amount_in * sf / (BPS - sf))
#[inline]
fn spread_on_amount_in(amount_in: u128, spread_factor_bps: u32) -> Result<u128, MathError> {
    if spread_factor_bps == 0 {
        return Ok(0);
    }
    mul_div_round_up(
        amount_in,
        spread_factor_bps as u128,
        (BPS_DENOMINATOR - spread_factor_bps) as u128,
    )
    .ok_or(MathError::Overflow)
}

/// Swap step where the remaining amount is token-in
///
/// The spread factor is deducted from `amount_remaining` before solving for
/// the next price. When the step stops short of the target the whole
/// remainder not converted into `amount_in` becomes the spread charge.
pub fn compute_swap_step_exact_in(
    env: &Env,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_remaining: u128,
    spread_factor_bps: u32,
) -> Result<SwapStep, MathError> {
    if spread_factor_bps >= BPS_DENOMINATOR {
        return Err(MathError::InvalidSpreadFactor);
    }
    let zero_for_one = sqrt_price_target <= sqrt_price_current;

    let remaining_less_fee = mul_div(
        amount_remaining,
        (BPS_DENOMINATOR - spread_factor_bps) as u128,
        BPS_DENOMINATOR as u128,
    )
    .ok_or(MathError::Overflow)?;

    let amount_to_target = if zero_for_one {
        amount0_delta(env, liquidity, sqrt_price_target, sqrt_price_current, true)?
    } else {
        amount1_delta(liquidity, sqrt_price_current, sqrt_price_target, true)?
    };

    let sqrt_price_next = if remaining_less_fee >= amount_to_target {
        sqrt_price_target
    } else {
        next_sqrt_price_from_input(env, sqrt_price_current, liquidity, remaining_less_fee, zero_for_one)?
    };
    let reached_target = sqrt_price_next == sqrt_price_target;

    let amount_in = if reached_target {
        amount_to_target
    } else if zero_for_one {
        amount0_delta(env, liquidity, sqrt_price_next, sqrt_price_current, true)?
    } else {
        amount1_delta(liquidity, sqrt_price_current, sqrt_price_next, true)?
    }
    .min(amount_remaining);

    let amount_out = if zero_for_one {
        amount1_delta(liquidity, sqrt_price_next, sqrt_price_current, false)?
    } else {
        amount0_delta(env, liquidity, sqrt_price_current, sqrt_price_next, false)?
    };

    let headroom = amount_remaining - amount_in;
    let spread_charge = if reached_target {
        spread_on_amount_in(amount_in, spread_factor_bps)?.min(headroom)
    } else {
        headroom
    };

    Ok(SwapStep {
        sqrt_price_next,
        amount_in,
        amount_out,
        spread_charge,
    })
}

/// Swap step where the remaining amount is token-out
///
/// The spread charge is always levied on top of the computed input.
pub fn compute_swap_step_exact_out(
    env: &Env,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_remaining: u128,
    spread_factor_bps: u32,
) -> Result<SwapStep, MathError> {
    if spread_factor_bps >= BPS_DENOMINATOR {
        return Err(MathError::InvalidSpreadFactor);
    }
    let zero_for_one = sqrt_price_target <= sqrt_price_current;

    let amount_out_to_target = if zero_for_one {
        amount1_delta(liquidity, sqrt_price_target, sqrt_price_current, false)?
    } else {
        amount0_delta(env, liquidity, sqrt_price_current, sqrt_price_target, false)?
    };

    let sqrt_price_next = if amount_remaining >= amount_out_to_target {
        sqrt_price_target
    } else {
        next_sqrt_price_from_output(env, sqrt_price_current, liquidity, amount_remaining, zero_for_one)?
    };
    let reached_target = sqrt_price_next == sqrt_price_target;

    let amount_in = if zero_for_one {
        amount0_delta(env, liquidity, sqrt_price_next, sqrt_price_current, true)?
    } else {
        amount1_delta(liquidity, sqrt_price_current, sqrt_price_next, true)?
    };

    let amount_out = if reached_target {
        amount_out_to_target
    } else if zero_for_one {
        amount1_delta(liquidity, sqrt_price_next, sqrt_price_current, false)?
    } else {
        amount0_delta(env, liquidity, sqrt_price_current, sqrt_price_next, false)?
    }
    .min(amount_remaining);

    let spread_charge = spread_on_amount_in(amount_in, spread_factor_bps)?;

    Ok(SwapStep {
        sqrt_price_next,
        amount_in,
        amount_out,
        spread_charge,
    })
}
