// SPDX-License-Identifier: MIT
// Liquidity and Amount Calculations

use soroban_sdk::{Env, U256};
use crate::constants::LO_64;
use crate::error::MathError;
use crate::q64::{bit_len, div_wide, full_mul, shl64_div, u256_div};
use crate::sqrt_price::tick_to_sqrt_price;

#[inline]
fn ordered(a: u128, b: u128) -> (u128, u128) {
    if a < b { (a, b) } else { (b, a) }
}

/// Token0 amount spanned by `liquidity` between two sqrt prices
///
/// amount0 = L * (sqrt_b - sqrt_a) * 2^64 / (sqrt_a * sqrt_b)
pub fn amount0_delta(
    env: &Env,
    liquidity: u128,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_price_a, sqrt_price_b);
    if sqrt_lower == 0 {
        return Err(MathError::DivisionByZero);
    }
    if liquidity == 0 || sqrt_lower == sqrt_upper {
        return Ok(0);
    }

    let numerator = U256::from_u128(env, liquidity).mul(&U256::from_u128(env, sqrt_upper - sqrt_lower));
    let denominator = U256::from_u128(env, sqrt_lower).mul(&U256::from_u128(env, sqrt_upper));

    shl64_div(env, &numerator, &denominator, round_up).ok_or(MathError::Overflow)
}

/// Token1 amount spanned by `liquidity` between two sqrt prices
///
/// amount1 = L * (sqrt_b - sqrt_a) / 2^64
pub fn amount1_delta(
    liquidity: u128,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_price_a, sqrt_price_b);

    let (hi, lo) = full_mul(liquidity, sqrt_upper - sqrt_lower);
    if hi >> 64 != 0 {
        return Err(MathError::Overflow);
    }
    let floor = (hi << 64) | (lo >> 64);

    if round_up && lo & LO_64 != 0 {
        floor.checked_add(1).ok_or(MathError::Overflow)
    } else {
        Ok(floor)
    }
}

/// Liquidity provided by `amount0` over a price range, rounded down
///
/// L = amount0 * sqrt_a * sqrt_b / ((sqrt_b - sqrt_a) * 2^64)
pub fn liquidity0(
    env: &Env,
    amount0: u128,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_price_a, sqrt_price_b);
    if sqrt_lower == sqrt_upper {
        return Err(MathError::DivisionByZero);
    }

    let diff = U256::from_u128(env, sqrt_upper - sqrt_lower);
    let product = U256::from_u128(env, sqrt_lower).mul(&U256::from_u128(env, sqrt_upper));
    let amount = U256::from_u128(env, amount0);

    let bits = bit_len(amount0) + bit_len(sqrt_lower) + bit_len(sqrt_upper);
    if bits <= 256 {
        let numerator = amount.mul(&product);
        let denominator = diff.shl(64);
        return u256_div(env, &numerator, &denominator, false).ok_or(MathError::Overflow);
    }
    if bits - 64 > 256 {
        return Err(MathError::Overflow);
    }

    // Scale the price product down first; the product of three terms overflows
    let numerator = amount.mul(&product.shr(64));
    u256_div(env, &numerator, &diff, false).ok_or(MathError::Overflow)
}

/// Liquidity provided by `amount1` over a price range, rounded down
///
/// L = amount1 * 2^64 / (sqrt_b - sqrt_a)
pub fn liquidity1(amount1: u128, sqrt_price_a: u128, sqrt_price_b: u128) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_price_a, sqrt_price_b);
    if sqrt_lower == sqrt_upper {
        return Err(MathError::DivisionByZero);
    }

    div_wide(amount1 >> 64, amount1 << 64, sqrt_upper - sqrt_lower)
        .map(|(q, _)| q)
        .ok_or(MathError::Overflow)
}

/// Liquidity obtainable from both token amounts at the current price
///
/// Below the range only token0 counts, above it only token1; inside the
/// range the smaller of the two single-sided estimates wins.
pub fn liquidity_from_amounts(
    env: &Env,
    sqrt_price_current: u128,
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    amount0: u128,
    amount1: u128,
) -> Result<u128, MathError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_price_a, sqrt_price_b);

    if sqrt_price_current <= sqrt_lower {
        liquidity0(env, amount0, sqrt_lower, sqrt_upper)
    } else if sqrt_price_current < sqrt_upper {
        let liq0 = liquidity0(env, amount0, sqrt_price_current, sqrt_upper)?;
        let liq1 = liquidity1(amount1, sqrt_lower, sqrt_price_current)?;
        Ok(liq0.min(liq1))
    } else {
        liquidity1(amount1, sqrt_lower, sqrt_upper)
    }
}

/// Token amounts represented by `liquidity` in a tick range
///
/// The active side is decided on ticks, not prices: a range whose lower
/// tick is above the current tick holds only token0, a range whose upper
/// tick is at or below it holds only token1. Deposits round up and
/// withdrawals round down.
pub fn amounts_for_liquidity(
    env: &Env,
    current_tick: i32,
    sqrt_price_current: u128,
    lower_tick: i32,
    upper_tick: i32,
    liquidity: u128,
    round_up: bool,
) -> Result<(u128, u128), MathError> {
    let sqrt_lower = tick_to_sqrt_price(lower_tick)?;
    let sqrt_upper = tick_to_sqrt_price(upper_tick)?;

    if current_tick < lower_tick {
        let amount0 = amount0_delta(env, liquidity, sqrt_lower, sqrt_upper, round_up)?;
        Ok((amount0, 0))
    } else if current_tick < upper_tick {
        let price = sqrt_price_current.clamp(sqrt_lower, sqrt_upper);
        let amount0 = amount0_delta(env, liquidity, price, sqrt_upper, round_up)?;
        let amount1 = amount1_delta(liquidity, sqrt_lower, price, round_up)?;
        Ok((amount0, amount1))
    } else {
        let amount1 = amount1_delta(liquidity, sqrt_lower, sqrt_upper, round_up)?;
        Ok((0, amount1))
    }
}
