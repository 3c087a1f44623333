// SPDX-License-Identifier: MIT
// Sqrt Price Calculations

use soroban_sdk::{Env, U256};
use crate::constants::{LO_64, MAX_SQRT_PRICE, MAX_TICK, MIN_SQRT_PRICE, MIN_TICK};
use crate::error::MathError;
use crate::q64::{bit_len, div_q64, div_q64_round_up, div_wide, mul_shr_128, u256_div, ONE_X64};

/// Q128 factors of 1/sqrt(1.0001)^(2^i) for i in 0..19
const TICK_FACTORS: [u128; 19] = [
    0xfffcb933bd6fad37aa2d162d1a594001,
    0xfff97272373d413259a46990580e213a,
    0xfff2e50f5f656932ef12357cf3c7fdcc,
    0xffe5caca7e10e4e61c3624eaa0941cd0,
    0xffcb9843d60f6159c9db58835c926644,
    0xff973b41fa98c081472e6896dfb254c0,
    0xff2ea16466c96a3843ec78b326b52861,
    0xfe5dee046a99a2a811c461f1969c3053,
    0xfcbe86c7900a88aedcffc83b479aa3a4,
    0xf987a7253ac413176f2b074cf7815e54,
    0xf3392b0822b70005940c7a398e4b70f3,
    0xe7159475a2c29b7443b29c7fa6e889d9,
    0xd097f3bdfd2022b8845ad8f792aa5825,
    0xa9f746462d870fdf8a65dc1f90e061e5,
    0x70d869a156d2a1b890bb3df62baf32f7,
    0x31be135f97d08fd981231505542fcfa6,
    0x9aa508b5b7a84e1c677de54f3e99bc9,
    0x5d6af8dedb81196699c329225ee604,
    0x2216e584f5fa1ea926041bedfe98,
];

/// Convert tick to sqrt price in Q64.64 format
/// Formula: sqrt(1.0001^tick) * 2^64
///
/// Negative ticks round up from the Q128 ratio; positive ticks are
/// computed as floor(2^192 / ratio).
pub fn tick_to_sqrt_price(tick: i32) -> Result<u128, MathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(MathError::TickOutOfRange);
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio: Option<u128> = None;

    for (i, factor) in TICK_FACTORS.iter().enumerate() {
        if abs_tick & (1 << i) != 0 {
            ratio = Some(match ratio {
                None => *factor,
                Some(r) => mul_shr_128(r, *factor),
            });
        }
    }

    let ratio = match ratio {
        None => return Ok(ONE_X64),
        Some(r) => r,
    };

    if tick < 0 {
        let rounded = (ratio >> 64) + u128::from(ratio & LO_64 != 0);
        Ok(rounded)
    } else {
        div_wide(1u128 << 64, 0, ratio)
            .map(|(q, _)| q)
            .ok_or(MathError::Overflow)
    }
}

/// Convert a sqrt price back to its tick
///
/// Returns the largest tick whose sqrt price is <= `sqrt_price`, so
/// `sqrt_price_to_tick(tick_to_sqrt_price(t)) == t` for every valid tick.
pub fn sqrt_price_to_tick(sqrt_price: u128) -> Result<i32, MathError> {
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price) {
        return Err(MathError::SqrtPriceOutOfRange);
    }

    let mut lo = MIN_TICK;
    let mut hi = MAX_TICK;
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if tick_to_sqrt_price(mid)? <= sqrt_price {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(lo)
}

/// Validate that a sqrt price lies within the supported bounds
#[inline]
pub fn is_valid_sqrt_price(sqrt_price: u128) -> bool {
    (MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price)
}

// ============================================================
// NEXT PRICE FROM AMOUNTS
// ============================================================

/// Price after adding or removing token0 at constant liquidity, rounded up
///
/// add:    L * 2^64 * P / (L * 2^64 + amount * P)
/// remove: L * 2^64 * P / (L * 2^64 - amount * P)
pub fn next_sqrt_price_from_amount0_rounding_up(
    env: &Env,
    sqrt_price: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<u128, MathError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    if liquidity == 0 {
        return Err(MathError::InsufficientLiquidity);
    }

    let numerator1 = U256::from_u128(env, liquidity).shl(64);
    let price = U256::from_u128(env, sqrt_price);
    let product = U256::from_u128(env, amount).mul(&price);

    if bit_len(liquidity) + 64 + bit_len(sqrt_price) <= 255 {
        let numerator = numerator1.mul(&price);
        let denominator = if add {
            numerator1.add(&product)
        } else {
            if product >= numerator1 {
                return Err(MathError::InsufficientLiquidity);
            }
            numerator1.sub(&product)
        };
        return u256_div(env, &numerator, &denominator, true).ok_or(MathError::Overflow);
    }

    // numerator1 * price would exceed 256 bits: divide first
    let per_price = numerator1.div(&price);
    let amount_256 = U256::from_u128(env, amount);
    let denominator = if add {
        per_price.add(&amount_256)
    } else {
        if amount_256 >= per_price {
            return Err(MathError::InsufficientLiquidity);
        }
        per_price.sub(&amount_256)
    };
    u256_div(env, &numerator1, &denominator, true).ok_or(MathError::Overflow)
}

/// Price after adding or removing token1 at constant liquidity, rounded down
///
/// add:    P + floor(amount * 2^64 / L)
/// remove: P - ceil(amount * 2^64 / L)
pub fn next_sqrt_price_from_amount1_rounding_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u128,
    add: bool,
) -> Result<u128, MathError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    if liquidity == 0 {
        return Err(MathError::InsufficientLiquidity);
    }

    if add {
        let quotient = div_q64(amount, liquidity).ok_or(MathError::Overflow)?;
        sqrt_price.checked_add(quotient).ok_or(MathError::Overflow)
    } else {
        let quotient = div_q64_round_up(amount, liquidity).ok_or(MathError::Overflow)?;
        if sqrt_price <= quotient {
            return Err(MathError::InsufficientLiquidity);
        }
        Ok(sqrt_price - quotient)
    }
}

/// Calculate next sqrt price given an input amount
pub fn next_sqrt_price_from_input(
    env: &Env,
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> Result<u128, MathError> {
    if zero_for_one {
        next_sqrt_price_from_amount0_rounding_up(env, sqrt_price, liquidity, amount_in, true)
    } else {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price, liquidity, amount_in, true)
    }
}

/// Calculate next sqrt price given an output amount
pub fn next_sqrt_price_from_output(
    env: &Env,
    sqrt_price: u128,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> Result<u128, MathError> {
    if zero_for_one {
        next_sqrt_price_from_amount1_rounding_down(sqrt_price, liquidity, amount_out, false)
    } else {
        next_sqrt_price_from_amount0_rounding_up(env, sqrt_price, liquidity, amount_out, false)
    }
}
