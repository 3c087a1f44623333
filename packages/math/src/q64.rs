// SPDX-License-Identifier: MIT
// Q64.64 Fixed-Point and Wide Integer Arithmetic

use soroban_sdk::{Env, U256};
use crate::constants::{LO_64, Q64};

pub const ONE_X64: u128 = Q64;

/// Full 256-bit product of two u128 values, returned as (hi, lo)
/// Uses 64-bit limb decomposition so no intermediate overflows
#[inline]
pub fn full_mul(a: u128, b: u128) -> (u128, u128) {
    let a_hi = a >> 64;
    let a_lo = a & LO_64;
    let b_hi = b >> 64;
    let b_lo = b & LO_64;

    let term_ll = a_lo * b_lo;
    let term_lh = a_lo * b_hi;
    let term_hl = a_hi * b_lo;
    let term_hh = a_hi * b_hi;

    let mid = (term_ll >> 64) + (term_lh & LO_64) + (term_hl & LO_64);
    let lo = (mid << 64) | (term_ll & LO_64);
    let hi = term_hh + (term_lh >> 64) + (term_hl >> 64) + (mid >> 64);

    (hi, lo)
}

/// (a * b) >> 128, floored
#[inline]
pub fn mul_shr_128(a: u128, b: u128) -> u128 {
    full_mul(a, b).0
}

/// Divide the 256-bit value `hi:lo` by `den`
///
/// Returns `(quotient, remainder)`, or `None` when the quotient does not
/// fit in 128 bits (which includes `den == 0`).
pub fn div_wide(hi: u128, lo: u128, den: u128) -> Option<(u128, u128)> {
    if hi >= den {
        return None;
    }
    if hi == 0 {
        return Some((lo / den, lo % den));
    }

    let mut rem = hi;
    let mut quotient: u128 = 0;
    for i in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> i) & 1);
        quotient <<= 1;
        if carry == 1 || rem >= den {
            rem = rem.wrapping_sub(den);
            quotient |= 1;
        }
    }
    Some((quotient, rem))
}

/// Multiply two Q64.64 numbers, returning a floored Q64.64 result
#[inline]
pub fn mul_q64(a: u128, b: u128) -> Option<u128> {
    let (hi, lo) = full_mul(a, b);
    if hi >> 64 != 0 {
        return None;
    }
    Some((hi << 64) | (lo >> 64))
}

/// Divide in Q64.64 format: floor((a * 2^64) / b)
#[inline]
pub fn div_q64(a: u128, b: u128) -> Option<u128> {
    div_wide(a >> 64, a << 64, b).map(|(q, _)| q)
}

/// Divide in Q64.64 format: ceil((a * 2^64) / b)
#[inline]
pub fn div_q64_round_up(a: u128, b: u128) -> Option<u128> {
    let (q, rem) = div_wide(a >> 64, a << 64, b)?;
    if rem != 0 { q.checked_add(1) } else { Some(q) }
}

/// floor(a * b / denominator) without intermediate overflow
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Option<u128> {
    let (hi, lo) = full_mul(a, b);
    div_wide(hi, lo, denominator).map(|(q, _)| q)
}

/// ceil(a * b / denominator) without intermediate overflow
pub fn mul_div_round_up(a: u128, b: u128, denominator: u128) -> Option<u128> {
    let (hi, lo) = full_mul(a, b);
    let (q, rem) = div_wide(hi, lo, denominator)?;
    if rem != 0 { q.checked_add(1) } else { Some(q) }
}

/// Divide with rounding up
#[inline]
pub fn div_round_up(numerator: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let result = numerator / denominator;
    if numerator % denominator != 0 {
        result.checked_add(1)
    } else {
        Some(result)
    }
}

/// Number of significant bits in `x`
#[inline]
pub fn bit_len(x: u128) -> u32 {
    128 - x.leading_zeros()
}

// ============================================================
// U256 HELPERS
// ============================================================

/// floor or ceil of `num * 2^64 / den` using host 256-bit integers
///
/// `den` must be below 2^192 so the shifted remainder never exceeds
/// 256 bits. Returns `None` when `den` is zero or the result does not
/// fit in 128 bits.
pub fn shl64_div(env: &Env, num: &U256, den: &U256, round_up: bool) -> Option<u128> {
    let zero = U256::from_u32(env, 0);
    if *den == zero {
        return None;
    }

    let q1 = num.div(den);
    let q1_small = q1.to_u128()?;
    if q1_small > LO_64 {
        return None;
    }
    let r1 = num.sub(&q1.mul(den));

    let shifted = r1.shl(64);
    let q2 = shifted.div(den);
    let r2 = shifted.sub(&q2.mul(den));
    let q2_small = q2.to_u128()?;

    let result = (q1_small << 64).checked_add(q2_small)?;
    if round_up && r2 != zero {
        result.checked_add(1)
    } else {
        Some(result)
    }
}

/// floor or ceil of `num / den` using host 256-bit integers
pub fn u256_div(env: &Env, num: &U256, den: &U256, round_up: bool) -> Option<u128> {
    let zero = U256::from_u32(env, 0);
    if *den == zero {
        return None;
    }
    let q = num.div(den);
    let rem = num.sub(&q.mul(den));
    let q_small = q.to_u128()?;
    if round_up && rem != zero {
        q_small.checked_add(1)
    } else {
        Some(q_small)
    }
}
