// Per-denom growth vectors
//
// A growth vector maps a denom to a Q64.64 growth-per-liquidity value.
// All arithmetic wraps modulo 2^128; only differences are meaningful.

use soroban_sdk::{Address, Env, Map};
use tidal_math::div_q64;

/// Growth for `token`, zero when absent
#[inline]
pub fn growth_get(growth: &Map<Address, u128>, token: &Address) -> u128 {
    growth.get(token.clone()).unwrap_or(0)
}

/// growth[token] += delta (wrapping)
pub fn growth_add_assign(growth: &mut Map<Address, u128>, token: &Address, delta: u128) {
    if delta == 0 {
        return;
    }
    let current = growth_get(growth, token);
    growth.set(token.clone(), current.wrapping_add(delta));
}

/// Element-wise `a - b` (wrapping); zero entries are dropped
pub fn growth_sub(env: &Env, a: &Map<Address, u128>, b: &Map<Address, u128>) -> Map<Address, u128> {
    let mut out: Map<Address, u128> = Map::new(env);
    for (token, value) in a.iter() {
        let diff = value.wrapping_sub(b.get(token.clone()).unwrap_or(0));
        if diff != 0 {
            out.set(token, diff);
        }
    }
    for (token, value) in b.iter() {
        if !a.contains_key(token.clone()) {
            let diff = 0u128.wrapping_sub(value);
            if diff != 0 {
                out.set(token, diff);
            }
        }
    }
    out
}

/// Outcome of converting an amount into growth per unit of liquidity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthDelta {
    /// amount * 2^64 / liquidity
    Value(u128),
    /// Positive amount that truncates to zero growth
    Truncated,
    /// Growth does not fit in 128 bits
    Overflow,
    /// No liquidity to distribute to
    NoLiquidity,
}

/// Growth added when `amount` is spread over `liquidity`, truncated
pub fn growth_per_liquidity(amount: u128, liquidity: u128) -> GrowthDelta {
    if liquidity == 0 {
        return GrowthDelta::NoLiquidity;
    }
    match div_q64(amount, liquidity) {
        None => GrowthDelta::Overflow,
        Some(0) if amount > 0 => GrowthDelta::Truncated,
        Some(value) => GrowthDelta::Value(value),
    }
}
