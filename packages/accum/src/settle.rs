// Accumulator Position Settlement
//
// A position earns (growth_inside - value_at_last_update) * shares for
// every denom. The product is Q64.64: the integer part becomes claimable
// and the fractional part is carried as dust.

use soroban_sdk::{Address, Env, Map};
use tidal_math::{full_mul, LO_64};
use crate::error::AccumError;
use crate::growth::{growth_add_assign, growth_per_liquidity, growth_sub, GrowthDelta};
use crate::types::{AccumPosition, AccumulatorRecord, ScaledReward};

#[inline]
fn scaled_product(delta: u128, shares: u128) -> Result<ScaledReward, AccumError> {
    let (hi, lo) = full_mul(delta, shares);
    if hi >> 64 != 0 {
        return Err(AccumError::Overflow);
    }
    Ok(ScaledReward {
        amount: (hi << 64) | (lo >> 64),
        dust: (lo & LO_64) as u64,
    })
}

#[inline]
fn accrue(current: ScaledReward, extra: ScaledReward) -> Result<ScaledReward, AccumError> {
    let dust_sum = current.dust as u128 + extra.dust as u128;
    let amount = current
        .amount
        .checked_add(extra.amount)
        .and_then(|a| a.checked_add(dust_sum >> 64))
        .ok_or(AccumError::Overflow)?;
    Ok(ScaledReward {
        amount,
        dust: dust_sum as u64,
    })
}

/// Move rewards accrued since the last update into `unclaimed` and
/// snapshot `growth_inside`
pub fn settle_pending(
    env: &Env,
    position: &mut AccumPosition,
    growth_inside: &Map<Address, u128>,
) -> Result<(), AccumError> {
    if position.shares > 0 {
        let deltas = growth_sub(env, growth_inside, &position.value_at_last_update);
        for (token, delta) in deltas.iter() {
            let pending = scaled_product(delta, position.shares)?;
            if pending == ScaledReward::default() {
                continue;
            }
            let current = position.unclaimed.get(token.clone()).unwrap_or_default();
            position.unclaimed.set(token, accrue(current, pending)?);
        }
    }
    position.value_at_last_update = growth_inside.clone();
    Ok(())
}

/// Create a position record, or settle an existing one and apply a
/// liquidity delta
///
/// New records require a positive delta and start with
/// `value_at_last_update = growth_inside` so they earn nothing accrued
/// before they existed.
pub fn init_or_update_position(
    env: &Env,
    accum: &mut AccumulatorRecord,
    existing: Option<AccumPosition>,
    liquidity_delta: i128,
    growth_inside: &Map<Address, u128>,
) -> Result<AccumPosition, AccumError> {
    let mut position = match existing {
        None => {
            if liquidity_delta <= 0 {
                return Err(AccumError::NonPositiveLiquidityForNewPosition);
            }
            AccumPosition {
                shares: 0,
                value_at_last_update: growth_inside.clone(),
                unclaimed: Map::new(env),
            }
        }
        Some(mut position) => {
            settle_pending(env, &mut position, growth_inside)?;
            position
        }
    };

    let magnitude = liquidity_delta.unsigned_abs();
    if liquidity_delta >= 0 {
        position.shares = position.shares.checked_add(magnitude).ok_or(AccumError::Overflow)?;
        accum.total_shares = accum.total_shares.checked_add(magnitude).ok_or(AccumError::Overflow)?;
    } else {
        if magnitude > position.shares {
            return Err(AccumError::InsufficientShares);
        }
        position.shares -= magnitude;
        accum.total_shares = accum.total_shares.saturating_sub(magnitude);
    }

    Ok(position)
}

/// Settle and pay out the whole-unit rewards of a position
///
/// Each denom's leftover dust is spread back over the accumulator's
/// total shares, or dropped when there are none.
pub fn claim_rewards(
    env: &Env,
    accum: &mut AccumulatorRecord,
    position: &mut AccumPosition,
    growth_inside: &Map<Address, u128>,
) -> Result<Map<Address, u128>, AccumError> {
    settle_pending(env, position, growth_inside)?;

    let mut payout: Map<Address, u128> = Map::new(env);
    for (token, reward) in position.unclaimed.iter() {
        if reward.amount > 0 {
            payout.set(token.clone(), reward.amount);
        }
        if reward.dust > 0 && accum.total_shares > 0 {
            growth_add_assign(&mut accum.value, &token, reward.dust as u128 / accum.total_shares);
        }
    }
    position.unclaimed = Map::new(env);

    Ok(payout)
}

/// Add growth for `token` to the accumulator value
#[inline]
pub fn add_to_accumulator(accum: &mut AccumulatorRecord, token: &Address, growth_delta: u128) {
    growth_add_assign(&mut accum.value, token, growth_delta);
}

/// Spread `amount` of `token` over `liquidity` as new growth
///
/// Returns the conversion outcome; the accumulator is only touched for
/// `GrowthDelta::Value`.
pub fn redeposit(
    accum: &mut AccumulatorRecord,
    token: &Address,
    amount: u128,
    liquidity: u128,
) -> GrowthDelta {
    let outcome = growth_per_liquidity(amount, liquidity);
    if let GrowthDelta::Value(delta) = outcome {
        add_to_accumulator(accum, token, delta);
    }
    outcome
}
