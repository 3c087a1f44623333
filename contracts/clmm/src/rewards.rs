// Spread reward and incentive claims

use soroban_sdk::{Address, Env, Map, Vec};
use tidal_accum::{claim_rewards, growth_add_assign, redeposit, AccumPosition, AccumulatorRecord, GrowthDelta};
use tidal_incentives::{
    is_forfeited, sync_uptime_accumulators, uptime_stream, IncentiveRecord, NUM_UPTIMES,
    SPREAD_REWARD_STREAM,
};
use tidal_position::{is_active, Position};
use tidal_tick::{spread_reward_growth_inside, uptime_growth_inside};

use crate::error::ClmmError;
use crate::events;
use crate::pool::{debit_denom, read_uptime_accums, to_i128, transfer_out_all};
use crate::storage::*;
use crate::types::{IncentivesCollected, Pool};

/// Uptime accumulators and the incentive records feeding them
pub struct UptimeState {
    pub records: Vec<IncentiveRecord>,
    pub accums: Vec<AccumulatorRecord>,
}

impl UptimeState {
    fn globals(&self, env: &Env) -> Vec<Map<Address, u128>> {
        let mut out = Vec::new(env);
        for accum in self.accums.iter() {
            out.push_back(accum.value);
        }
        out
    }
}

#[inline]
pub fn active_liquidity(pool: &Pool) -> u128 {
    pool.liquidity.max(0) as u128
}

// ============================================================
// UPTIME SYNC
// ============================================================

/// Uptime accumulators brought up to `now`, without writing them
///
/// `report` publishes emission anomalies as telemetry.
pub fn synced_uptime(env: &Env, pool: &Pool, now: u64, report: bool) -> Result<UptimeState, ClmmError> {
    let mut state = UptimeState {
        records: read_pool_incentives(env, pool.pool_id)?,
        accums: read_uptime_accums(env, pool.pool_id)?,
    };
    sync_uptime_accumulators(
        &mut state.records,
        &mut state.accums,
        active_liquidity(pool),
        pool.last_liquidity_update,
        now,
        |anomaly| {
            if report {
                events::emit_emission_anomaly(env, pool.pool_id, anomaly);
            }
        },
    )?;
    Ok(state)
}

/// Bring the uptime accumulators up to the ledger time and persist them
///
/// Sets `pool.last_liquidity_update`; the caller writes the pool.
pub fn sync_incentives(env: &Env, pool: &mut Pool) -> Result<UptimeState, ClmmError> {
    let now = env.ledger().timestamp();
    let state = synced_uptime(env, pool, now, true)?;
    if now > pool.last_liquidity_update {
        for record in state.records.iter() {
            write_incentive(env, &record);
        }
        for (tier, accum) in state.accums.iter().enumerate() {
            write_accum(env, pool.pool_id, uptime_stream(tier as u32), &accum);
        }
        pool.last_liquidity_update = now;
    }
    Ok(state)
}

// ============================================================
// SPREAD REWARDS
// ============================================================

/// Settled spread rewards of a position and the records to store
pub struct SpreadClaim {
    pub accum: AccumulatorRecord,
    pub record: AccumPosition,
    pub payout: Map<Address, u128>,
}

/// Claim spread rewards on loaded copies; nothing is written
pub fn claim_spread_rewards(env: &Env, pool: &Pool, position: &Position) -> Result<SpreadClaim, ClmmError> {
    let mut accum = read_accum(env, pool.pool_id, SPREAD_REWARD_STREAM)?;
    let mut record = read_accum_position(env, pool.pool_id, SPREAD_REWARD_STREAM, position.position_id)
        .ok_or(ClmmError::PositionNotFound)?;

    // An emptied position has nothing pending and its ticks may be gone
    let inside = if position.liquidity == 0 {
        record.value_at_last_update.clone()
    } else {
        spread_reward_growth_inside(
            env,
            &PoolTicks::new(pool.pool_id),
            position.lower_tick,
            position.upper_tick,
            pool.current_tick,
            &accum.value,
        )?
    };
    let payout = claim_rewards(env, &mut accum, &mut record, &inside)?;

    Ok(SpreadClaim { accum, record, payout })
}

/// Claim, pay out and record the spread rewards of a position
pub fn collect_spread_rewards(
    env: &Env,
    pool: &Pool,
    position: &Position,
) -> Result<Map<Address, i128>, ClmmError> {
    let claim = claim_spread_rewards(env, pool, position)?;
    write_accum(env, pool.pool_id, SPREAD_REWARD_STREAM, &claim.accum);
    write_accum_position(env, pool.pool_id, SPREAD_REWARD_STREAM, position.position_id, &claim.record);

    let mut balances = read_balances(env, pool.pool_id);
    let mut paid = Map::new(env);
    for (token, amount) in claim.payout.iter() {
        let amount = to_i128(amount)?;
        debit_denom(&mut balances.spread_rewards, &token, amount)?;
        paid.set(token, amount);
    }
    write_balances(env, pool.pool_id, &balances);

    transfer_out_all(env, &position.owner, &paid);
    events::emit_spread_rewards_collected(env, pool.pool_id, position.position_id, &position.owner, &paid);
    Ok(paid)
}

// ============================================================
// INCENTIVES
// ============================================================

/// Settled incentives of a position and the records to store
pub struct IncentiveClaim {
    pub collected: Map<Address, i128>,
    pub forfeited: Map<Address, i128>,
    /// Forfeited amounts no other liquidity could take; paid to the owner
    pub returned: Map<Address, i128>,
    /// Updated record for each uptime tier
    pub records: Vec<AccumPosition>,
}

impl IncentiveClaim {
    /// Everything the owner is paid
    pub fn payout(&self) -> Result<Map<Address, i128>, ClmmError> {
        let mut out = self.collected.clone();
        for (token, amount) in self.returned.iter() {
            add_amount(&mut out, &token, amount)?;
        }
        Ok(out)
    }
}

fn add_amount(amounts: &mut Map<Address, i128>, token: &Address, amount: i128) -> Result<(), ClmmError> {
    let total = amounts
        .get(token.clone())
        .unwrap_or(0)
        .checked_add(amount)
        .ok_or(ClmmError::MathOverflow)?;
    amounts.set(token.clone(), total);
    Ok(())
}

/// Claim the incentives of a position against synced accumulators
///
/// Tiers the position has not been alive long enough for are forfeited.
/// A forfeited amount is redeposited as growth over the active liquidity
/// of the other positions, and the position's own record is moved past
/// that growth so it never earns its forfeit back. When no other active
/// liquidity exists, or the growth would truncate or overflow, the amount
/// is returned to the owner. `state.accums` is updated in place; nothing
/// is written.
pub fn claim_incentives(
    env: &Env,
    pool: &Pool,
    position: &Position,
    state: &mut UptimeState,
    now: u64,
    report: bool,
) -> Result<IncentiveClaim, ClmmError> {
    let ticks = PoolTicks::new(pool.pool_id);
    let inside = uptime_growth_inside(
        env,
        &ticks,
        position.lower_tick,
        position.upper_tick,
        pool.current_tick,
        &state.globals(env),
    )?;
    let age = position.age(now);
    let in_range = is_active(position, pool.current_tick);
    let own = if in_range { position.liquidity.max(0) as u128 } else { 0 };
    let others = active_liquidity(pool).saturating_sub(own);

    let mut claim = IncentiveClaim {
        collected: Map::new(env),
        forfeited: Map::new(env),
        returned: Map::new(env),
        records: Vec::new(env),
    };

    for tier in 0..NUM_UPTIMES {
        let stream = uptime_stream(tier);
        let mut accum = state.accums.get(tier).ok_or(ClmmError::AccumDoesNotExist)?;
        let mut record = read_accum_position(env, pool.pool_id, stream, position.position_id)
            .ok_or(ClmmError::PositionNotFound)?;
        let tier_inside = inside.get(tier).unwrap_or_else(|| Map::new(env));

        let payout = claim_rewards(env, &mut accum, &mut record, &tier_inside)?;
        let forfeit = is_forfeited(age, tier);

        for (token, amount) in payout.iter() {
            let value = to_i128(amount)?;
            if !forfeit {
                add_amount(&mut claim.collected, &token, value)?;
                continue;
            }
            add_amount(&mut claim.forfeited, &token, value)?;
            match redeposit(&mut accum, &token, amount, others) {
                GrowthDelta::Value(delta) => {
                    if in_range {
                        growth_add_assign(&mut record.value_at_last_update, &token, delta);
                    }
                }
                GrowthDelta::NoLiquidity => add_amount(&mut claim.returned, &token, value)?,
                GrowthDelta::Truncated | GrowthDelta::Overflow => {
                    if report {
                        events::emit_forfeit_truncated(env, pool.pool_id, &token, tier, amount);
                    }
                    add_amount(&mut claim.returned, &token, value)?;
                }
            }
        }

        state.accums.set(tier, accum);
        claim.records.push_back(record);
    }

    Ok(claim)
}

/// Sync, claim, pay out and record the incentives of a position
///
/// Writes the pool.
pub fn collect_incentives(
    env: &Env,
    pool: &mut Pool,
    position: &Position,
) -> Result<IncentivesCollected, ClmmError> {
    let mut state = sync_incentives(env, pool)?;
    write_pool(env, pool);

    let now = env.ledger().timestamp();
    let claim = claim_incentives(env, pool, position, &mut state, now, true)?;

    for tier in 0..NUM_UPTIMES {
        let stream = uptime_stream(tier);
        if let Some(accum) = state.accums.get(tier) {
            write_accum(env, pool.pool_id, stream, &accum);
        }
        if let Some(record) = claim.records.get(tier) {
            write_accum_position(env, pool.pool_id, stream, position.position_id, &record);
        }
    }

    let paid = claim.payout()?;
    let mut balances = read_balances(env, pool.pool_id);
    for (token, amount) in paid.iter() {
        debit_denom(&mut balances.incentives, &token, amount)?;
    }
    write_balances(env, pool.pool_id, &balances);

    transfer_out_all(env, &position.owner, &paid);
    events::emit_incentives_collected(
        env,
        pool.pool_id,
        position.position_id,
        &position.owner,
        &claim.collected,
        &claim.forfeited,
        &claim.returned,
    );

    Ok(IncentivesCollected {
        collected: claim.collected,
        forfeited: claim.forfeited,
        returned: claim.returned,
    })
}
