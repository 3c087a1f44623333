// Tick Update and Crossing Logic

use soroban_sdk::{Address, Env, Map, Vec};
use tidal_accum::growth_sub;
use crate::bitmap::set_tick_initialized;
use crate::error::TickError;
use crate::store::{get_tick, set_tick, validate_tick, TickStore};
use crate::types::{GrowthSnapshot, TickInfo};

fn empty_uptime(env: &Env, tiers: u32) -> Vec<Map<Address, u128>> {
    let mut out = Vec::new(env);
    for _ in 0..tiers {
        out.push_back(Map::new(env));
    }
    out
}

/// Update a tick when liquidity is added or removed
///
/// A tick created at or below the current tick starts with the global
/// growth as its opposite snapshot (all growth so far is assumed to have
/// happened below it); a tick above the current tick starts empty. The
/// tick and its bitmap bit are removed once gross liquidity returns to 0.
///
/// Returns whether the tick flipped between initialized and uninitialized.
pub fn update_tick<S: TickStore>(
    env: &Env,
    store: &S,
    tick: i32,
    current_tick: i32,
    tick_spacing: u32,
    liquidity_delta: i128,
    upper: bool,
    global: &GrowthSnapshot,
) -> Result<bool, TickError> {
    validate_tick(tick, tick_spacing)?;

    let mut info = store.read_tick(env, tick).unwrap_or_else(|| TickInfo::new(env));

    let liquidity_gross_before = info.liquidity_gross;
    let liquidity_gross_after = liquidity_gross_before
        .checked_add(liquidity_delta)
        .ok_or(TickError::LiquidityOverflow)?;
    if liquidity_gross_after < 0 {
        return Err(TickError::LiquidityGrossUnderflow);
    }

    let flipped = (liquidity_gross_after == 0) != (liquidity_gross_before == 0);

    if liquidity_gross_before == 0 && liquidity_gross_after > 0 {
        if current_tick >= tick {
            info.spread_reward_growth_opposite = global.spread_reward.clone();
            info.uptime_growth_opposite = global.uptime.clone();
        } else {
            info.spread_reward_growth_opposite = Map::new(env);
            info.uptime_growth_opposite = empty_uptime(env, global.uptime.len());
        }
    }

    info.liquidity_gross = liquidity_gross_after;
    info.liquidity_net = if upper {
        info.liquidity_net.checked_sub(liquidity_delta)
    } else {
        info.liquidity_net.checked_add(liquidity_delta)
    }
    .ok_or(TickError::LiquidityOverflow)?;

    if liquidity_gross_after == 0 {
        store.remove_tick(env, tick);
        set_tick_initialized(env, store, tick, tick_spacing, false);
    } else {
        set_tick(env, store, tick, tick_spacing, &info)?;
        if flipped {
            set_tick_initialized(env, store, tick, tick_spacing, true);
        }
    }

    Ok(flipped)
}

/// Tick record after a swap crosses it
///
/// Every opposite snapshot becomes `global - opposite`.
pub fn crossed_tick_info(env: &Env, info: &TickInfo, global: &GrowthSnapshot) -> TickInfo {
    let mut uptime = Vec::new(env);
    for (i, global_tier) in global.uptime.iter().enumerate() {
        let opposite = info
            .uptime_growth_opposite
            .get(i as u32)
            .unwrap_or_else(|| Map::new(env));
        uptime.push_back(growth_sub(env, &global_tier, &opposite));
    }

    TickInfo {
        liquidity_gross: info.liquidity_gross,
        liquidity_net: info.liquidity_net,
        spread_reward_growth_opposite: growth_sub(env, &global.spread_reward, &info.spread_reward_growth_opposite),
        uptime_growth_opposite: uptime,
    }
}

/// Cross a tick boundary during a swap
///
/// Reads a snapshot, computes the crossed record and writes it once.
/// Returns the tick's `liquidity_net`.
pub fn cross_tick<S: TickStore>(
    env: &Env,
    store: &S,
    tick: i32,
    global: &GrowthSnapshot,
) -> Result<i128, TickError> {
    let info = get_tick(env, store, tick)?;
    let crossed = crossed_tick_info(env, &info, global);
    store.write_tick(env, tick, &crossed);
    Ok(crossed.liquidity_net)
}
