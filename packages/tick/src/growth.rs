// Growth Inside a Tick Range

use soroban_sdk::{Address, Env, Map, Vec};
use tidal_accum::growth_sub;
use crate::error::TickError;
use crate::store::{get_tick, TickStore};

/// Growth accrued inside [lower, upper) given the two ticks' opposite
/// snapshots
///
/// below = lower_opposite            if current >= lower
///       = global - lower_opposite   otherwise
/// above = upper_opposite            if current < upper
///       = global - upper_opposite   otherwise
/// inside = global - below - above
pub fn growth_inside(
    env: &Env,
    lower_opposite: &Map<Address, u128>,
    upper_opposite: &Map<Address, u128>,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    global: &Map<Address, u128>,
) -> Map<Address, u128> {
    let below = if current_tick >= lower_tick {
        lower_opposite.clone()
    } else {
        growth_sub(env, global, lower_opposite)
    };
    let above = if current_tick < upper_tick {
        upper_opposite.clone()
    } else {
        growth_sub(env, global, upper_opposite)
    };
    growth_sub(env, &growth_sub(env, global, &below), &above)
}

pub fn spread_reward_growth_inside<S: TickStore>(
    env: &Env,
    store: &S,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    global: &Map<Address, u128>,
) -> Result<Map<Address, u128>, TickError> {
    let lower = get_tick(env, store, lower_tick)?;
    let upper = get_tick(env, store, upper_tick)?;
    Ok(growth_inside(
        env,
        &lower.spread_reward_growth_opposite,
        &upper.spread_reward_growth_opposite,
        lower_tick,
        upper_tick,
        current_tick,
        global,
    ))
}

/// Growth inside the range for every uptime tier
pub fn uptime_growth_inside<S: TickStore>(
    env: &Env,
    store: &S,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
    global: &Vec<Map<Address, u128>>,
) -> Result<Vec<Map<Address, u128>>, TickError> {
    let lower = get_tick(env, store, lower_tick)?;
    let upper = get_tick(env, store, upper_tick)?;

    let mut out = Vec::new(env);
    for (i, global_tier) in global.iter().enumerate() {
        let lower_opposite = lower.uptime_growth_opposite.get(i as u32).unwrap_or_else(|| Map::new(env));
        let upper_opposite = upper.uptime_growth_opposite.get(i as u32).unwrap_or_else(|| Map::new(env));
        out.push_back(growth_inside(
            env,
            &lower_opposite,
            &upper_opposite,
            lower_tick,
            upper_tick,
            current_tick,
            &global_tier,
        ));
    }
    Ok(out)
}
