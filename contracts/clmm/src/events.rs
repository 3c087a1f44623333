// Events module for the Tidal CLMM contract

use soroban_sdk::{Address, Env, Map, Symbol};
use tidal_incentives::{EmissionAnomaly, IncentiveRecord};

/// Emitted when the module is initialized
/// Topics: ("Init",)
/// Data: admin
pub fn emit_initialized(env: &Env, admin: &Address) {
    env.events()
        .publish((Symbol::new(env, "Init"),), admin.clone());
}

/// Emitted when the admin replaces module params
/// Topics: ("ParamsSet",)
/// Data: admin
pub fn emit_params_updated(env: &Env, admin: &Address) {
    env.events()
        .publish((Symbol::new(env, "ParamsSet"),), admin.clone());
}

/// Topics: ("PoolCreated", pool_id)
/// Data: (creator, token0, token1, tick_spacing, spread_factor_bps, sqrt_price)
pub fn emit_pool_created(
    env: &Env,
    pool_id: u64,
    creator: &Address,
    token0: &Address,
    token1: &Address,
    tick_spacing: u32,
    spread_factor_bps: u32,
    sqrt_price: u128,
) {
    env.events().publish(
        (Symbol::new(env, "PoolCreated"), pool_id),
        (
            creator.clone(),
            token0.clone(),
            token1.clone(),
            tick_spacing,
            spread_factor_bps,
            sqrt_price,
        ),
    );
}

/// Topics: ("PosCreated", pool_id)
/// Data: (position_id, owner, lower_tick, upper_tick, liquidity, amount0, amount1)
pub fn emit_position_created(
    env: &Env,
    pool_id: u64,
    position_id: u64,
    owner: &Address,
    lower_tick: i32,
    upper_tick: i32,
    liquidity: i128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "PosCreated"), pool_id),
        (position_id, owner.clone(), lower_tick, upper_tick, liquidity, amount0, amount1),
    );
}

/// Topics: ("PosWithdrawn", pool_id)
/// Data: (position_id, owner, liquidity, amount0, amount1)
pub fn emit_position_withdrawn(
    env: &Env,
    pool_id: u64,
    position_id: u64,
    owner: &Address,
    liquidity: i128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (Symbol::new(env, "PosWithdrawn"), pool_id),
        (position_id, owner.clone(), liquidity, amount0, amount1),
    );
}

/// Topics: ("PosAdded", pool_id)
/// Data: (old_position_id, new_position_id, owner)
pub fn emit_position_added(env: &Env, pool_id: u64, old_position_id: u64, new_position_id: u64, owner: &Address) {
    env.events().publish(
        (Symbol::new(env, "PosAdded"), pool_id),
        (old_position_id, new_position_id, owner.clone()),
    );
}

/// Topics: ("Swap", pool_id)
/// Data: (sender, token_in, token_out, amount_in, amount_out, spread_charge)
pub fn emit_swap(
    env: &Env,
    pool_id: u64,
    sender: &Address,
    token_in: &Address,
    token_out: &Address,
    amount_in: i128,
    amount_out: i128,
    spread_charge: i128,
) {
    env.events().publish(
        (Symbol::new(env, "Swap"), pool_id),
        (
            sender.clone(),
            token_in.clone(),
            token_out.clone(),
            amount_in,
            amount_out,
            spread_charge,
        ),
    );
}

/// Topics: ("SpreadCollected", pool_id)
/// Data: (position_id, owner, amounts)
pub fn emit_spread_rewards_collected(
    env: &Env,
    pool_id: u64,
    position_id: u64,
    owner: &Address,
    amounts: &Map<Address, i128>,
) {
    env.events().publish(
        (Symbol::new(env, "SpreadCollected"), pool_id),
        (position_id, owner.clone(), amounts.clone()),
    );
}

/// Topics: ("IncCollected", pool_id)
/// Data: (position_id, owner, collected, forfeited, returned)
pub fn emit_incentives_collected(
    env: &Env,
    pool_id: u64,
    position_id: u64,
    owner: &Address,
    collected: &Map<Address, i128>,
    forfeited: &Map<Address, i128>,
    returned: &Map<Address, i128>,
) {
    env.events().publish(
        (Symbol::new(env, "IncCollected"), pool_id),
        (position_id, owner.clone(), collected.clone(), forfeited.clone(), returned.clone()),
    );
}

/// Topics: ("IncCreated", pool_id)
/// Data: (incentive_id, funder, token, amount, emission_rate, start_time, min_uptime)
pub fn emit_incentive_created(env: &Env, funder: &Address, record: &IncentiveRecord) {
    env.events().publish(
        (Symbol::new(env, "IncCreated"), record.pool_id),
        (
            record.incentive_id,
            funder.clone(),
            record.token.clone(),
            record.remaining,
            record.emission_rate,
            record.start_time,
            record.min_uptime,
        ),
    );
}

// ============================================================
// TELEMETRY
// ============================================================

/// Spread charge that produced no reward growth
/// Topics: ("RewardTrunc", pool_id)
/// Data: (token, steps, amount)
pub fn emit_reward_truncated(env: &Env, pool_id: u64, token: &Address, steps: u32, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "RewardTrunc"), pool_id),
        (token.clone(), steps, amount),
    );
}

/// Incentive emission that produced no growth
/// Topics: ("RewardTrunc" | "EmitOverflow" | "ZeroLiqEmit", pool_id)
/// Data: (incentive_id, amount)
pub fn emit_emission_anomaly(env: &Env, pool_id: u64, anomaly: EmissionAnomaly) {
    let (name, incentive_id, amount) = match anomaly {
        EmissionAnomaly::Truncated { incentive_id, amount } => ("RewardTrunc", incentive_id, amount),
        EmissionAnomaly::Overflow { incentive_id, amount } => ("EmitOverflow", incentive_id, amount),
        EmissionAnomaly::ZeroLiquidity { incentive_id, amount } => ("ZeroLiqEmit", incentive_id, amount),
    };
    env.events()
        .publish((Symbol::new(env, name), pool_id), (incentive_id, amount));
}

/// Forfeited incentive that could not be redeposited as growth
/// Topics: ("RewardTrunc", pool_id)
/// Data: (token, tier, amount)
pub fn emit_forfeit_truncated(env: &Env, pool_id: u64, token: &Address, tier: u32, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "RewardTrunc"), pool_id),
        (token.clone(), tier, amount),
    );
}
