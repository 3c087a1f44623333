mod common;

use common::{empty_snapshot, snapshot, MemTicks, UPTIME_TIERS};
use soroban_sdk::{testutils::Address as _, Address, Env, Map};
use tidal_accum::growth_get;
use tidal_math::MAX_TICK;
use tidal_tick::*;

// ============================================================
// UPDATE
// ============================================================

#[test]
fn test_update_rejects_bad_ticks() {
    let env = Env::default();
    let store = MemTicks::default();
    let global = empty_snapshot(&env);

    assert_eq!(
        update_tick(&env, &store, 15, 0, 10, 1, false, &global),
        Err(TickError::TickNotMultipleOfSpacing)
    );
    assert_eq!(
        update_tick(&env, &store, MAX_TICK + 1, 0, 1, 1, false, &global),
        Err(TickError::TickOutOfRange)
    );
    assert_eq!(
        update_tick(&env, &store, 0, 0, 0, 1, false, &global),
        Err(TickError::InvalidTickSpacing)
    );
}

#[test]
fn test_update_net_sign_by_side() {
    let env = Env::default();
    let store = MemTicks::default();
    let global = empty_snapshot(&env);

    assert!(update_tick(&env, &store, -10, 0, 10, 500, false, &global).unwrap());
    assert!(update_tick(&env, &store, 10, 0, 10, 500, true, &global).unwrap());
    assert!(!update_tick(&env, &store, 10, 0, 10, 200, false, &global).unwrap());

    let lower = get_tick(&env, &store, -10).unwrap();
    assert_eq!(lower.liquidity_gross, 500);
    assert_eq!(lower.liquidity_net, 500);

    let upper = get_tick(&env, &store, 10).unwrap();
    assert_eq!(upper.liquidity_gross, 700);
    assert_eq!(upper.liquidity_net, -300);
}

#[test]
fn test_update_snapshot_depends_on_current_tick() {
    let env = Env::default();
    let store = MemTicks::default();
    let token = Address::generate(&env);
    let global = snapshot(&env, &token, 40, 7);

    // At or below the current tick: all growth so far counts as below
    update_tick(&env, &store, 0, 0, 1, 1, false, &global).unwrap();
    let at = get_tick(&env, &store, 0).unwrap();
    assert_eq!(growth_get(&at.spread_reward_growth_opposite, &token), 40);
    assert_eq!(at.uptime_growth_opposite.len(), UPTIME_TIERS);
    for tier in at.uptime_growth_opposite.iter() {
        assert_eq!(growth_get(&tier, &token), 7);
    }

    // Above the current tick: starts empty
    update_tick(&env, &store, 1, 0, 1, 1, true, &global).unwrap();
    let above = get_tick(&env, &store, 1).unwrap();
    assert!(above.spread_reward_growth_opposite.is_empty());
    assert_eq!(above.uptime_growth_opposite.len(), UPTIME_TIERS);
    for tier in above.uptime_growth_opposite.iter() {
        assert!(tier.is_empty());
    }
}

#[test]
fn test_update_keeps_snapshot_of_existing_tick() {
    let env = Env::default();
    let store = MemTicks::default();
    let token = Address::generate(&env);

    update_tick(&env, &store, 0, 5, 1, 1, false, &snapshot(&env, &token, 10, 0)).unwrap();
    update_tick(&env, &store, 0, 5, 1, 1, false, &snapshot(&env, &token, 99, 0)).unwrap();

    let info = get_tick(&env, &store, 0).unwrap();
    assert_eq!(growth_get(&info.spread_reward_growth_opposite, &token), 10);
}

#[test]
fn test_update_removes_tick_at_zero_gross() {
    let env = Env::default();
    let store = MemTicks::default();
    let global = empty_snapshot(&env);

    update_tick(&env, &store, 20, 0, 10, 100, true, &global).unwrap();
    assert_eq!(
        update_tick(&env, &store, 20, 0, 10, -101, true, &global),
        Err(TickError::LiquidityGrossUnderflow)
    );
    assert!(update_tick(&env, &store, 20, 0, 10, -100, true, &global).unwrap());

    assert_eq!(get_tick(&env, &store, 20), Err(TickError::TickNotFound));
    assert_eq!(next_initialized_tick(&env, &store, 0, 10, Direction::OneForZero), None);
}

// ============================================================
// CROSS
// ============================================================

#[test]
fn test_cross_flips_snapshots() {
    let env = Env::default();
    let store = MemTicks::default();
    let token = Address::generate(&env);

    update_tick(&env, &store, 0, 0, 1, 250, false, &snapshot(&env, &token, 30, 3)).unwrap();

    let net = cross_tick(&env, &store, 0, &snapshot(&env, &token, 100, 10)).unwrap();
    assert_eq!(net, 250);

    let info = get_tick(&env, &store, 0).unwrap();
    assert_eq!(info.liquidity_gross, 250);
    assert_eq!(growth_get(&info.spread_reward_growth_opposite, &token), 70);
    for tier in info.uptime_growth_opposite.iter() {
        assert_eq!(growth_get(&tier, &token), 7);
    }

    // Crossing back with unchanged globals restores the original snapshot
    cross_tick(&env, &store, 0, &snapshot(&env, &token, 100, 10)).unwrap();
    let info = get_tick(&env, &store, 0).unwrap();
    assert_eq!(growth_get(&info.spread_reward_growth_opposite, &token), 30);
}

#[test]
fn test_crossed_tick_info_does_not_write() {
    let env = Env::default();
    let store = MemTicks::default();
    let token = Address::generate(&env);

    update_tick(&env, &store, 0, 0, 1, 1, false, &snapshot(&env, &token, 5, 0)).unwrap();
    let info = get_tick(&env, &store, 0).unwrap();

    let crossed = crossed_tick_info(&env, &info, &snapshot(&env, &token, 8, 0));
    assert_eq!(growth_get(&crossed.spread_reward_growth_opposite, &token), 3);
    assert_eq!(get_tick(&env, &store, 0).unwrap(), info);
}

#[test]
fn test_cross_missing_tick() {
    let env = Env::default();
    let store = MemTicks::default();
    assert_eq!(
        cross_tick(&env, &store, 7, &empty_snapshot(&env)),
        Err(TickError::TickNotFound)
    );
}

// ============================================================
// GROWTH INSIDE
// ============================================================

fn single(env: &Env, token: &Address, value: u128) -> Map<Address, u128> {
    let mut map = Map::new(env);
    if value != 0 {
        map.set(token.clone(), value);
    }
    map
}

#[test]
fn test_growth_inside_three_regions() {
    let env = Env::default();
    let token = Address::generate(&env);
    let lower_opp = single(&env, &token, 10);
    let upper_opp = single(&env, &token, 15);
    let global = single(&env, &token, 100);

    // Price inside: 100 - 10 - 15
    let inside = growth_inside(&env, &lower_opp, &upper_opp, -10, 10, 0, &global);
    assert_eq!(growth_get(&inside, &token), 75);

    // Price below: below = 100 - 95, above = 3
    let lower_opp_below = single(&env, &token, 95);
    let upper_opp_below = single(&env, &token, 3);
    let below = growth_inside(&env, &lower_opp_below, &upper_opp_below, -10, 10, -20, &global);
    assert_eq!(growth_get(&below, &token), 92);

    // Price at upper counts as above the range: below = 10, above = 100 - 15
    let above = growth_inside(&env, &lower_opp, &upper_opp, -10, 10, 10, &global);
    assert_eq!(growth_get(&above, &token), 5);
}

#[test]
fn test_fresh_range_has_zero_growth_inside() {
    let env = Env::default();
    let store = MemTicks::default();
    let token = Address::generate(&env);

    for current in [-50, 0, 50] {
        let global = snapshot(&env, &token, 1_000, 77);
        update_tick(&env, &store, -10, current, 1, 1, false, &global).unwrap();
        update_tick(&env, &store, 10, current, 1, 1, true, &global).unwrap();

        let spread = spread_reward_growth_inside(&env, &store, -10, 10, current, &global.spread_reward).unwrap();
        assert!(spread.is_empty(), "current {current}");

        let uptime = uptime_growth_inside(&env, &store, -10, 10, current, &global.uptime).unwrap();
        assert_eq!(uptime.len(), UPTIME_TIERS);
        for tier in uptime.iter() {
            assert!(tier.is_empty());
        }

        update_tick(&env, &store, -10, current, 1, -1, false, &global).unwrap();
        update_tick(&env, &store, 10, current, 1, -1, true, &global).unwrap();
    }
}

#[test]
fn test_growth_inside_accrues_only_while_in_range() {
    let env = Env::default();
    let store = MemTicks::default();
    let token = Address::generate(&env);

    let start = snapshot(&env, &token, 0, 0);
    update_tick(&env, &store, -10, 0, 1, 1, false, &start).unwrap();
    update_tick(&env, &store, 10, 0, 1, 1, true, &start).unwrap();

    // 50 accrues in range, then the price crosses the upper tick
    let at_cross = snapshot(&env, &token, 50, 0);
    cross_tick(&env, &store, 10, &at_cross).unwrap();

    // 30 more accrues above the range
    let later = single(&env, &token, 80);
    let inside = spread_reward_growth_inside(&env, &store, -10, 10, 10, &later).unwrap();
    assert_eq!(growth_get(&inside, &token), 50);
}
