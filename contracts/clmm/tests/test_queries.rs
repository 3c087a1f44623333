mod common;

use common::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;
use tidal_clmm::ClmmError;

const INNER_LOWER: i32 = 85_000;
const INNER_UPPER: i32 = 86_000;

fn nested_ranges(env: &soroban_sdk::Env) -> (TestPool<'_>, Address, i128) {
    let pool = setup_scenario_pool(env, 0);
    let owner = user(env, &pool);
    open_scenario_position(&pool, &owner);
    let inner = pool.client.create_position(
        &owner,
        &pool.pool_id,
        &INNER_LOWER,
        &INNER_UPPER,
        &DEPOSIT0,
        &DEPOSIT1,
        &0,
        &0,
    );
    (pool, owner, inner.liquidity)
}

#[test]
fn test_liquidity_for_full_range() {
    let env = new_env();
    let (pool, _, inner) = nested_ranges(&env);

    let depth = pool.client.get_liquidity_full_range(&pool.pool_id);
    assert_eq!(depth.len(), 3);

    let first = depth.get(0).unwrap();
    assert_eq!((first.lower_tick, first.upper_tick), (LOWER, INNER_LOWER));
    assert_eq!(first.liquidity_amount, SCENARIO_LIQUIDITY);

    let second = depth.get(1).unwrap();
    assert_eq!((second.lower_tick, second.upper_tick), (INNER_LOWER, INNER_UPPER));
    assert_eq!(second.liquidity_amount, SCENARIO_LIQUIDITY + inner);

    let third = depth.get(2).unwrap();
    assert_eq!((third.lower_tick, third.upper_tick), (INNER_UPPER, UPPER));
    assert_eq!(third.liquidity_amount, SCENARIO_LIQUIDITY);
}

#[test]
fn test_liquidity_net_selling_token0() {
    let env = new_env();
    let (pool, _, inner) = nested_ranges(&env);

    let nets = pool
        .client
        .get_liquidity_net_in_dir(&pool.pool_id, &pool.token0, &None, &None);
    assert_eq!(nets.len(), 2);
    assert_eq!(nets.get(0).unwrap().tick_index, INNER_LOWER);
    assert_eq!(nets.get(0).unwrap().liquidity_net, inner);
    assert_eq!(nets.get(1).unwrap().tick_index, LOWER);
    assert_eq!(nets.get(1).unwrap().liquidity_net, SCENARIO_LIQUIDITY);
}

#[test]
fn test_liquidity_net_selling_token1_with_bound() {
    let env = new_env();
    let (pool, _, inner) = nested_ranges(&env);

    let nets = pool
        .client
        .get_liquidity_net_in_dir(&pool.pool_id, &pool.token1, &None, &None);
    assert_eq!(nets.len(), 2);
    assert_eq!(nets.get(0).unwrap().tick_index, INNER_UPPER);
    assert_eq!(nets.get(0).unwrap().liquidity_net, -inner);
    assert_eq!(nets.get(1).unwrap().tick_index, UPPER);

    let bounded = pool.client.get_liquidity_net_in_dir(
        &pool.pool_id,
        &pool.token1,
        &None,
        &Some(86_050),
    );
    assert_eq!(bounded.len(), 1);

    let from_start = pool.client.get_liquidity_net_in_dir(
        &pool.pool_id,
        &pool.token1,
        &Some(INNER_UPPER),
        &None,
    );
    assert_eq!(from_start.len(), 1);
    assert_eq!(from_start.get(0).unwrap().tick_index, UPPER);
}

#[test]
fn test_liquidity_net_invalid_bound() {
    let env = new_env();
    let (pool, _, _) = nested_ranges(&env);

    assert_eq!(
        pool.client.try_get_liquidity_net_in_dir(
            &pool.pool_id,
            &pool.token1,
            &None,
            &Some(TICK_5000 - 1),
        ),
        Err(Ok(ClmmError::InvalidTickBound))
    );
    assert_eq!(
        pool.client.try_get_liquidity_net_in_dir(
            &pool.pool_id,
            &pool.token0,
            &None,
            &Some(TICK_5000 + 1),
        ),
        Err(Ok(ClmmError::InvalidTickBound))
    );

    let stranger = Address::generate(&env);
    assert_eq!(
        pool.client
            .try_get_liquidity_net_in_dir(&pool.pool_id, &stranger, &None, &None),
        Err(Ok(ClmmError::TokenInDenomNotInPool))
    );
}

#[test]
fn test_position_amounts_round_down() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let position_id = open_scenario_position(&pool, &owner);

    assert_eq!(
        pool.client.get_position_amounts(&position_id),
        (998_587, 4_999_999_996)
    );
}

#[test]
fn test_missing_records() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);

    assert_eq!(
        pool.client.try_get_position(&1),
        Err(Ok(ClmmError::PositionNotFound))
    );
    assert_eq!(
        pool.client.try_get_claimable_spread_rewards(&1),
        Err(Ok(ClmmError::PositionNotFound))
    );
    assert_eq!(
        pool.client.try_get_tick(&pool.pool_id, &LOWER),
        Err(Ok(ClmmError::TickNotFound))
    );
    assert!(pool.client.get_incentive_records(&pool.pool_id).is_empty());
}

// ============================================================
// STORAGE LIFETIME
// ============================================================

/// Mirrors the contract's key encoding for the entries inspected here
#[soroban_sdk::contracttype]
#[derive(Clone)]
enum StoredKey {
    Pool(u64),
    Position(u64),
}

#[test]
fn test_queries_leave_entry_lifetimes_unchanged() {
    use soroban_sdk::testutils::{storage::Persistent as _, Ledger as _};

    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let position_id = open_scenario_position(&pool, &owner);

    env.ledger().with_mut(|li| li.sequence_number += 100);
    let contract = pool.client.address.clone();
    let ttls = || {
        env.as_contract(&contract, || {
            (
                env.storage().persistent().get_ttl(&StoredKey::Pool(pool.pool_id)),
                env.storage().persistent().get_ttl(&StoredKey::Position(position_id)),
            )
        })
    };
    let before = ttls();

    pool.client.get_pool(&pool.pool_id);
    pool.client.get_position(&position_id);
    pool.client.get_position_amounts(&position_id);
    pool.client.get_claimable_spread_rewards(&position_id);
    pool.client.get_claimable_incentives(&position_id);
    pool.client.get_liquidity_full_range(&pool.pool_id);
    pool.client
        .quote_exact_amount_in(&pool.pool_id, &pool.token1, &1_000_000, &pool.token0);
    assert_eq!(ttls(), before);

    // Collecting syncs and rewrites the pool, renewing its lifetime
    pool.client.collect_incentives(&owner, &position_id);
    assert!(ttls().0 > before.0);
    assert_eq!(ttls().1, before.1);
}
