mod common;

use common::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

// ============================================================
// PRICE 5000 POOL
// ============================================================

#[test]
fn test_scenario_position_amounts_and_liquidity() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);

    let created = pool
        .client
        .create_position(&owner, &pool.pool_id, &LOWER, &UPPER, &DEPOSIT0, &DEPOSIT1, &0, &0);

    assert_eq!(created.liquidity, SCENARIO_LIQUIDITY);
    assert_eq!(created.amount0, 998_588);
    assert_eq!(created.amount1, 4_999_999_997);
    assert_eq!(created.join_time, START_TIME);

    let state = pool.client.get_pool(&pool.pool_id);
    assert_eq!(state.current_tick, TICK_5000);
    assert_eq!(state.liquidity, SCENARIO_LIQUIDITY);

    assert_eq!(balance(&env, &pool.token0, &owner), FUNDS - 998_588);
    assert_eq!(balance(&env, &pool.token1, &owner), FUNDS - 4_999_999_997);
    assert_ledger_matches_holdings(&env, &pool);
}

#[test]
fn test_scenario_swap_token1_for_token0() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let trader = user(&env, &pool);
    open_scenario_position(&pool, &owner);

    let result = pool.client.swap_exact_amount_in(
        &trader,
        &pool.pool_id,
        &pool.token1,
        &42_000_000,
        &pool.token0,
        &0,
        &0,
    );

    assert_eq!(result.amount_in, 42_000_000);
    assert_eq!(result.amount_out, 8396);
    assert_eq!(result.spread_charge, 0);
    assert_eq!(result.sqrt_price, 1_304_892_227_673_816_733_173);
    assert_eq!(result.current_tick, 85184);

    let state = pool.client.get_pool(&pool.pool_id);
    assert_eq!(state.current_sqrt_price, result.sqrt_price);
    assert_eq!(state.current_tick, 85184);
    assert_eq!(state.liquidity, SCENARIO_LIQUIDITY);

    assert_eq!(balance(&env, &pool.token0, &trader), FUNDS + 8396);
    assert_eq!(balance(&env, &pool.token1, &trader), FUNDS - 42_000_000);
    assert_ledger_matches_holdings(&env, &pool);
}

#[test]
fn test_scenario_swap_token0_for_token1() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let trader = user(&env, &pool);
    open_scenario_position(&pool, &owner);

    let result = pool.client.swap_exact_amount_in(
        &trader,
        &pool.pool_id,
        &pool.token0,
        &10_000,
        &pool.token1,
        &0,
        &0,
    );

    assert_eq!(result.amount_out, 49_976_717);
    assert_eq!(result.sqrt_price, 1_303_774_392_711_826_337_512);
    assert_eq!(result.current_tick, 85166);
    assert_ledger_matches_holdings(&env, &pool);
}

#[test]
fn test_scenario_swap_exact_out() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let trader = user(&env, &pool);
    open_scenario_position(&pool, &owner);

    let result = pool.client.swap_exact_amount_out(
        &trader,
        &pool.pool_id,
        &pool.token1,
        &50_000_000,
        &pool.token0,
        &8396,
    );

    assert_eq!(result.amount_out, 8396);
    assert_eq!(result.amount_in, 41_996_427);
    assert_eq!(result.sqrt_price, 1_304_892_184_245_646_579_970);
    assert_eq!(balance(&env, &pool.token1, &trader), FUNDS - 41_996_427);
}

#[test]
fn test_swap_with_spread_factor_funds_spread_rewards() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 30);
    let owner = user(&env, &pool);
    let trader = user(&env, &pool);
    let position_id = open_scenario_position(&pool, &owner);

    let result = pool.client.swap_exact_amount_in(
        &trader,
        &pool.pool_id,
        &pool.token1,
        &1_000_000,
        &pool.token0,
        &0,
        &0,
    );
    assert_eq!(result.spread_charge, 3000);
    assert_eq!(result.amount_out, 199);
    assert_eq!(result.sqrt_price, 1_304_393_899_528_638_147_338);

    let balances = pool.client.get_pool_balances(&pool.pool_id);
    assert_eq!(balances.spread_rewards.get(pool.token1.clone()), Some(3000));
    assert_ledger_matches_holdings(&env, &pool);

    let before = balance(&env, &pool.token1, &owner);
    let paid = pool.client.collect_spread_rewards(&owner, &position_id);
    let amount = paid.get(pool.token1.clone()).unwrap();
    assert!(amount == 2999 || amount == 3000);
    assert_eq!(balance(&env, &pool.token1, &owner), before + amount);
    assert_ledger_matches_holdings(&env, &pool);

    // Nothing left to collect
    let again = pool.client.collect_spread_rewards(&owner, &position_id);
    assert!(again.get(pool.token1.clone()).unwrap_or(0) == 0);
}

// ============================================================
// LATE POSITION
// ============================================================

#[test]
fn test_late_position_earns_nothing_accrued_before_it() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 30);
    let first_owner = user(&env, &pool);
    let second_owner = user(&env, &pool);
    let trader = user(&env, &pool);

    let first = open_scenario_position(&pool, &first_owner);
    pool.client.swap_exact_amount_in(
        &trader,
        &pool.pool_id,
        &pool.token1,
        &1_000_000,
        &pool.token0,
        &0,
        &0,
    );
    let accrued = pool.client.get_claimable_spread_rewards(&first);

    let second = open_scenario_position(&pool, &second_owner);

    let second_claimable = pool.client.get_claimable_spread_rewards(&second);
    assert_eq!(second_claimable.get(pool.token1.clone()).unwrap_or(0), 0);
    assert_eq!(pool.client.get_claimable_spread_rewards(&first), accrued);

    let accrued = accrued.get(pool.token1.clone()).unwrap();
    assert!(accrued == 2999 || accrued == 3000);
}

#[test]
fn test_claimable_query_is_idempotent() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 30);
    let owner = user(&env, &pool);
    let trader = user(&env, &pool);
    let position_id = open_scenario_position(&pool, &owner);

    pool.client.swap_exact_amount_in(
        &trader,
        &pool.pool_id,
        &pool.token1,
        &1_000_000,
        &pool.token0,
        &0,
        &0,
    );

    let accum_before = pool.client.get_accumulator(&pool.pool_id, &0);
    let first = pool.client.get_claimable_spread_rewards(&position_id);
    let second = pool.client.get_claimable_spread_rewards(&position_id);
    assert_eq!(first, second);
    assert_eq!(pool.client.get_accumulator(&pool.pool_id, &0), accum_before);

    let paid = pool.client.collect_spread_rewards(&owner, &position_id);
    assert_eq!(paid, first);
}

// ============================================================
// INCENTIVE EMISSION
// ============================================================

#[test]
fn test_incentive_pays_rate_times_time() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let funder = Address::generate(&env);
    let reward = create_token(&env, &pool.admin);
    mint_tokens(&env, &reward, &funder, 1_000_000);

    let position_id = open_scenario_position(&pool, &owner);
    pool.client
        .create_incentive(&funder, &pool.pool_id, &reward, &1_000_000, &1_000, &START_TIME, &1);

    advance_time(&env, 100);
    let claimable = pool.client.get_claimable_incentives(&position_id);
    let amount = claimable.collected.get(reward.clone()).unwrap();
    assert!((99_999..=100_000).contains(&amount));
    assert!(claimable.forfeited.is_empty());

    let collected = pool.client.collect_incentives(&owner, &position_id);
    assert_eq!(collected, claimable);
    assert_eq!(balance(&env, &reward, &owner), amount);

    let records = pool.client.get_incentive_records(&pool.pool_id);
    assert_eq!(records.get(0).unwrap().remaining, 900_000);
}

#[test]
fn test_incentive_is_bounded_by_funding() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let funder = Address::generate(&env);
    let reward = create_token(&env, &pool.admin);
    mint_tokens(&env, &reward, &funder, 50_000);

    let position_id = open_scenario_position(&pool, &owner);
    pool.client
        .create_incentive(&funder, &pool.pool_id, &reward, &50_000, &1_000, &START_TIME, &1);

    advance_time(&env, 10_000);
    let collected = pool.client.collect_incentives(&owner, &position_id);
    let amount = collected.collected.get(reward.clone()).unwrap();
    assert!((49_999..=50_000).contains(&amount));

    let records = pool.client.get_incentive_records(&pool.pool_id);
    assert_eq!(records.get(0).unwrap().remaining, 0);
    assert_ledger_matches_holdings(&env, &pool);
}

#[test]
fn test_out_of_range_position_earns_no_incentives() {
    let env = new_env();
    let pool = setup_scenario_pool(&env, 0);
    let owner = user(&env, &pool);
    let outsider = user(&env, &pool);
    let funder = Address::generate(&env);
    let reward = create_token(&env, &pool.admin);
    mint_tokens(&env, &reward, &funder, 1_000_000);

    let in_range = open_scenario_position(&pool, &owner);
    let out_of_range = pool
        .client
        .create_position(&outsider, &pool.pool_id, &86_200, &86_300, &1_000, &0, &0, &0)
        .position_id;

    pool.client
        .create_incentive(&funder, &pool.pool_id, &reward, &1_000_000, &1_000, &START_TIME, &1);
    advance_time(&env, 100);

    let outside = pool.client.get_claimable_incentives(&out_of_range);
    assert_eq!(outside.collected.get(reward.clone()).unwrap_or(0), 0);

    let inside = pool.client.get_claimable_incentives(&in_range);
    let amount = inside.collected.get(reward.clone()).unwrap();
    assert!((99_999..=100_000).contains(&amount));
}
