#![allow(dead_code)]

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env,
};
use tidal_clmm::{types::ModuleParams, TidalClmm, TidalClmmClient};

// Scenario pool: price 5000, range [84222, 86129)
pub const SQRT_5000: u128 = 1_304_381_782_533_278_221_234;
pub const TICK_5000: i32 = 85176;
pub const LOWER: i32 = 84222;
pub const UPPER: i32 = 86129;
pub const DEPOSIT0: i128 = 1_000_000;
pub const DEPOSIT1: i128 = 5_000_000_000;
pub const SCENARIO_LIQUIDITY: i128 = 1_517_818_840;

pub const START_TIME: u64 = 1_000_000;
pub const FUNDS: i128 = 1_000_000_000_000;

pub struct TestPool<'a> {
    pub client: TidalClmmClient<'a>,
    pub admin: Address,
    pub token0: Address,
    pub token1: Address,
    pub pool_id: u64,
}

pub fn default_params(env: &Env, admin: &Address) -> ModuleParams {
    ModuleParams {
        admin: admin.clone(),
        authorized_tick_spacings: vec![env, 1, 100],
        authorized_spread_factors: vec![env, 0, 30],
        authorized_uptimes: vec![env, 1, 60, 3_600, 86_400, 604_800, 1_209_600],
        permissionless_creation: false,
    }
}

pub fn new_env() -> Env {
    let env = Env::default();
    env.mock_all_auths();
    env.cost_estimate().budget().reset_unlimited();
    set_time(&env, START_TIME);
    env
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| li.timestamp = timestamp);
}

pub fn advance_time(env: &Env, seconds: u64) {
    let now = env.ledger().timestamp();
    set_time(env, now + seconds);
}

/// Register and initialize the contract
pub fn setup_module(env: &Env) -> (TidalClmmClient<'_>, Address) {
    let admin = Address::generate(env);
    let contract_id = env.register(TidalClmm, ());
    let client = TidalClmmClient::new(env, &contract_id);
    client.initialize(&admin, &default_params(env, &admin));
    (client, admin)
}

/// Module with one pool of two fresh tokens
pub fn setup_pool(env: &Env, tick_spacing: u32, spread_factor_bps: u32, sqrt_price: u128) -> TestPool<'_> {
    let (client, admin) = setup_module(env);
    let token0 = create_token(env, &admin);
    let token1 = create_token(env, &admin);
    let pool_id = client.create_pool(&admin, &token0, &token1, &tick_spacing, &spread_factor_bps, &sqrt_price);
    TestPool {
        client,
        admin,
        token0,
        token1,
        pool_id,
    }
}

/// Scenario pool at price 5000 with spacing 1
pub fn setup_scenario_pool(env: &Env, spread_factor_bps: u32) -> TestPool<'_> {
    setup_pool(env, 1, spread_factor_bps, SQRT_5000)
}

/// A funded user
pub fn user(env: &Env, pool: &TestPool) -> Address {
    let user = Address::generate(env);
    mint_tokens(env, &pool.token0, &user, FUNDS);
    mint_tokens(env, &pool.token1, &user, FUNDS);
    user
}

/// Open the scenario position for `owner`; returns its id
pub fn open_scenario_position(pool: &TestPool, owner: &Address) -> u64 {
    pool.client
        .create_position(owner, &pool.pool_id, &LOWER, &UPPER, &DEPOSIT0, &DEPOSIT1, &0, &0)
        .position_id
}

pub fn create_token(env: &Env, admin: &Address) -> Address {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone());
    token_id.address()
}

pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    StellarAssetClient::new(env, token).mint(to, &amount);
}

pub fn balance(env: &Env, token: &Address, of: &Address) -> i128 {
    TokenClient::new(env, token).balance(of)
}

/// Contract holdings of `token` must equal the pool's ledgers for it
pub fn assert_ledger_matches_holdings(env: &Env, pool: &TestPool) {
    let balances = pool.client.get_pool_balances(&pool.pool_id);
    let contract = pool.client.address.clone();

    let expected0 = balances.principal0
        + balances.spread_rewards.get(pool.token0.clone()).unwrap_or(0)
        + balances.incentives.get(pool.token0.clone()).unwrap_or(0);
    let expected1 = balances.principal1
        + balances.spread_rewards.get(pool.token1.clone()).unwrap_or(0)
        + balances.incentives.get(pool.token1.clone()).unwrap_or(0);

    assert_eq!(balance(env, &pool.token0, &contract), expected0);
    assert_eq!(balance(env, &pool.token1, &contract), expected1);
}
