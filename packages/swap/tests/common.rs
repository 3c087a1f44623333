#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use soroban_sdk::{testutils::Address as _, Address, Env, Map, Vec};
use tidal_swap::{SwapOutcome, SwapState};
use tidal_tick::{update_tick, BitmapLevel, GrowthSnapshot, TickInfo, TickStore};

pub const SQRT_5000: u128 = 1_304_381_782_533_278_221_234;
pub const TICK_5000: i32 = 85176;
pub const LOWER: i32 = 84222;
pub const UPPER: i32 = 86129;
pub const LIQUIDITY: u128 = 1_517_818_840;

#[derive(Default)]
pub struct TestTicks {
    ticks: RefCell<BTreeMap<i32, TickInfo>>,
    words: RefCell<BTreeMap<(bool, i32), u128>>,
}

impl TickStore for TestTicks {
    fn read_tick(&self, _env: &Env, tick: i32) -> Option<TickInfo> {
        self.ticks.borrow().get(&tick).cloned()
    }

    fn write_tick(&self, _env: &Env, tick: i32, info: &TickInfo) {
        self.ticks.borrow_mut().insert(tick, info.clone());
    }

    fn remove_tick(&self, _env: &Env, tick: i32) {
        self.ticks.borrow_mut().remove(&tick);
    }

    fn read_word(&self, _env: &Env, level: BitmapLevel, index: i32) -> u128 {
        let key = (level == BitmapLevel::Summary, index);
        self.words.borrow().get(&key).copied().unwrap_or(0)
    }

    fn write_word(&self, _env: &Env, level: BitmapLevel, index: i32, word: u128) {
        self.words
            .borrow_mut()
            .insert((level == BitmapLevel::Summary, index), word);
    }
}

pub fn empty_growth(env: &Env) -> GrowthSnapshot {
    let mut uptime = Vec::new(env);
    for _ in 0..6 {
        uptime.push_back(Map::new(env));
    }
    GrowthSnapshot {
        spread_reward: Map::new(env),
        uptime,
    }
}

/// Add a range's liquidity to the store the way a deposit does
pub fn add_range(env: &Env, store: &TestTicks, lower: i32, upper: i32, liquidity: u128, current_tick: i32) {
    let growth = empty_growth(env);
    update_tick(env, store, lower, current_tick, 1, liquidity as i128, false, &growth).unwrap();
    update_tick(env, store, upper, current_tick, 1, liquidity as i128, true, &growth).unwrap();
}

/// Pool at price 5000 with one position over [LOWER, UPPER)
pub fn single_range_pool(env: &Env, spread_factor_bps: u32, token_in: &Address) -> (TestTicks, SwapState) {
    let store = TestTicks::default();
    add_range(env, &store, LOWER, UPPER, LIQUIDITY, TICK_5000);
    let state = SwapState {
        sqrt_price: SQRT_5000,
        current_tick: TICK_5000,
        liquidity: LIQUIDITY,
        tick_spacing: 1,
        spread_factor_bps,
        token_in: token_in.clone(),
        global: empty_growth(env),
    };
    (store, state)
}

/// Carry a swap's outcome into the next state
pub fn apply(state: &mut SwapState, outcome: &SwapOutcome, token_in: &Address) {
    state.sqrt_price = outcome.sqrt_price;
    state.current_tick = outcome.current_tick;
    state.liquidity = outcome.liquidity;
    state.global.spread_reward = outcome.spread_reward_growth.clone();
    state.token_in = token_in.clone();
}

pub fn token(env: &Env) -> Address {
    Address::generate(env)
}
