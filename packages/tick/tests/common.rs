#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use soroban_sdk::{testutils::Address as _, Address, Env, Map, Vec};
use tidal_tick::{BitmapLevel, GrowthSnapshot, TickInfo, TickStore};

/// In-memory tick store
#[derive(Default)]
pub struct MemTicks {
    pub ticks: RefCell<BTreeMap<i32, TickInfo>>,
    pub words: RefCell<BTreeMap<(u8, i32), u128>>,
}

fn level_key(level: BitmapLevel) -> u8 {
    match level {
        BitmapLevel::Tick => 0,
        BitmapLevel::Summary => 1,
    }
}

impl TickStore for MemTicks {
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
        self.words.borrow().get(&(level_key(level), index)).copied().unwrap_or(0)
    }

    fn write_word(&self, _env: &Env, level: BitmapLevel, index: i32, word: u128) {
        let key = (level_key(level), index);
        if word == 0 {
            self.words.borrow_mut().remove(&key);
        } else {
            self.words.borrow_mut().insert(key, word);
        }
    }
}

impl MemTicks {
    pub fn word_count(&self) -> usize {
        self.words.borrow().len()
    }
}

pub const UPTIME_TIERS: u32 = 6;

/// Snapshot with a single denom in the spread stream and each uptime tier
pub fn snapshot(env: &Env, token: &Address, spread: u128, uptime: u128) -> GrowthSnapshot {
    let mut spread_map = Map::new(env);
    if spread != 0 {
        spread_map.set(token.clone(), spread);
    }
    let mut tiers = Vec::new(env);
    for _ in 0..UPTIME_TIERS {
        let mut tier = Map::new(env);
        if uptime != 0 {
            tier.set(token.clone(), uptime);
        }
        tiers.push_back(tier);
    }
    GrowthSnapshot {
        spread_reward: spread_map,
        uptime: tiers,
    }
}

pub fn empty_snapshot(env: &Env) -> GrowthSnapshot {
    let token = Address::generate(env);
    snapshot(env, &token, 0, 0)
}
