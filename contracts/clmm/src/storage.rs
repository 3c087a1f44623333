// SPDX-License-Identifier: MIT
// Storage module for the Tidal CLMM contract

use soroban_sdk::{contracttype, Address, Env, Vec};
use tidal_accum::{AccumPosition, AccumulatorRecord};
use tidal_incentives::IncentiveRecord;
use tidal_position::Position;
use tidal_tick::{BitmapLevel, TickInfo, TickStore};

use crate::error::ClmmError;
use crate::types::{ModuleParams, Pool, PoolBalances};

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Module parameters (instance storage)
    Params,
    NextPoolId,
    NextPositionId,
    NextIncentiveId,
    Pool(u64),
    Balances(u64),
    /// Tick record by (pool_id, tick)
    Tick(u64, i32),
    /// Tick bitmap word by (pool_id, word index)
    TickWord(u64, i32),
    /// Summary bitmap word by (pool_id, index)
    TickSummary(u64, i32),
    Position(u64),
    /// Position ids by (owner, pool_id)
    OwnerPositions(Address, u64),
    PoolPositions(u64),
    /// Accumulator by (pool_id, stream)
    Accum(u64, u32),
    /// Accumulator position by (pool_id, stream, position_id)
    AccumPosition(u64, u32, u64),
    /// Incentive record by (pool_id, incentive_id)
    Incentive(u64, u64),
    PoolIncentives(u64),
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

/// Persistent storage lifetime in ledgers (~1 year at 5s/ledger)
const PERSISTENT_LIFETIME: u32 = 6_307_200;
/// TTL bump threshold
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

/// Writes extend the entry's lifetime; reads never touch it
fn write<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    extend_ttl(env, key);
}

fn read<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().get(key)
}

fn remove(env: &Env, key: &DataKey) {
    env.storage().persistent().remove(key);
}

// ============================================================
// PARAMS
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Params)
}

pub fn read_params(env: &Env) -> Result<ModuleParams, ClmmError> {
    env.storage()
        .instance()
        .get(&DataKey::Params)
        .ok_or(ClmmError::NotInitialized)
}

pub fn write_params(env: &Env, params: &ModuleParams) {
    env.storage().instance().set(&DataKey::Params, params);
    env.storage()
        .instance()
        .extend_ttl(PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

// ============================================================
// ID COUNTERS
// ============================================================

/// Return the next id for `key` and advance the counter; ids start at 1
fn next_id(env: &Env, key: DataKey) -> u64 {
    let id: u64 = read(env, &key).unwrap_or(1);
    write(env, &key, &(id + 1));
    id
}

pub fn next_pool_id(env: &Env) -> u64 {
    next_id(env, DataKey::NextPoolId)
}

pub fn next_position_id(env: &Env) -> u64 {
    next_id(env, DataKey::NextPositionId)
}

pub fn next_incentive_id(env: &Env) -> u64 {
    next_id(env, DataKey::NextIncentiveId)
}

// ============================================================
// POOLS
// ============================================================

pub fn read_pool(env: &Env, pool_id: u64) -> Result<Pool, ClmmError> {
    read(env, &DataKey::Pool(pool_id)).ok_or(ClmmError::PoolNotFound)
}

pub fn write_pool(env: &Env, pool: &Pool) {
    write(env, &DataKey::Pool(pool.pool_id), pool);
}

pub fn read_balances(env: &Env, pool_id: u64) -> PoolBalances {
    read(env, &DataKey::Balances(pool_id)).unwrap_or_else(|| PoolBalances::new(env))
}

pub fn write_balances(env: &Env, pool_id: u64, balances: &PoolBalances) {
    write(env, &DataKey::Balances(pool_id), balances);
}

// ============================================================
// TICKS
// ============================================================

/// Tick storage of one pool
pub struct PoolTicks {
    pool_id: u64,
}

impl PoolTicks {
    pub fn new(pool_id: u64) -> Self {
        Self { pool_id }
    }

    fn word_key(&self, level: BitmapLevel, index: i32) -> DataKey {
        match level {
            BitmapLevel::Tick => DataKey::TickWord(self.pool_id, index),
            BitmapLevel::Summary => DataKey::TickSummary(self.pool_id, index),
        }
    }
}

impl TickStore for PoolTicks {
    fn read_tick(&self, env: &Env, tick: i32) -> Option<TickInfo> {
        read(env, &DataKey::Tick(self.pool_id, tick))
    }

    fn write_tick(&self, env: &Env, tick: i32, info: &TickInfo) {
        write(env, &DataKey::Tick(self.pool_id, tick), info);
    }

    fn remove_tick(&self, env: &Env, tick: i32) {
        remove(env, &DataKey::Tick(self.pool_id, tick));
    }

    fn read_word(&self, env: &Env, level: BitmapLevel, index: i32) -> u128 {
        read(env, &self.word_key(level, index)).unwrap_or(0)
    }

    fn write_word(&self, env: &Env, level: BitmapLevel, index: i32, word: u128) {
        let key = self.word_key(level, index);
        if word == 0 {
            remove(env, &key);
        } else {
            write(env, &key, &word);
        }
    }
}

// ============================================================
// POSITIONS
// ============================================================

pub fn read_position(env: &Env, position_id: u64) -> Result<Position, ClmmError> {
    read(env, &DataKey::Position(position_id)).ok_or(ClmmError::PositionNotFound)
}

pub fn write_position(env: &Env, position: &Position) {
    write(env, &DataKey::Position(position.position_id), position);
}

pub fn read_owner_positions(env: &Env, owner: &Address, pool_id: u64) -> Vec<u64> {
    read(env, &DataKey::OwnerPositions(owner.clone(), pool_id)).unwrap_or_else(|| Vec::new(env))
}

pub fn read_pool_positions(env: &Env, pool_id: u64) -> Vec<u64> {
    read(env, &DataKey::PoolPositions(pool_id)).unwrap_or_else(|| Vec::new(env))
}

/// Store a new position and add it to both indexes
pub fn insert_position(env: &Env, position: &Position) {
    write_position(env, position);

    let owner_key = DataKey::OwnerPositions(position.owner.clone(), position.pool_id);
    let mut owned = read_owner_positions(env, &position.owner, position.pool_id);
    owned.push_back(position.position_id);
    write(env, &owner_key, &owned);

    let mut pooled = read_pool_positions(env, position.pool_id);
    pooled.push_back(position.position_id);
    write(env, &DataKey::PoolPositions(position.pool_id), &pooled);
}

fn remove_id(ids: &mut Vec<u64>, id: u64) {
    if let Some(index) = ids.first_index_of(id) {
        ids.remove(index);
    }
}

/// Delete a position and its index entries
pub fn delete_position(env: &Env, position: &Position) {
    remove(env, &DataKey::Position(position.position_id));

    let owner_key = DataKey::OwnerPositions(position.owner.clone(), position.pool_id);
    let mut owned = read_owner_positions(env, &position.owner, position.pool_id);
    remove_id(&mut owned, position.position_id);
    if owned.is_empty() {
        remove(env, &owner_key);
    } else {
        write(env, &owner_key, &owned);
    }

    let pool_key = DataKey::PoolPositions(position.pool_id);
    let mut pooled = read_pool_positions(env, position.pool_id);
    remove_id(&mut pooled, position.position_id);
    write(env, &pool_key, &pooled);
}

// ============================================================
// ACCUMULATORS
// ============================================================

pub fn read_accum(env: &Env, pool_id: u64, stream: u32) -> Result<AccumulatorRecord, ClmmError> {
    read(env, &DataKey::Accum(pool_id, stream)).ok_or(ClmmError::AccumDoesNotExist)
}

pub fn write_accum(env: &Env, pool_id: u64, stream: u32, accum: &AccumulatorRecord) {
    write(env, &DataKey::Accum(pool_id, stream), accum);
}

pub fn read_accum_position(env: &Env, pool_id: u64, stream: u32, position_id: u64) -> Option<AccumPosition> {
    read(env, &DataKey::AccumPosition(pool_id, stream, position_id))
}

pub fn write_accum_position(env: &Env, pool_id: u64, stream: u32, position_id: u64, record: &AccumPosition) {
    write(env, &DataKey::AccumPosition(pool_id, stream, position_id), record);
}

pub fn remove_accum_position(env: &Env, pool_id: u64, stream: u32, position_id: u64) {
    remove(env, &DataKey::AccumPosition(pool_id, stream, position_id));
}

// ============================================================
// INCENTIVES
// ============================================================

pub fn read_pool_incentive_ids(env: &Env, pool_id: u64) -> Vec<u64> {
    read(env, &DataKey::PoolIncentives(pool_id)).unwrap_or_else(|| Vec::new(env))
}

pub fn read_incentive(env: &Env, pool_id: u64, incentive_id: u64) -> Option<IncentiveRecord> {
    read(env, &DataKey::Incentive(pool_id, incentive_id))
}

pub fn write_incentive(env: &Env, record: &IncentiveRecord) {
    write(env, &DataKey::Incentive(record.pool_id, record.incentive_id), record);
}

/// Store a new incentive record and index it under its pool
pub fn insert_incentive(env: &Env, record: &IncentiveRecord) {
    write_incentive(env, record);
    let mut ids = read_pool_incentive_ids(env, record.pool_id);
    ids.push_back(record.incentive_id);
    write(env, &DataKey::PoolIncentives(record.pool_id), &ids);
}

/// All incentive records of a pool, in creation order
pub fn read_pool_incentives(env: &Env, pool_id: u64) -> Result<Vec<IncentiveRecord>, ClmmError> {
    let mut records = Vec::new(env);
    for id in read_pool_incentive_ids(env, pool_id).iter() {
        let record = read_incentive(env, pool_id, id).ok_or(ClmmError::IncentiveRecordNotFound)?;
        records.push_back(record);
    }
    Ok(records)
}
