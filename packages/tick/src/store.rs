// Tick Storage Abstraction

use soroban_sdk::Env;
use tidal_math::{is_tick_aligned, MAX_TICK, MIN_TICK};
use crate::error::TickError;
use crate::types::{BitmapLevel, TickInfo};

/// Storage trait for tick operations
/// This allows the tick logic to work with any storage implementation
pub trait TickStore {
    fn read_tick(&self, env: &Env, tick: i32) -> Option<TickInfo>;
    fn write_tick(&self, env: &Env, tick: i32, info: &TickInfo);
    fn remove_tick(&self, env: &Env, tick: i32);
    fn read_word(&self, env: &Env, level: BitmapLevel, index: i32) -> u128;
    fn write_word(&self, env: &Env, level: BitmapLevel, index: i32, word: u128);
}

/// Check range and spacing of a tick
pub fn validate_tick(tick: i32, tick_spacing: u32) -> Result<(), TickError> {
    if tick_spacing == 0 || tick_spacing > MAX_TICK as u32 {
        return Err(TickError::InvalidTickSpacing);
    }
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(TickError::TickOutOfRange);
    }
    if !is_tick_aligned(tick, tick_spacing) {
        return Err(TickError::TickNotMultipleOfSpacing);
    }
    Ok(())
}

/// Read a tick, failing when it is not initialized
pub fn get_tick<S: TickStore>(env: &Env, store: &S, tick: i32) -> Result<TickInfo, TickError> {
    store.read_tick(env, tick).ok_or(TickError::TickNotFound)
}

/// Write a tick after validating its index
pub fn set_tick<S: TickStore>(
    env: &Env,
    store: &S,
    tick: i32,
    tick_spacing: u32,
    info: &TickInfo,
) -> Result<(), TickError> {
    validate_tick(tick, tick_spacing)?;
    store.write_tick(env, tick, info);
    Ok(())
}
