#![no_std]

pub mod error;
pub mod types;
pub mod store;
pub mod bitmap;
pub mod update;
pub mod growth;

pub use error::TickError;
pub use types::{BitmapLevel, Direction, GrowthSnapshot, TickInfo};
pub use store::{get_tick, set_tick, validate_tick, TickStore};
pub use bitmap::{next_initialized_tick, set_tick_initialized};
pub use update::{cross_tick, crossed_tick_info, update_tick};
pub use growth::{growth_inside, spread_reward_growth_inside, uptime_growth_inside};
