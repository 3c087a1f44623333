// Tidal Incentive Scheduler Package

#![no_std]

pub mod constants;
pub mod error;
pub mod types;
pub mod schedule;

pub use constants::*;
pub use error::IncentiveError;
pub use types::{EmissionAnomaly, IncentiveRecord};
pub use schedule::{
    emission_due,
    is_forfeited,
    sync_uptime_accumulators,
    uptime_index,
    validate_create_incentive,
};
