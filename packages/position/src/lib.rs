#![no_std]

pub mod error;
pub mod types;
pub mod ledger;

pub use error::PositionError;
pub use types::Position;
pub use ledger::{
    apply_liquidity_delta,
    is_active,
    position_amounts,
    validate_position_range,
};
