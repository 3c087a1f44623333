// Direction-specific swap behaviour

use tidal_math::{MathError, MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use tidal_tick::Direction;
use crate::error::SwapError;

/// Strategy for walking the price in one direction
pub trait SwapDirection {
    /// Bound used when the caller passes no limit
    fn default_limit(&self) -> u128;

    /// Whether `limit` lies strictly beyond `price` and within bounds
    fn is_valid_limit(&self, price: u128, limit: u128) -> bool;

    /// The nearer of the next tick's price and the limit
    fn clamp_target(&self, tick_price: u128, limit: u128) -> u128;

    /// Liquidity and tick after crossing `tick` whose net is `net`
    fn cross(&self, liquidity: i128, net: i128, tick: i32) -> Result<(i128, i32), SwapError>;

    /// Tick recovered from a price, never regressing past `established`
    fn settle_tick(&self, recovered: i32, established: i32) -> i32;
}

impl SwapDirection for Direction {
    fn default_limit(&self) -> u128 {
        match self {
            Direction::ZeroForOne => MIN_SQRT_PRICE,
            Direction::OneForZero => MAX_SQRT_PRICE,
        }
    }

    fn is_valid_limit(&self, price: u128, limit: u128) -> bool {
        match self {
            Direction::ZeroForOne => limit < price && limit >= MIN_SQRT_PRICE,
            Direction::OneForZero => limit > price && limit <= MAX_SQRT_PRICE,
        }
    }

    fn clamp_target(&self, tick_price: u128, limit: u128) -> u128 {
        match self {
            Direction::ZeroForOne => tick_price.max(limit),
            Direction::OneForZero => tick_price.min(limit),
        }
    }

    fn cross(&self, liquidity: i128, net: i128, tick: i32) -> Result<(i128, i32), SwapError> {
        let crossed = match self {
            Direction::ZeroForOne => liquidity.checked_sub(net).map(|l| (l, tick - 1)),
            Direction::OneForZero => liquidity.checked_add(net).map(|l| (l, tick)),
        };
        crossed.ok_or(SwapError::Math(MathError::Overflow))
    }

    fn settle_tick(&self, recovered: i32, established: i32) -> i32 {
        match self {
            Direction::ZeroForOne => recovered.min(established),
            Direction::OneForZero => recovered.max(established),
        }
    }
}
