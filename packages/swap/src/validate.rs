// Swap input validation

use soroban_sdk::Address;
use tidal_tick::Direction;
use crate::direction::SwapDirection;
use crate::error::SwapError;

/// Direction of a swap between the pool's two denoms
pub fn resolve_direction(
    token_in: &Address,
    token_out: &Address,
    token0: &Address,
    token1: &Address,
) -> Result<Direction, SwapError> {
    if token_in == token_out {
        return Err(SwapError::DenomDuplicated);
    }
    if token_in != token0 && token_in != token1 {
        return Err(SwapError::TokenInDenomNotInPool);
    }
    if token_out != token0 && token_out != token1 {
        return Err(SwapError::TokenOutDenomNotInPool);
    }
    Ok(if token_in == token0 {
        Direction::ZeroForOne
    } else {
        Direction::OneForZero
    })
}

/// Price limit for a swap; 0 means the global bound in that direction
pub fn resolve_price_limit(
    direction: Direction,
    sqrt_price: u128,
    sqrt_price_limit: u128,
) -> Result<u128, SwapError> {
    let limit = if sqrt_price_limit == 0 {
        direction.default_limit()
    } else {
        sqrt_price_limit
    };
    if !direction.is_valid_limit(sqrt_price, limit) {
        return Err(SwapError::PriceLimitOutOfRange);
    }
    Ok(limit)
}
