use soroban_sdk::{testutils::Address as _, Address, Env};
use tidal_math::{MathError, MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use tidal_swap::*;

#[test]
fn test_resolve_direction() {
    let env = Env::default();
    let token0 = Address::generate(&env);
    let token1 = Address::generate(&env);
    let other = Address::generate(&env);

    assert_eq!(resolve_direction(&token0, &token1, &token0, &token1), Ok(Direction::ZeroForOne));
    assert_eq!(resolve_direction(&token1, &token0, &token0, &token1), Ok(Direction::OneForZero));

    assert_eq!(
        resolve_direction(&token0, &token0, &token0, &token1),
        Err(SwapError::DenomDuplicated)
    );
    assert_eq!(
        resolve_direction(&other, &token1, &token0, &token1),
        Err(SwapError::TokenInDenomNotInPool)
    );
    assert_eq!(
        resolve_direction(&token0, &other, &token0, &token1),
        Err(SwapError::TokenOutDenomNotInPool)
    );
}

#[test]
fn test_resolve_price_limit() {
    let price = 1u128 << 64;

    assert_eq!(resolve_price_limit(Direction::ZeroForOne, price, 0), Ok(MIN_SQRT_PRICE));
    assert_eq!(resolve_price_limit(Direction::OneForZero, price, 0), Ok(MAX_SQRT_PRICE));
    assert_eq!(resolve_price_limit(Direction::ZeroForOne, price, price - 1), Ok(price - 1));

    for (direction, limit) in [
        (Direction::ZeroForOne, price),
        (Direction::ZeroForOne, price + 1),
        (Direction::ZeroForOne, MIN_SQRT_PRICE - 1),
        (Direction::OneForZero, price),
        (Direction::OneForZero, price - 1),
        (Direction::OneForZero, MAX_SQRT_PRICE + 1),
    ] {
        assert_eq!(
            resolve_price_limit(direction, price, limit),
            Err(SwapError::PriceLimitOutOfRange)
        );
    }
}

#[test]
fn test_price_at_bound_has_no_room() {
    assert_eq!(
        resolve_price_limit(Direction::ZeroForOne, MIN_SQRT_PRICE, 0),
        Err(SwapError::PriceLimitOutOfRange)
    );
    assert_eq!(
        resolve_price_limit(Direction::OneForZero, MAX_SQRT_PRICE, 0),
        Err(SwapError::PriceLimitOutOfRange)
    );
}

#[test]
fn test_cross_applies_net_by_direction() {
    assert_eq!(Direction::OneForZero.cross(100, 40, 60), Ok((140, 60)));
    assert_eq!(Direction::ZeroForOne.cross(100, 40, 60), Ok((60, 59)));
}

#[test]
fn test_cross_overflow_is_an_error() {
    assert_eq!(
        Direction::OneForZero.cross(i128::MAX, 1, 10),
        Err(SwapError::Math(MathError::Overflow))
    );
    assert_eq!(
        Direction::ZeroForOne.cross(i128::MIN + 1, 2, 10),
        Err(SwapError::Math(MathError::Overflow))
    );
}
