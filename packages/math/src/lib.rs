// Tidal Math Package

#![no_std]

pub mod constants;
pub mod error;
pub mod q64;
pub mod sqrt_price;
pub mod liquidity;
pub mod swap_step;

pub use constants::*;
pub use error::MathError;

pub use q64::{
    full_mul,
    mul_shr_128,
    div_wide,
    mul_q64,
    div_q64,
    div_q64_round_up,
    mul_div,
    mul_div_round_up,
    div_round_up,
    shl64_div,
    ONE_X64,
};

pub use sqrt_price::{
    tick_to_sqrt_price,
    sqrt_price_to_tick,
    is_valid_sqrt_price,
    next_sqrt_price_from_input,
    next_sqrt_price_from_output,
};

pub use liquidity::{
    amount0_delta,
    amount1_delta,
    liquidity0,
    liquidity1,
    liquidity_from_amounts,
    amounts_for_liquidity,
};

pub use swap_step::{compute_swap_step_exact_in, compute_swap_step_exact_out, SwapStep};

/// Check that a tick lies on the pool's spacing grid
#[inline]
pub fn is_tick_aligned(tick: i32, spacing: u32) -> bool {
    spacing > 0 && tick.rem_euclid(spacing as i32) == 0
}
