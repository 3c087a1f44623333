// Protocol-wide numeric constants

// ============================================================
// TICK CONSTANTS
// ============================================================

/// Minimum valid tick value (price ≈ 2^-64)
///
/// Chosen so every sqrt price fits in 97 bits, which keeps the
/// 256-bit intermediates of the amount formulas in range.
pub const MIN_TICK: i32 = -443636;

/// Maximum valid tick value (price ≈ 2^64)
pub const MAX_TICK: i32 = 443636;

// ============================================================
// SQRT PRICE CONSTANTS (Q64.64 format)
// ============================================================

/// Sqrt price at MIN_TICK
pub const MIN_SQRT_PRICE: u128 = 4295048017;

/// Sqrt price at MAX_TICK
pub const MAX_SQRT_PRICE: u128 = 79226673515401279992447579061;

/// Sqrt price for a 1:1 price ratio (2^64)
pub const SQRT_PRICE_1_1: u128 = 1u128 << 64;

// ============================================================
// SWAP CONSTANTS
// ============================================================

/// Maximum iterations in the swap loop
/// Each iteration crosses at most one initialized tick
pub const MAX_SWAP_ITERATIONS: u32 = 1024;

// ============================================================
// SPREAD FACTOR CONSTANTS
// ============================================================

/// Basis point denominator (100% = 10000 bps)
/// Spread factors must be strictly below this value
pub const BPS_DENOMINATOR: u32 = 10_000;

// ============================================================
// MATH CONSTANTS
// ============================================================

/// Q64 multiplier (2^64), the scaling factor for prices and growth
pub const Q64: u128 = 1u128 << 64;

/// Low 64-bit mask
pub const LO_64: u128 = 0xFFFF_FFFF_FFFF_FFFF;
