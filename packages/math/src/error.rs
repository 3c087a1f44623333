/// Failures of the fixed-point math layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MathError {
    /// Tick outside [MIN_TICK, MAX_TICK]
    TickOutOfRange,
    /// Sqrt price outside [MIN_SQRT_PRICE, MAX_SQRT_PRICE]
    SqrtPriceOutOfRange,
    /// Result does not fit the target integer type
    Overflow,
    DivisionByZero,
    /// Removing the requested amount would exhaust the reserve
    InsufficientLiquidity,
    /// Spread factor must be below BPS_DENOMINATOR
    InvalidSpreadFactor,
}
