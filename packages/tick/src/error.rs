/// Failures of the tick store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickError {
    /// Tick outside [MIN_TICK, MAX_TICK]
    TickOutOfRange,
    /// Tick is not a multiple of the pool's spacing
    TickNotMultipleOfSpacing,
    TickNotFound,
    /// Spacing must be positive
    InvalidTickSpacing,
    /// Removing more gross liquidity than the tick holds
    LiquidityGrossUnderflow,
    LiquidityOverflow,
}
