use tidal_math::MathError;

/// Failures of position bookkeeping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionError {
    /// Lower tick must be strictly below the upper tick
    InvalidLowerUpperTick,
    TickNotMultipleOfSpacing,
    TickOutOfRange,
    /// Withdrawal exceeds the position's liquidity, or is not positive
    InsufficientLiquidity,
    LiquidityOverflow,
    Math(MathError),
}

impl From<MathError> for PositionError {
    fn from(e: MathError) -> Self {
        PositionError::Math(e)
    }
}
