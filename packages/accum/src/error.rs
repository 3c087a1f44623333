/// Failures of the reward accumulator layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccumError {
    /// A new accumulator position needs a positive liquidity delta
    NonPositiveLiquidityForNewPosition,
    /// Withdrawal larger than the shares held
    InsufficientShares,
    /// No accumulator stored for the requested pool and stream
    AccumDoesNotExist,
    /// No accumulator position stored for the requested position
    PositionNotFound,
    Overflow,
}
