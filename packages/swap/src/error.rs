use tidal_math::MathError;
use tidal_tick::TickError;

/// Failures of the swap engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapError {
    ZeroAmount,
    TokenInDenomNotInPool,
    TokenOutDenomNotInPool,
    /// Token in and token out are the same denom
    DenomDuplicated,
    /// Limit not strictly beyond the current price, or outside the price bounds
    PriceLimitOutOfRange,
    /// No initialized tick left in the swap direction, or an exact-out
    /// amount could not be filled
    InsufficientLiquidity,
    /// A step consumed nothing and moved nothing
    SwapNoProgress,
    MaxIterationsExceeded,
    /// Active liquidity went negative while crossing
    LiquidityUnderflow,
    Math(MathError),
    Tick(TickError),
}

impl From<MathError> for SwapError {
    fn from(e: MathError) -> Self {
        SwapError::Math(e)
    }
}

impl From<TickError> for SwapError {
    fn from(e: TickError) -> Self {
        SwapError::Tick(e)
    }
}
