// Error module for the Tidal CLMM contract

use soroban_sdk::contracterror;
use tidal_accum::AccumError;
use tidal_incentives::IncentiveError;
use tidal_math::MathError;
use tidal_position::PositionError;
use tidal_swap::SwapError;
use tidal_tick::TickError;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ClmmError {
    // Initialization / params (100-199)
    AlreadyInitialized = 100,
    NotInitialized = 101,
    InvalidParams = 102,

    // Pool errors (200-299)
    PoolNotFound = 200,
    /// Both denoms of a pool must differ
    InvalidTokenPair = 201,
    UnauthorizedTickSpacing = 202,
    UnauthorizedSpreadFactor = 203,
    InvalidInitialPrice = 204,

    // Tick and range errors (300-399)
    TickOutOfRange = 300,
    TickNotMultipleOfSpacing = 301,
    TickNotFound = 302,
    InvalidLowerUpperTick = 303,
    InvalidTickSpacing = 304,
    /// Query bound lies behind the start in the walk direction
    InvalidTickBound = 305,

    // Liquidity / position errors (400-499)
    InsufficientLiquidity = 400,
    PositionNotFound = 401,
    ZeroAmounts = 402,
    ZeroLiquidity = 403,
    InsufficientLiquidityCreated = 404,
    AddToLastPositionInPool = 405,
    NegativeAmount = 406,
    LiquidityOverflow = 407,
    /// A pool balance ledger would go negative
    InsufficientPoolBalance = 408,

    // Swap errors (500-599)
    InvalidSwapAmount = 500,
    TokenInDenomNotInPool = 501,
    TokenOutDenomNotInPool = 502,
    DenomDuplicated = 503,
    PriceLimitOutOfRange = 504,
    SwapNoProgress = 505,
    MaxIterationsExceeded = 506,
    AmountLessThanMin = 507,
    AmountGreaterThanMax = 508,

    // Rewards and incentives (600-699)
    AccumDoesNotExist = 600,
    NonPositiveLiquidityForNewPosition = 601,
    InsufficientShares = 602,
    InvalidIncentiveAmount = 603,
    NonPositiveEmissionRate = 604,
    StartTimeTooEarly = 605,
    InvalidMinUptime = 606,
    RewardOverflow = 607,
    IncentiveRecordNotFound = 608,

    // Authorization (700-799)
    Unauthorized = 700,
    NotPositionOwner = 701,

    // Math (800-899)
    MathOverflow = 800,
    DivisionByZero = 801,
    SqrtPriceOutOfRange = 802,
    InvalidSpreadFactor = 803,
}

// ============================================================
// PACKAGE ERROR CONVERSION
// ============================================================

impl From<MathError> for ClmmError {
    fn from(e: MathError) -> Self {
        match e {
            MathError::TickOutOfRange => ClmmError::TickOutOfRange,
            MathError::SqrtPriceOutOfRange => ClmmError::SqrtPriceOutOfRange,
            MathError::Overflow => ClmmError::MathOverflow,
            MathError::DivisionByZero => ClmmError::DivisionByZero,
            MathError::InsufficientLiquidity => ClmmError::InsufficientLiquidity,
            MathError::InvalidSpreadFactor => ClmmError::InvalidSpreadFactor,
        }
    }
}

impl From<TickError> for ClmmError {
    fn from(e: TickError) -> Self {
        match e {
            TickError::TickOutOfRange => ClmmError::TickOutOfRange,
            TickError::TickNotMultipleOfSpacing => ClmmError::TickNotMultipleOfSpacing,
            TickError::TickNotFound => ClmmError::TickNotFound,
            TickError::InvalidTickSpacing => ClmmError::InvalidTickSpacing,
            TickError::LiquidityGrossUnderflow => ClmmError::InsufficientLiquidity,
            TickError::LiquidityOverflow => ClmmError::LiquidityOverflow,
        }
    }
}

impl From<PositionError> for ClmmError {
    fn from(e: PositionError) -> Self {
        match e {
            PositionError::InvalidLowerUpperTick => ClmmError::InvalidLowerUpperTick,
            PositionError::TickNotMultipleOfSpacing => ClmmError::TickNotMultipleOfSpacing,
            PositionError::TickOutOfRange => ClmmError::TickOutOfRange,
            PositionError::InsufficientLiquidity => ClmmError::InsufficientLiquidity,
            PositionError::LiquidityOverflow => ClmmError::LiquidityOverflow,
            PositionError::Math(m) => m.into(),
        }
    }
}

impl From<SwapError> for ClmmError {
    fn from(e: SwapError) -> Self {
        match e {
            SwapError::ZeroAmount => ClmmError::InvalidSwapAmount,
            SwapError::TokenInDenomNotInPool => ClmmError::TokenInDenomNotInPool,
            SwapError::TokenOutDenomNotInPool => ClmmError::TokenOutDenomNotInPool,
            SwapError::DenomDuplicated => ClmmError::DenomDuplicated,
            SwapError::PriceLimitOutOfRange => ClmmError::PriceLimitOutOfRange,
            SwapError::InsufficientLiquidity => ClmmError::InsufficientLiquidity,
            SwapError::SwapNoProgress => ClmmError::SwapNoProgress,
            SwapError::MaxIterationsExceeded => ClmmError::MaxIterationsExceeded,
            SwapError::LiquidityUnderflow => ClmmError::InsufficientLiquidity,
            SwapError::Math(m) => m.into(),
            SwapError::Tick(t) => t.into(),
        }
    }
}

impl From<AccumError> for ClmmError {
    fn from(e: AccumError) -> Self {
        match e {
            AccumError::NonPositiveLiquidityForNewPosition => ClmmError::NonPositiveLiquidityForNewPosition,
            AccumError::InsufficientShares => ClmmError::InsufficientShares,
            AccumError::AccumDoesNotExist => ClmmError::AccumDoesNotExist,
            AccumError::PositionNotFound => ClmmError::PositionNotFound,
            AccumError::Overflow => ClmmError::RewardOverflow,
        }
    }
}

impl From<IncentiveError> for ClmmError {
    fn from(e: IncentiveError) -> Self {
        match e {
            IncentiveError::InvalidIncentiveAmount => ClmmError::InvalidIncentiveAmount,
            IncentiveError::NonPositiveEmissionRate => ClmmError::NonPositiveEmissionRate,
            IncentiveError::StartTimeTooEarly => ClmmError::StartTimeTooEarly,
            IncentiveError::InvalidMinUptime => ClmmError::InvalidMinUptime,
            IncentiveError::AccumDoesNotExist => ClmmError::AccumDoesNotExist,
        }
    }
}
