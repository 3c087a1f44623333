/// Failures of incentive creation and emission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncentiveError {
    /// Funded amount must be positive
    InvalidIncentiveAmount,
    NonPositiveEmissionRate,
    /// Start time lies in the past
    StartTimeTooEarly,
    /// Uptime is not a supported tier, or not authorized
    InvalidMinUptime,
    /// The pool does not carry one accumulator per uptime tier
    AccumDoesNotExist,
}
