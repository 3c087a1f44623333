use soroban_sdk::{contracttype, Address};

/// A liquidity position over `[lower_tick, upper_tick)`
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub position_id: u64,
    pub pool_id: u64,
    pub owner: Address,
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub liquidity: i128,
    /// Ledger timestamp at creation, used for uptime eligibility
    pub join_time: u64,
}

impl Position {
    /// Seconds the position has existed at `now`
    #[inline]
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.join_time)
    }
}
