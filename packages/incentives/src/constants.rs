/// Uptime tiers in seconds; tier `i` is accumulator stream `i + 1`
pub const SUPPORTED_UPTIMES: [u64; 6] = [1, 60, 3_600, 86_400, 604_800, 1_209_600];

pub const NUM_UPTIMES: u32 = SUPPORTED_UPTIMES.len() as u32;

/// Accumulator stream holding spread rewards
pub const SPREAD_REWARD_STREAM: u32 = 0;

/// Spread rewards plus one stream per uptime tier
pub const STREAM_COUNT: u32 = NUM_UPTIMES + 1;

/// Stream index of uptime tier `tier`
#[inline]
pub const fn uptime_stream(tier: u32) -> u32 {
    tier + 1
}
