// Uptime Incentive Scheduling
//
// Records emit `emission_rate` tokens per second from `start_time` until
// `remaining` runs out. Emissions are folded lazily into the pool's uptime
// accumulators whenever pool state is touched.

use soroban_sdk::Vec;
use tidal_accum::{redeposit, AccumulatorRecord, GrowthDelta};
use crate::constants::SUPPORTED_UPTIMES;
use crate::error::IncentiveError;
use crate::types::{EmissionAnomaly, IncentiveRecord};

/// Tier index of a supported uptime
pub fn uptime_index(min_uptime: u64) -> Option<u32> {
    SUPPORTED_UPTIMES
        .iter()
        .position(|u| *u == min_uptime)
        .map(|i| i as u32)
}

/// Check the parameters of a new incentive
///
/// Returns the tier index of `min_uptime`.
pub fn validate_create_incentive(
    amount: i128,
    emission_rate: i128,
    start_time: u64,
    min_uptime: u64,
    now: u64,
    authorized_uptimes: &Vec<u64>,
) -> Result<u32, IncentiveError> {
    if amount <= 0 {
        return Err(IncentiveError::InvalidIncentiveAmount);
    }
    if emission_rate <= 0 {
        return Err(IncentiveError::NonPositiveEmissionRate);
    }
    if start_time < now {
        return Err(IncentiveError::StartTimeTooEarly);
    }
    let tier = uptime_index(min_uptime).ok_or(IncentiveError::InvalidMinUptime)?;
    if !authorized_uptimes.contains(min_uptime) {
        return Err(IncentiveError::InvalidMinUptime);
    }
    Ok(tier)
}

/// Tokens a record emits between `last_update` and `now`
///
/// Emission never starts before `start_time` and never exceeds
/// `remaining`.
pub fn emission_due(record: &IncentiveRecord, last_update: u64, now: u64) -> i128 {
    if record.remaining <= 0 || record.start_time >= now {
        return 0;
    }
    let from = record.start_time.max(last_update);
    if from >= now {
        return 0;
    }
    let elapsed = (now - from) as i128;
    record
        .emission_rate
        .checked_mul(elapsed)
        .map_or(record.remaining, |due| due.min(record.remaining))
}

/// Fold emissions since `last_update` into the uptime accumulators
///
/// `accums[i]` is the accumulator of tier `i`. `on_anomaly` is called for
/// every emission that produced no growth; with zero active liquidity the
/// record keeps its tokens, otherwise `remaining` is still decremented.
pub fn sync_uptime_accumulators<F>(
    records: &mut Vec<IncentiveRecord>,
    accums: &mut Vec<AccumulatorRecord>,
    liquidity: u128,
    last_update: u64,
    now: u64,
    mut on_anomaly: F,
) -> Result<(), IncentiveError>
where
    F: FnMut(EmissionAnomaly),
{
    if now <= last_update {
        return Ok(());
    }
    if accums.len() != SUPPORTED_UPTIMES.len() as u32 {
        return Err(IncentiveError::AccumDoesNotExist);
    }

    for i in 0..records.len() {
        let Some(mut record) = records.get(i) else {
            continue;
        };
        let emitted = emission_due(&record, last_update, now);
        if emitted == 0 {
            continue;
        }
        let Some(tier) = uptime_index(record.min_uptime) else {
            continue;
        };
        let Some(mut accum) = accums.get(tier) else {
            continue;
        };

        let incentive_id = record.incentive_id;
        match redeposit(&mut accum, &record.token, emitted as u128, liquidity) {
            GrowthDelta::Value(_) => {}
            GrowthDelta::NoLiquidity => {
                on_anomaly(EmissionAnomaly::ZeroLiquidity { incentive_id, amount: emitted });
                continue;
            }
            GrowthDelta::Truncated => {
                on_anomaly(EmissionAnomaly::Truncated { incentive_id, amount: emitted });
            }
            GrowthDelta::Overflow => {
                on_anomaly(EmissionAnomaly::Overflow { incentive_id, amount: emitted });
            }
        }

        record.remaining -= emitted;
        records.set(i, record);
        accums.set(tier, accum);
    }
    Ok(())
}

/// Whether uptime rewards of `tier` are forfeited at `position_age`
#[inline]
pub fn is_forfeited(position_age: u64, tier: u32) -> bool {
    SUPPORTED_UPTIMES
        .get(tier as usize)
        .map_or(true, |min_uptime| position_age < *min_uptime)
}
