#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Map, Vec};

// External packages
use tidal_accum::AccumulatorRecord;
use tidal_incentives::{validate_create_incentive, IncentiveRecord, STREAM_COUNT};
use tidal_position::{position_amounts, Position};
use tidal_swap::SwapKind;
use tidal_tick::{get_tick, TickInfo};

// Local modules
mod error;
mod events;
mod pool;
mod positions;
mod queries;
mod rewards;
mod storage;
mod swaps;
pub mod types;

pub use error::ClmmError;
use storage::*;
use swaps::AmountBound;
use types::{
    IncentivesCollected, LiquidityDepthWithRange, ModuleParams, Pool, PoolBalances, PositionCreated, SwapResult,
    TickLiquidityNet,
};

fn owned_position(env: &Env, owner: &Address, position_id: u64) -> Result<Position, ClmmError> {
    let position = read_position(env, position_id)?;
    if position.owner != *owner {
        return Err(ClmmError::NotPositionOwner);
    }
    Ok(position)
}

fn position_created(position: &Position, amount0: i128, amount1: i128) -> PositionCreated {
    PositionCreated {
        position_id: position.position_id,
        liquidity: position.liquidity,
        amount0,
        amount1,
        lower_tick: position.lower_tick,
        upper_tick: position.upper_tick,
        join_time: position.join_time,
    }
}

/// Move the difference between what a position change takes in and
/// pays out for one token
fn settle_net(env: &Env, token: &Address, owner: &Address, deposited: i128, withdrawn: i128) {
    if deposited > withdrawn {
        pool::transfer_in(env, token, owner, deposited - withdrawn);
    } else {
        pool::transfer_out(env, token, owner, withdrawn - deposited);
    }
}

#[contract]
pub struct TidalClmm;

#[contractimpl]
impl TidalClmm {
    // ========================================================
    // CONFIGURATION
    // ========================================================

    /// Initialize the module
    ///
    /// # Arguments
    /// * `admin` - Admin address, stored as `params.admin`
    /// * `params` - Authorized tick spacings, spread factors and uptimes
    pub fn initialize(env: Env, admin: Address, params: ModuleParams) -> Result<(), ClmmError> {
        admin.require_auth();

        if is_initialized(&env) {
            return Err(ClmmError::AlreadyInitialized);
        }
        let params = ModuleParams {
            admin: admin.clone(),
            ..params
        };
        pool::validate_params(&params)?;

        write_params(&env, &params);
        events::emit_initialized(&env, &admin);
        Ok(())
    }

    /// Replace module params (admin only)
    pub fn set_params(env: Env, params: ModuleParams) -> Result<(), ClmmError> {
        let current = read_params(&env)?;
        current.admin.require_auth();

        pool::validate_params(&params)?;
        write_params(&env, &params);
        events::emit_params_updated(&env, &params.admin);
        Ok(())
    }

    pub fn get_params(env: Env) -> Result<ModuleParams, ClmmError> {
        read_params(&env)
    }

    // ========================================================
    // POOLS
    // ========================================================

    /// Create a pool at `initial_sqrt_price` (Q64.64)
    ///
    /// Only the admin may create pools unless permissionless creation
    /// is enabled.
    pub fn create_pool(
        env: Env,
        creator: Address,
        token0: Address,
        token1: Address,
        tick_spacing: u32,
        spread_factor_bps: u32,
        initial_sqrt_price: u128,
    ) -> Result<u64, ClmmError> {
        creator.require_auth();

        let params = read_params(&env)?;
        if !params.permissionless_creation && creator != params.admin {
            return Err(ClmmError::Unauthorized);
        }

        let pool = pool::create_pool(
            &env,
            &params,
            token0,
            token1,
            tick_spacing,
            spread_factor_bps,
            initial_sqrt_price,
        )?;

        events::emit_pool_created(
            &env,
            pool.pool_id,
            &creator,
            &pool.token0,
            &pool.token1,
            pool.tick_spacing,
            pool.spread_factor_bps,
            pool.current_sqrt_price,
        );
        Ok(pool.pool_id)
    }

    // ========================================================
    // POSITIONS
    // ========================================================

    /// Open a position over `[lower_tick, upper_tick)`
    ///
    /// Takes as much of the desired amounts as the current price allows,
    /// rounded up.
    pub fn create_position(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
        amount0_desired: i128,
        amount1_desired: i128,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<PositionCreated, ClmmError> {
        owner.require_auth();

        let mut pool = read_pool(&env, pool_id)?;
        let opened = positions::open_position(
            &env,
            &mut pool,
            &owner,
            lower_tick,
            upper_tick,
            amount0_desired,
            amount1_desired,
            amount0_min,
            amount1_min,
        )?;

        pool::transfer_in(&env, &pool.token0, &owner, opened.amount0);
        pool::transfer_in(&env, &pool.token1, &owner, opened.amount1);

        let position = &opened.position;
        events::emit_position_created(
            &env,
            pool_id,
            position.position_id,
            &owner,
            lower_tick,
            upper_tick,
            position.liquidity,
            opened.amount0,
            opened.amount1,
        );
        Ok(position_created(position, opened.amount0, opened.amount1))
    }

    /// Re-create a position with extra principal
    ///
    /// Rewards of the old position are paid out and the new position
    /// gets a new id and join time. Only the net principal moves.
    pub fn add_to_position(
        env: Env,
        owner: Address,
        position_id: u64,
        amount0: i128,
        amount1: i128,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<PositionCreated, ClmmError> {
        owner.require_auth();

        let mut position = owned_position(&env, &owner, position_id)?;
        let mut pool = read_pool(&env, position.pool_id)?;
        let added = positions::add_to_position(
            &env,
            &mut pool,
            &mut position,
            amount0,
            amount1,
            amount0_min,
            amount1_min,
        )?;

        let opened = &added.opened;
        settle_net(&env, &pool.token0, &owner, opened.amount0, added.withdrawn0);
        settle_net(&env, &pool.token1, &owner, opened.amount1, added.withdrawn1);

        events::emit_position_added(&env, pool.pool_id, position_id, opened.position.position_id, &owner);
        Ok(position_created(&opened.position, opened.amount0, opened.amount1))
    }

    /// Withdraw `liquidity` from a position
    ///
    /// Incentives are collected first. Withdrawing everything also pays
    /// spread rewards and deletes the position.
    ///
    /// # Returns
    /// * `(amount0, amount1)` principal paid out, rounded down
    pub fn withdraw_position(
        env: Env,
        owner: Address,
        position_id: u64,
        liquidity: i128,
    ) -> Result<(i128, i128), ClmmError> {
        owner.require_auth();

        let mut position = owned_position(&env, &owner, position_id)?;
        let mut pool = read_pool(&env, position.pool_id)?;
        let withdrawn = positions::withdraw_liquidity(&env, &mut pool, &mut position, liquidity)?;

        pool::transfer_out(&env, &pool.token0, &owner, withdrawn.amount0);
        pool::transfer_out(&env, &pool.token1, &owner, withdrawn.amount1);

        events::emit_position_withdrawn(
            &env,
            pool.pool_id,
            position_id,
            &owner,
            liquidity,
            withdrawn.amount0,
            withdrawn.amount1,
        );
        Ok((withdrawn.amount0, withdrawn.amount1))
    }

    // ========================================================
    // SWAPS
    // ========================================================

    /// Sell exactly `amount_in` of `token_in`
    ///
    /// May fill partially when `sqrt_price_limit` is reached; 0 means no
    /// limit.
    pub fn swap_exact_amount_in(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_in: Address,
        amount_in: i128,
        token_out: Address,
        token_out_min: i128,
        sqrt_price_limit: u128,
    ) -> Result<SwapResult, ClmmError> {
        sender.require_auth();
        swaps::execute_swap(
            &env,
            &sender,
            pool_id,
            &token_in,
            &token_out,
            amount_in,
            SwapKind::ExactIn,
            sqrt_price_limit,
            AmountBound::MinOut(token_out_min),
        )
    }

    /// Buy exactly `amount_out` of `token_out`
    pub fn swap_exact_amount_out(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_in: Address,
        token_in_max: i128,
        token_out: Address,
        amount_out: i128,
    ) -> Result<SwapResult, ClmmError> {
        sender.require_auth();
        swaps::execute_swap(
            &env,
            &sender,
            pool_id,
            &token_in,
            &token_out,
            amount_out,
            SwapKind::ExactOut,
            0,
            AmountBound::MaxIn(token_in_max),
        )
    }

    pub fn quote_exact_amount_in(
        env: Env,
        pool_id: u64,
        token_in: Address,
        amount_in: i128,
        token_out: Address,
    ) -> Result<SwapResult, ClmmError> {
        swaps::quote_swap(&env, pool_id, &token_in, &token_out, amount_in, SwapKind::ExactIn)
    }

    pub fn quote_exact_amount_out(
        env: Env,
        pool_id: u64,
        token_in: Address,
        token_out: Address,
        amount_out: i128,
    ) -> Result<SwapResult, ClmmError> {
        swaps::quote_swap(&env, pool_id, &token_in, &token_out, amount_out, SwapKind::ExactOut)
    }

    // ========================================================
    // REWARDS
    // ========================================================

    pub fn collect_spread_rewards(
        env: Env,
        owner: Address,
        position_id: u64,
    ) -> Result<Map<Address, i128>, ClmmError> {
        owner.require_auth();

        let position = owned_position(&env, &owner, position_id)?;
        let pool = read_pool(&env, position.pool_id)?;
        rewards::collect_spread_rewards(&env, &pool, &position)
    }

    /// Collect incentives of every uptime tier
    ///
    /// Tiers the position is too young for are forfeited to the other
    /// in-range positions, or paid back when there are none.
    pub fn collect_incentives(
        env: Env,
        owner: Address,
        position_id: u64,
    ) -> Result<IncentivesCollected, ClmmError> {
        owner.require_auth();

        let position = owned_position(&env, &owner, position_id)?;
        let mut pool = read_pool(&env, position.pool_id)?;
        rewards::collect_incentives(&env, &mut pool, &position)
    }

    /// Fund an incentive emitting `emission_rate` per second from
    /// `start_time` to positions older than `min_uptime`
    pub fn create_incentive(
        env: Env,
        funder: Address,
        pool_id: u64,
        token: Address,
        amount: i128,
        emission_rate: i128,
        start_time: u64,
        min_uptime: u64,
    ) -> Result<IncentiveRecord, ClmmError> {
        funder.require_auth();

        let params = read_params(&env)?;
        let mut pool = read_pool(&env, pool_id)?;
        validate_create_incentive(
            amount,
            emission_rate,
            start_time,
            min_uptime,
            env.ledger().timestamp(),
            &params.authorized_uptimes,
        )?;

        rewards::sync_incentives(&env, &mut pool)?;
        write_pool(&env, &pool);

        let record = IncentiveRecord {
            incentive_id: next_incentive_id(&env),
            pool_id,
            token: token.clone(),
            remaining: amount,
            emission_rate,
            start_time,
            min_uptime,
        };

        pool::transfer_in(&env, &token, &funder, amount);
        let mut balances = read_balances(&env, pool_id);
        pool::credit_denom(&mut balances.incentives, &token, amount)?;
        write_balances(&env, pool_id, &balances);

        insert_incentive(&env, &record);
        events::emit_incentive_created(&env, &funder, &record);
        Ok(record)
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn get_pool(env: Env, pool_id: u64) -> Result<Pool, ClmmError> {
        read_pool(&env, pool_id)
    }

    pub fn get_pool_balances(env: Env, pool_id: u64) -> Result<PoolBalances, ClmmError> {
        read_pool(&env, pool_id)?;
        Ok(read_balances(&env, pool_id))
    }

    pub fn get_position(env: Env, position_id: u64) -> Result<Position, ClmmError> {
        read_position(&env, position_id)
    }

    /// Positions of `owner` in a pool
    pub fn get_user_positions(env: Env, owner: Address, pool_id: u64) -> Result<Vec<Position>, ClmmError> {
        let mut out = Vec::new(&env);
        for id in read_owner_positions(&env, &owner, pool_id).iter() {
            out.push_back(read_position(&env, id)?);
        }
        Ok(out)
    }

    /// Principal a full withdrawal would return now
    pub fn get_position_amounts(env: Env, position_id: u64) -> Result<(i128, i128), ClmmError> {
        let position = read_position(&env, position_id)?;
        let pool = read_pool(&env, position.pool_id)?;
        let (amount0, amount1) = position_amounts(
            &env,
            &position,
            pool.current_tick,
            pool.current_sqrt_price,
            position.liquidity,
            false,
        )?;
        Ok((pool::to_i128(amount0)?, pool::to_i128(amount1)?))
    }

    pub fn get_tick(env: Env, pool_id: u64, tick: i32) -> Result<TickInfo, ClmmError> {
        read_pool(&env, pool_id)?;
        Ok(get_tick(&env, &PoolTicks::new(pool_id), tick)?)
    }

    pub fn get_liquidity_full_range(
        env: Env,
        pool_id: u64,
    ) -> Result<Vec<LiquidityDepthWithRange>, ClmmError> {
        let pool = read_pool(&env, pool_id)?;
        queries::liquidity_for_full_range(&env, &pool)
    }

    pub fn get_liquidity_net_in_dir(
        env: Env,
        pool_id: u64,
        token_in: Address,
        start_tick: Option<i32>,
        bound_tick: Option<i32>,
    ) -> Result<Vec<TickLiquidityNet>, ClmmError> {
        let pool = read_pool(&env, pool_id)?;
        queries::liquidity_net_in_direction(&env, &pool, &token_in, start_tick, bound_tick)
    }

    /// Spread rewards `collect_spread_rewards` would pay now
    pub fn get_claimable_spread_rewards(env: Env, position_id: u64) -> Result<Map<Address, i128>, ClmmError> {
        let position = read_position(&env, position_id)?;
        let pool = read_pool(&env, position.pool_id)?;
        let claim = rewards::claim_spread_rewards(&env, &pool, &position)?;

        let mut out = Map::new(&env);
        for (token, amount) in claim.payout.iter() {
            out.set(token, pool::to_i128(amount)?);
        }
        Ok(out)
    }

    /// Incentives `collect_incentives` would pay and forfeit now
    pub fn get_claimable_incentives(env: Env, position_id: u64) -> Result<IncentivesCollected, ClmmError> {
        let position = read_position(&env, position_id)?;
        let pool = read_pool(&env, position.pool_id)?;
        let now = env.ledger().timestamp();

        let mut state = rewards::synced_uptime(&env, &pool, now, false)?;
        let claim = rewards::claim_incentives(&env, &pool, &position, &mut state, now, false)?;
        Ok(IncentivesCollected {
            collected: claim.collected,
            forfeited: claim.forfeited,
            returned: claim.returned,
        })
    }

    pub fn get_incentive_records(env: Env, pool_id: u64) -> Result<Vec<IncentiveRecord>, ClmmError> {
        read_pool(&env, pool_id)?;
        read_pool_incentives(&env, pool_id)
    }

    /// Accumulator of one stream: 0 is spread rewards, 1..=6 the uptime
    /// tiers
    pub fn get_accumulator(env: Env, pool_id: u64, stream: u32) -> Result<AccumulatorRecord, ClmmError> {
        if stream >= STREAM_COUNT {
            return Err(ClmmError::AccumDoesNotExist);
        }
        read_accum(&env, pool_id, stream)
    }
}
