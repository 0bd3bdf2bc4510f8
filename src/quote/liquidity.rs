use crate::error::{
    CoreError, INPUT_MINT_MISMATCH, INVALID_TICK_RANGE, TICK_INDEX_OUT_OF_BOUNDS,
};
use crate::math::liquidity_math::{get_liquidity_from_token_a, get_liquidity_from_token_b};
use crate::math::price_math::get_slippage_bound_for_sqrt_price;
use crate::math::tick_math::{MAX_TICK_INDEX, MIN_TICK_INDEX, tick_index_to_sqrt_price};
use crate::math::token_math::{get_amount_delta_a, get_amount_delta_b};
use crate::state::Pool;
use crate::state_math::tick::{
    PositionStatus, get_initializable_tick_index, order_tick_indexes, position_status,
};
use crate::types::Slippage;
use solana_program::pubkey::Pubkey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncreaseLiquidityQuote {
    pub liquidity_delta: u128,
    pub token_est_a: u64,
    pub token_est_b: u64,
    pub token_max_a: u64,
    pub token_max_b: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecreaseLiquidityQuote {
    pub liquidity_delta: u128,
    pub token_est_a: u64,
    pub token_est_b: u64,
    pub token_min_a: u64,
    pub token_min_b: u64,
}

/// Quote a deposit from one input token amount.
///
/// Ticks are snapped to initializable multiples toward the interior of the
/// range before the liquidity is derived. An input on the wrong side of the
/// range yields an all-zero quote (there is nothing to deposit).
pub fn increase_liquidity_quote_by_input_token(
    pool: &Pool,
    input_token_mint: &Pubkey,
    input_token_amount: u64,
    tick_lower_index: i32,
    tick_upper_index: i32,
    slippage: Slippage,
) -> Result<IncreaseLiquidityQuote, CoreError> {
    let tick_lower_index =
        get_initializable_tick_index(tick_lower_index, pool.tick_spacing, Some(true))?;
    let tick_upper_index =
        get_initializable_tick_index(tick_upper_index, pool.tick_spacing, Some(false))?;
    validate_tick_range(tick_lower_index, tick_upper_index)?;

    let input_is_a = if input_token_mint == &pool.token_mint_a {
        true
    } else if input_token_mint == &pool.token_mint_b {
        false
    } else {
        return Err(INPUT_MINT_MISMATCH);
    };

    if input_token_amount == 0 {
        return Ok(IncreaseLiquidityQuote::default());
    }

    let sqrt_price_lower = tick_index_to_sqrt_price(tick_lower_index);
    let sqrt_price_upper = tick_index_to_sqrt_price(tick_upper_index);
    let status = position_status(pool.sqrt_price, tick_lower_index, tick_upper_index);

    let liquidity_delta = match (status, input_is_a) {
        (PositionStatus::PriceBelowRange, true) => {
            get_liquidity_from_token_a(input_token_amount, sqrt_price_lower, sqrt_price_upper)?
        }
        (PositionStatus::PriceInRange, true) => {
            get_liquidity_from_token_a(input_token_amount, pool.sqrt_price, sqrt_price_upper)?
        }
        (PositionStatus::PriceAboveRange, false) => {
            get_liquidity_from_token_b(input_token_amount, sqrt_price_lower, sqrt_price_upper)?
        }
        (PositionStatus::PriceInRange, false) => {
            get_liquidity_from_token_b(input_token_amount, sqrt_price_lower, pool.sqrt_price)?
        }
        // the input token is not needed on this side of the range
        (PositionStatus::PriceBelowRange, false) | (PositionStatus::PriceAboveRange, true) => 0,
    };

    increase_liquidity_quote_by_liquidity(
        pool,
        liquidity_delta,
        tick_lower_index,
        tick_upper_index,
        slippage,
    )
}

/// Quote a deposit for a target liquidity amount. The tick pair may arrive in
/// either order.
///
/// Token maxima come from re-evaluating the estimates at the two price-based
/// slippage bounds: whichever price the pool may legitimately move to within
/// the tolerance, the deposit caps cover it.
pub fn increase_liquidity_quote_by_liquidity(
    pool: &Pool,
    liquidity_delta: u128,
    tick_index_1: i32,
    tick_index_2: i32,
    slippage: Slippage,
) -> Result<IncreaseLiquidityQuote, CoreError> {
    let (tick_lower_index, tick_upper_index) = order_tick_indexes(tick_index_1, tick_index_2);
    validate_tick_range(tick_lower_index, tick_upper_index)?;

    if liquidity_delta == 0 {
        return Ok(IncreaseLiquidityQuote::default());
    }

    let (token_est_a, token_est_b) = token_amounts_from_liquidity(
        liquidity_delta,
        pool.sqrt_price,
        tick_lower_index,
        tick_upper_index,
        true,
    )?;

    let (lower_bound, upper_bound) =
        get_slippage_bound_for_sqrt_price(pool.sqrt_price, slippage)?;
    let (lower_a, lower_b) = token_amounts_from_liquidity(
        liquidity_delta,
        lower_bound.sqrt_price,
        tick_lower_index,
        tick_upper_index,
        true,
    )?;
    let (upper_a, upper_b) = token_amounts_from_liquidity(
        liquidity_delta,
        upper_bound.sqrt_price,
        tick_lower_index,
        tick_upper_index,
        true,
    )?;

    Ok(IncreaseLiquidityQuote {
        liquidity_delta,
        token_est_a,
        token_est_b,
        token_max_a: token_est_a.max(lower_a).max(upper_a),
        token_max_b: token_est_b.max(lower_b).max(upper_b),
    })
}

/// Quote a withdrawal for a target liquidity amount. Mirror image of the
/// increase path: estimates round down and the slippage bounds produce minima.
pub fn decrease_liquidity_quote_by_liquidity(
    pool: &Pool,
    liquidity_delta: u128,
    tick_index_1: i32,
    tick_index_2: i32,
    slippage: Slippage,
) -> Result<DecreaseLiquidityQuote, CoreError> {
    let (tick_lower_index, tick_upper_index) = order_tick_indexes(tick_index_1, tick_index_2);
    validate_tick_range(tick_lower_index, tick_upper_index)?;

    if liquidity_delta == 0 {
        return Ok(DecreaseLiquidityQuote::default());
    }

    let (token_est_a, token_est_b) = token_amounts_from_liquidity(
        liquidity_delta,
        pool.sqrt_price,
        tick_lower_index,
        tick_upper_index,
        false,
    )?;

    let (lower_bound, upper_bound) =
        get_slippage_bound_for_sqrt_price(pool.sqrt_price, slippage)?;
    let (lower_a, lower_b) = token_amounts_from_liquidity(
        liquidity_delta,
        lower_bound.sqrt_price,
        tick_lower_index,
        tick_upper_index,
        false,
    )?;
    let (upper_a, upper_b) = token_amounts_from_liquidity(
        liquidity_delta,
        upper_bound.sqrt_price,
        tick_lower_index,
        tick_upper_index,
        false,
    )?;

    Ok(DecreaseLiquidityQuote {
        liquidity_delta,
        token_est_a,
        token_est_b,
        token_min_a: token_est_a.min(lower_a).min(upper_a),
        token_min_b: token_est_b.min(lower_b).min(upper_b),
    })
}

/// Token amounts backing `liquidity_delta` at a given pool price.
pub fn token_amounts_from_liquidity(
    liquidity_delta: u128,
    sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
    round_up: bool,
) -> Result<(u64, u64), CoreError> {
    let sqrt_price_lower = tick_index_to_sqrt_price(tick_lower_index);
    let sqrt_price_upper = tick_index_to_sqrt_price(tick_upper_index);

    match position_status(sqrt_price, tick_lower_index, tick_upper_index) {
        PositionStatus::PriceBelowRange => Ok((
            get_amount_delta_a(sqrt_price_lower, sqrt_price_upper, liquidity_delta, round_up)?,
            0,
        )),
        PositionStatus::PriceInRange => Ok((
            get_amount_delta_a(sqrt_price, sqrt_price_upper, liquidity_delta, round_up)?,
            get_amount_delta_b(sqrt_price_lower, sqrt_price, liquidity_delta, round_up)?,
        )),
        PositionStatus::PriceAboveRange => Ok((
            0,
            get_amount_delta_b(sqrt_price_lower, sqrt_price_upper, liquidity_delta, round_up)?,
        )),
    }
}

fn validate_tick_range(tick_lower_index: i32, tick_upper_index: i32) -> Result<(), CoreError> {
    if tick_lower_index < MIN_TICK_INDEX || tick_upper_index > MAX_TICK_INDEX {
        return Err(TICK_INDEX_OUT_OF_BOUNDS);
    }
    if tick_lower_index >= tick_upper_index {
        return Err(INVALID_TICK_RANGE);
    }
    Ok(())
}
