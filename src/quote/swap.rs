use crate::error::{
    ARITHMETIC_OVERFLOW, CoreError, INSUFFICIENT_TICK_ARRAYS,
    INVALID_SQRT_PRICE_LIMIT_DIRECTION, SQRT_PRICE_LIMIT_OUT_OF_BOUNDS, ZERO_LIQUIDITY,
    ZERO_TRADABLE_AMOUNT,
};
use crate::math::liquidity_math::add_liquidity_delta;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{
    MAX_SQRT_PRICE, MIN_SQRT_PRICE, sqrt_price_to_tick_index, tick_index_to_sqrt_price,
};
use crate::state::Pool;
use crate::state::tick::Tick;
use crate::state::tick_array::TickArrays;
use crate::state_math::tick_array::TickArraySequence;
use crate::types::Slippage;

#[derive(Debug, Clone)]
pub struct SwapQuoteParams {
    pub pool: Pool,
    pub amount_specified: u64,
    pub a_to_b: bool,
    pub amount_specified_is_input: bool,
    /// Optional price stop. Reaching it is a partial fill, not an error.
    pub sqrt_price_limit: Option<u128>,
    pub tick_arrays: TickArrays,
    pub slippage: Slippage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapQuote {
    /// Total input including fees.
    pub estimated_amount_in: u64,
    pub estimated_amount_out: u64,
    pub estimated_fee_amount: u64,
    pub sqrt_price_end: u128,
    pub tick_index_end: i32,
    /// Slippage-adjusted bound on the unspecified side: a floor on the output
    /// when the input is specified, a cap on the input otherwise.
    pub other_amount_threshold: u64,
}

/// Simulate a single-pool swap against a three-array tick window.
///
/// The loop keeps `(sqrt_price, tick, liquidity, remaining, calculated, fees)`
/// and advances one initialized tick (or the price limit) per step. Crossing a
/// tick is the only place liquidity changes.
pub fn swap_quote(params: SwapQuoteParams) -> Result<SwapQuote, CoreError> {
    let SwapQuoteParams {
        pool,
        amount_specified,
        a_to_b,
        amount_specified_is_input,
        sqrt_price_limit,
        tick_arrays,
        slippage,
    } = params;

    if amount_specified == 0 {
        return Err(ZERO_TRADABLE_AMOUNT);
    }

    let tick_sequence = TickArraySequence::new(tick_arrays.into_array(), pool.tick_spacing)?;

    // The window boundary caps how far any swap can travel; a user limit may
    // only tighten it.
    let boundary_tick = if a_to_b {
        tick_sequence.start_index()
    } else {
        tick_sequence.end_index()
    };
    let boundary_sqrt_price = tick_index_to_sqrt_price(boundary_tick);

    let effective_limit = match sqrt_price_limit {
        Some(limit) => {
            if limit < MIN_SQRT_PRICE || limit > MAX_SQRT_PRICE {
                return Err(SQRT_PRICE_LIMIT_OUT_OF_BOUNDS);
            }
            if (a_to_b && limit >= pool.sqrt_price) || (!a_to_b && limit <= pool.sqrt_price) {
                return Err(INVALID_SQRT_PRICE_LIMIT_DIRECTION);
            }
            if a_to_b {
                limit.max(boundary_sqrt_price)
            } else {
                limit.min(boundary_sqrt_price)
            }
        }
        None => boundary_sqrt_price,
    };

    let mut amount_remaining = amount_specified;
    let mut amount_calculated: u64 = 0;
    let mut current_sqrt_price = pool.sqrt_price;
    let mut current_tick_index = pool.tick_current_index;
    let mut current_liquidity = pool.liquidity;
    let mut fee_total: u64 = 0;

    while amount_remaining > 0 && current_sqrt_price != effective_limit {
        let (next_tick, next_tick_index) = if a_to_b {
            tick_sequence.prev_initialized_tick(current_tick_index)?
        } else {
            tick_sequence.next_initialized_tick(current_tick_index)?
        };
        let next_tick_sqrt_price = tick_index_to_sqrt_price(next_tick_index);
        let target_sqrt_price = if a_to_b {
            next_tick_sqrt_price.max(effective_limit)
        } else {
            next_tick_sqrt_price.min(effective_limit)
        };

        let step = compute_swap_step(
            amount_remaining,
            pool.fee_rate,
            current_liquidity,
            current_sqrt_price,
            target_sqrt_price,
            amount_specified_is_input,
            a_to_b,
        )?;

        fee_total = fee_total
            .checked_add(step.fee_amount)
            .ok_or(ARITHMETIC_OVERFLOW)?;

        if amount_specified_is_input {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_in)
                .ok_or(ARITHMETIC_OVERFLOW)?
                .checked_sub(step.fee_amount)
                .ok_or(ARITHMETIC_OVERFLOW)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_out)
                .ok_or(ARITHMETIC_OVERFLOW)?;
        } else {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_out)
                .ok_or(ARITHMETIC_OVERFLOW)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_in)
                .ok_or(ARITHMETIC_OVERFLOW)?
                .checked_add(step.fee_amount)
                .ok_or(ARITHMETIC_OVERFLOW)?;
        }

        if step.next_price == next_tick_sqrt_price {
            current_liquidity = next_liquidity(current_liquidity, next_tick, a_to_b)?;
            current_tick_index = if a_to_b {
                next_tick_index - 1
            } else {
                next_tick_index
            };
        } else if step.next_price != current_sqrt_price {
            current_tick_index = sqrt_price_to_tick_index(step.next_price)?;
        }

        current_sqrt_price = step.next_price;
    }

    if amount_remaining > 0 && sqrt_price_limit != Some(current_sqrt_price) {
        // ran out of window, not stopped by the caller's own limit
        if current_liquidity == 0 && amount_calculated == 0 {
            return Err(ZERO_LIQUIDITY);
        }
        return Err(INSUFFICIENT_TICK_ARRAYS);
    }

    let swapped_amount = amount_specified - amount_remaining;
    let (estimated_amount_in, estimated_amount_out) = if amount_specified_is_input {
        (swapped_amount, amount_calculated)
    } else {
        (amount_calculated, swapped_amount)
    };

    let other_amount_threshold = if amount_specified_is_input {
        slippage.apply_down(estimated_amount_out)
    } else {
        slippage.apply_up(estimated_amount_in)?
    };

    Ok(SwapQuote {
        estimated_amount_in,
        estimated_amount_out,
        estimated_fee_amount: fee_total,
        sqrt_price_end: current_sqrt_price,
        tick_index_end: current_tick_index,
        other_amount_threshold,
    })
}

fn next_liquidity(
    current_liquidity: u128,
    next_tick: Option<&Tick>,
    a_to_b: bool,
) -> Result<u128, CoreError> {
    let liquidity_net = next_tick.map(|tick| tick.liquidity_net).unwrap_or(0);
    let delta = if a_to_b {
        liquidity_net.checked_neg().ok_or(ARITHMETIC_OVERFLOW)?
    } else {
        liquidity_net
    };
    add_liquidity_delta(current_liquidity, delta)
}
