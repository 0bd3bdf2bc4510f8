use crate::error::{ARITHMETIC_OVERFLOW, CoreError};
use crate::math::bn::checked_mul_div_round_up;
use crate::math::token_math::{
    AmountDeltaU64, get_next_sqrt_price, try_get_amount_delta_a, try_get_amount_delta_b,
};

// Fee rate is a numerator over 10^6 (hundredths of a basis point).
pub const FEE_RATE_MUL_VALUE: u128 = 1_000_000;

// Max fee rate supported is 6%.
pub const MAX_FEE_RATE: u16 = 60_000;

#[derive(PartialEq, Debug)]
pub struct SwapStepComputation {
    pub amount_in: u64,
    pub amount_out: u64,
    pub next_price: u128,
    pub fee_amount: u64,
}

/// One step of the swap loop: moves the price from `sqrt_price_current`
/// towards `sqrt_price_target`, bounded by `amount_remaining`.
///
/// The fee is charged on the input side. A step that terminates mid-range
/// (the amount runs out first) deducts `ceil(remaining * r / (10^6 - r))`
/// from the gross remaining input before moving the price; a step that fully
/// reaches the target charges the same ratio on the consumed fixed delta.
pub fn compute_swap_step(
    amount_remaining: u64,
    fee_rate: u16,
    liquidity: u128,
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<SwapStepComputation, CoreError> {
    // The initial fixed delta may exceed u64 when the target is far away
    // (e.g. a full-range pool with two boundary ticks). Its only purpose is
    // deciding whether this step reaches the target, so an oversized value
    // simply means "it does not".
    let initial_amount_fixed_delta = try_get_amount_fixed_delta(
        sqrt_price_current,
        sqrt_price_target,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?;

    let amount_calc = if amount_specified_is_input {
        let fee_on_remaining: u64 = checked_mul_div_round_up(
            amount_remaining as u128,
            fee_rate as u128,
            FEE_RATE_MUL_VALUE - fee_rate as u128,
        )?
        .try_into()
        .map_err(|_| ARITHMETIC_OVERFLOW)?;
        amount_remaining.saturating_sub(fee_on_remaining)
    } else {
        amount_remaining
    };

    let next_sqrt_price = if initial_amount_fixed_delta.lte(amount_calc) {
        sqrt_price_target
    } else {
        get_next_sqrt_price(
            sqrt_price_current,
            liquidity,
            amount_calc,
            amount_specified_is_input,
            a_to_b,
        )?
    };

    let is_max_swap = next_sqrt_price == sqrt_price_target;

    let amount_unfixed_delta = get_amount_unfixed_delta(
        sqrt_price_current,
        next_sqrt_price,
        liquidity,
        amount_specified_is_input,
        a_to_b,
    )?;

    // If the swap did not reach the target, readjust the fixed amount to the
    // price actually reached.
    let amount_fixed_delta = if !is_max_swap || initial_amount_fixed_delta.exceeds_max() {
        try_get_amount_fixed_delta(
            sqrt_price_current,
            next_sqrt_price,
            liquidity,
            amount_specified_is_input,
            a_to_b,
        )?
        .value()?
    } else {
        initial_amount_fixed_delta.value()?
    };

    let (amount_in, mut amount_out) = if amount_specified_is_input {
        (amount_fixed_delta, amount_unfixed_delta)
    } else {
        (amount_unfixed_delta, amount_fixed_delta)
    };

    // Cap output amount if using output
    if !amount_specified_is_input && amount_out > amount_remaining {
        amount_out = amount_remaining;
    }

    let fee_amount = if amount_specified_is_input {
        if is_max_swap {
            checked_mul_div_round_up(
                amount_in as u128,
                fee_rate as u128,
                FEE_RATE_MUL_VALUE - fee_rate as u128,
            )?
            .try_into()
            .map_err(|_| ARITHMETIC_OVERFLOW)?
        } else {
            // whatever the curve did not consume is the fee, including rounding dust
            amount_remaining - amount_in
        }
    } else {
        checked_mul_div_round_up(amount_in as u128, fee_rate as u128, FEE_RATE_MUL_VALUE)?
            .try_into()
            .map_err(|_| ARITHMETIC_OVERFLOW)?
    };

    Ok(SwapStepComputation {
        amount_in,
        amount_out,
        next_price: next_sqrt_price,
        fee_amount,
    })
}

fn try_get_amount_fixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<AmountDeltaU64, CoreError> {
    if a_to_b == amount_specified_is_input {
        try_get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    } else {
        try_get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            amount_specified_is_input,
        )
    }
}

fn get_amount_unfixed_delta(
    sqrt_price_current: u128,
    sqrt_price_target: u128,
    liquidity: u128,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u64, CoreError> {
    if a_to_b == amount_specified_is_input {
        try_get_amount_delta_b(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )?
        .value()
    } else {
        try_get_amount_delta_a(
            sqrt_price_current,
            sqrt_price_target,
            liquidity,
            !amount_specified_is_input,
        )?
        .value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::tick_index_to_sqrt_price;
    use crate::math::token_math::get_amount_delta_b;

    #[test]
    fn test_mid_step_fee_on_gross_input() {
        // 1,000,000 in at 3000 ppm: fee = ceil(1e6 * 3000 / 997000) = 3010,
        // and the curve consumes the remaining 996,990.
        let liquidity = u64::MAX as u128;
        let current = tick_index_to_sqrt_price(0);
        let target = tick_index_to_sqrt_price(-443_000);

        let step = compute_swap_step(1_000_000, 3000, liquidity, current, target, true, true)
            .unwrap();

        assert_ne!(step.next_price, target);
        assert_eq!(step.amount_in + step.fee_amount, 1_000_000);
        assert_eq!(step.fee_amount, 3_010);
        assert_eq!(
            step.amount_out,
            get_amount_delta_b(current, step.next_price, liquidity, false).unwrap()
        );
    }

    #[test]
    fn test_max_swap_reaches_target() {
        let liquidity = 1_000_000_000u128;
        let current = tick_index_to_sqrt_price(0);
        let target = tick_index_to_sqrt_price(-1);

        // far more input than the range needs
        let step = compute_swap_step(u64::MAX / 2, 3000, liquidity, current, target, true, true)
            .unwrap();
        assert_eq!(step.next_price, target);
        // fee charged on the consumed delta at r / (1 - r)
        let expected_fee = checked_mul_div_round_up(
            step.amount_in as u128,
            3000,
            FEE_RATE_MUL_VALUE - 3000,
        )
        .unwrap() as u64;
        assert_eq!(step.fee_amount, expected_fee);
    }

    #[test]
    fn test_zero_fee_consumes_everything() {
        let liquidity = u64::MAX as u128;
        let current = tick_index_to_sqrt_price(0);
        let target = tick_index_to_sqrt_price(-443_000);

        let step =
            compute_swap_step(1_000_000, 0, liquidity, current, target, true, true).unwrap();
        assert_eq!(step.fee_amount + step.amount_in, 1_000_000);
        assert_eq!(step.amount_in, 1_000_000);
    }

    #[test]
    fn test_output_specified_caps_amount_out() {
        let liquidity = u64::MAX as u128;
        let current = tick_index_to_sqrt_price(0);
        let target = tick_index_to_sqrt_price(-443_000);

        let step =
            compute_swap_step(50_000, 3000, liquidity, current, target, false, true).unwrap();
        assert!(step.amount_out <= 50_000);
        assert!(step.amount_in > 0);
        assert!(step.fee_amount > 0);
    }
}
