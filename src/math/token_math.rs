use crate::error::{
    AMOUNT_EXCEEDS_MAX_U64, ARITHMETIC_OVERFLOW, CoreError, DIVIDE_BY_ZERO,
    SQRT_PRICE_OUT_OF_BOUNDS,
};
use crate::math::bn::{
    U256, div_round_up_if, div_round_up_if_u256, mul_u256, shift_word_left,
};
use crate::math::tick_math::{MAX_SQRT_PRICE, MIN_SQRT_PRICE, Q64_MASK, Q64_RESOLUTION};

/// A token delta that may not fit in u64. The swap stepper only needs to know
/// whether the delta is below a candidate amount, so an oversized delta is a
/// value, not an error.
#[derive(Debug)]
pub enum AmountDeltaU64 {
    Valid(u64),
    ExceedsMax,
}

impl AmountDeltaU64 {
    pub fn lte(&self, other: u64) -> bool {
        match self {
            AmountDeltaU64::Valid(value) => *value <= other,
            AmountDeltaU64::ExceedsMax => false,
        }
    }

    pub fn exceeds_max(&self) -> bool {
        matches!(self, AmountDeltaU64::ExceedsMax)
    }

    pub fn value(self) -> Result<u64, CoreError> {
        match self {
            AmountDeltaU64::Valid(value) => Ok(value),
            AmountDeltaU64::ExceedsMax => Err(AMOUNT_EXCEEDS_MAX_U64),
        }
    }
}

pub fn increasing_price_order(sqrt_price_0: u128, sqrt_price_1: u128) -> (u128, u128) {
    if sqrt_price_0 > sqrt_price_1 {
        (sqrt_price_1, sqrt_price_0)
    } else {
        (sqrt_price_0, sqrt_price_1)
    }
}

// Change in token A for a change in price:
// delta_a = liquidity * (sqrt_price_upper - sqrt_price_lower)
//             / (sqrt_price_upper * sqrt_price_lower)
pub fn get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, CoreError> {
    try_get_amount_delta_a(sqrt_price_0, sqrt_price_1, liquidity, round_up)?.value()
}

pub fn try_get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<AmountDeltaU64, CoreError> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    let Ok(numerator) = shift_word_left(mul_u256(liquidity, sqrt_price_diff)) else {
        // numerator >= 2^192, far beyond any u64 amount
        return Ok(AmountDeltaU64::ExceedsMax);
    };
    let denominator = mul_u256(sqrt_price_upper, sqrt_price_lower);

    match div_round_up_if_u256(numerator, denominator, round_up) {
        Ok(result) if result <= u64::MAX as u128 => Ok(AmountDeltaU64::Valid(result as u64)),
        Ok(_) => Ok(AmountDeltaU64::ExceedsMax),
        Err(ARITHMETIC_OVERFLOW) => Ok(AmountDeltaU64::ExceedsMax),
        Err(error) => Err(error),
    }
}

// Change in token B for a change in price:
// delta_b = liquidity * (sqrt_price_upper - sqrt_price_lower)
pub fn get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, CoreError> {
    try_get_amount_delta_b(sqrt_price_0, sqrt_price_1, liquidity, round_up)?.value()
}

pub fn try_get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<AmountDeltaU64, CoreError> {
    let (sqrt_price_lower, sqrt_price_upper) = increasing_price_order(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    if liquidity == 0 || sqrt_price_diff == 0 {
        return Ok(AmountDeltaU64::Valid(0));
    }

    let Some(product) = liquidity.checked_mul(sqrt_price_diff) else {
        // The shifted-down result is at least 2^64, so it cannot fit either.
        return Ok(AmountDeltaU64::ExceedsMax);
    };

    let result = (product >> Q64_RESOLUTION) as u64;
    let should_round = round_up && (product & Q64_MASK) > 0;
    if should_round && result == u64::MAX {
        return Ok(AmountDeltaU64::ExceedsMax);
    }

    Ok(AmountDeltaU64::Valid(if should_round {
        result + 1
    } else {
        result
    }))
}

// Price movement for a fixed amount of token A. Derived from
// 1/sqrt_price_next = amount/liquidity + 1/sqrt_price, giving
// sqrt_price_next = (liquidity * sqrt_price) / (liquidity +- amount * sqrt_price).
// Rounds up so a fixed input is never exceeded and a fixed output is always met.
pub fn get_next_sqrt_price_from_a_round_up(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128, CoreError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }

    let product = mul_u256(sqrt_price, amount as u128);
    let numerator = shift_word_left(mul_u256(liquidity, sqrt_price))?;

    let liquidity_shifted = U256::from(liquidity) << 64;
    if !amount_specified_is_input && liquidity_shifted <= product {
        return Err(DIVIDE_BY_ZERO);
    }

    let denominator = if amount_specified_is_input {
        liquidity_shifted + product
    } else {
        liquidity_shifted - product
    };

    let price = div_round_up_if_u256(numerator, denominator, true)?;
    if price < MIN_SQRT_PRICE || price > MAX_SQRT_PRICE {
        return Err(SQRT_PRICE_OUT_OF_BOUNDS);
    }

    Ok(price)
}

// Price movement for a fixed amount of token B:
// sqrt_price_next = sqrt_price +- amount / liquidity.
// Rounds down, so the delta is floored when adding and ceiled when removing.
pub fn get_next_sqrt_price_from_b_round_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
) -> Result<u128, CoreError> {
    let amount_x64 = (amount as u128) << Q64_RESOLUTION;
    let delta = div_round_up_if(amount_x64, liquidity, !amount_specified_is_input)?;

    if amount_specified_is_input {
        sqrt_price.checked_add(delta).ok_or(SQRT_PRICE_OUT_OF_BOUNDS)
    } else {
        sqrt_price.checked_sub(delta).ok_or(SQRT_PRICE_OUT_OF_BOUNDS)
    }
}

/// Next sqrt price after trading `amount` of the fixed token.
///
/// The fixed token is A when `amount_specified_is_input == a_to_b` (input A or
/// output A), otherwise B. Fixing A rounds the price up; fixing B rounds it
/// down. Both directions keep the user side of the rounding.
pub fn get_next_sqrt_price(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    amount_specified_is_input: bool,
    a_to_b: bool,
) -> Result<u128, CoreError> {
    if amount_specified_is_input == a_to_b {
        get_next_sqrt_price_from_a_round_up(
            sqrt_price,
            liquidity,
            amount,
            amount_specified_is_input,
        )
    } else {
        get_next_sqrt_price_from_b_round_down(
            sqrt_price,
            liquidity,
            amount,
            amount_specified_is_input,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::{ONE_Q64, tick_index_to_sqrt_price};

    #[test]
    fn test_amount_delta_b_is_linear_in_liquidity() {
        let lower = tick_index_to_sqrt_price(-64);
        let upper = tick_index_to_sqrt_price(64);
        let one = get_amount_delta_b(lower, upper, 1_000_000, false).unwrap();
        let two = get_amount_delta_b(lower, upper, 2_000_000, false).unwrap();
        assert!(one > 0);
        assert!(two >= 2 * one && two <= 2 * one + 1);
    }

    #[test]
    fn test_amount_delta_rounding() {
        let lower = tick_index_to_sqrt_price(-10);
        let upper = tick_index_to_sqrt_price(10);
        let down = get_amount_delta_a(lower, upper, 1_000_000, false).unwrap();
        let up = get_amount_delta_a(lower, upper, 1_000_000, true).unwrap();
        assert!(up == down || up == down + 1);
        assert_eq!(get_amount_delta_a(lower, lower, 1_000_000, true).unwrap(), 0);
    }

    #[test]
    fn test_amount_delta_exceeds_max() {
        let delta = try_get_amount_delta_b(
            tick_index_to_sqrt_price(0),
            tick_index_to_sqrt_price(443_000),
            u128::MAX / 2,
            false,
        )
        .unwrap();
        assert!(delta.exceeds_max());
        assert!(!delta.lte(u64::MAX));
    }

    #[test]
    fn test_next_sqrt_price_directions() {
        let liquidity = 1_000_000_000u128;

        // adding A pushes the price down
        let next = get_next_sqrt_price(ONE_Q64, liquidity, 1_000, true, true).unwrap();
        assert!(next < ONE_Q64);

        // adding B pushes the price up
        let next = get_next_sqrt_price(ONE_Q64, liquidity, 1_000, true, false).unwrap();
        assert!(next > ONE_Q64);

        // zero amount of A leaves the price unchanged
        let next = get_next_sqrt_price(ONE_Q64, liquidity, 0, true, true).unwrap();
        assert_eq!(next, ONE_Q64);
    }

    #[test]
    fn test_next_sqrt_price_from_a_inverts_delta() {
        let liquidity = 5_000_000_000u128;
        let start = tick_index_to_sqrt_price(100);
        let next = get_next_sqrt_price_from_a_round_up(start, liquidity, 12_345, true).unwrap();
        // the amount needed to move back covers the input, up to rounding
        let recovered = get_amount_delta_a(next, start, liquidity, false).unwrap();
        assert!(recovered <= 12_345);
        assert!(recovered >= 12_343);
    }

    #[test]
    fn test_next_sqrt_price_from_b_output_exhausts_liquidity() {
        // removing more B than the pool holds has no valid price
        let result = get_next_sqrt_price_from_b_round_down(ONE_Q64, 10, u64::MAX, false);
        assert!(result.is_err());
    }
}
