use crate::error::{ARITHMETIC_OVERFLOW, CoreError, DIVIDE_BY_ZERO};
use crate::math::bn::U256;

/// Adds a signed liquidity delta to an unsigned liquidity amount.
pub fn add_liquidity_delta(liquidity: u128, delta: i128) -> Result<u128, CoreError> {
    if delta == 0 {
        return Ok(liquidity);
    }
    if delta > 0 {
        liquidity
            .checked_add(delta as u128)
            .ok_or(ARITHMETIC_OVERFLOW)
    } else {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(ARITHMETIC_OVERFLOW)
    }
}

// Inverse of the token A delta:
// liquidity = amount * sqrt_price_lower * sqrt_price_upper
//               / (sqrt_price_upper - sqrt_price_lower) / 2^64
pub fn get_liquidity_from_token_a(
    amount: u64,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> Result<u128, CoreError> {
    if sqrt_price_upper <= sqrt_price_lower {
        return Err(DIVIDE_BY_ZERO);
    }
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    let product = U256::from(amount)
        .checked_mul(U256::from(sqrt_price_lower))
        .ok_or(ARITHMETIC_OVERFLOW)?
        .checked_mul(U256::from(sqrt_price_upper))
        .ok_or(ARITHMETIC_OVERFLOW)?;

    ((product / U256::from(sqrt_price_diff)) >> 64).try_into_u128()
}

// Inverse of the token B delta:
// liquidity = amount * 2^64 / (sqrt_price_upper - sqrt_price_lower)
pub fn get_liquidity_from_token_b(
    amount: u64,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> Result<u128, CoreError> {
    if sqrt_price_upper <= sqrt_price_lower {
        return Err(DIVIDE_BY_ZERO);
    }
    let sqrt_price_diff = sqrt_price_upper - sqrt_price_lower;

    let numerator = U256::from(amount) << 64;
    (numerator / U256::from(sqrt_price_diff)).try_into_u128()
}
