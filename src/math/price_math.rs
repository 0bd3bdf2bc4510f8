use crate::error::{ARITHMETIC_OVERFLOW, CoreError, SQRT_PRICE_OUT_OF_BOUNDS};
use crate::math::bn::{U256, mul_u256};
use crate::math::tick_math::{
    MAX_SQRT_PRICE, MAX_TICK_INDEX, MIN_SQRT_PRICE, sqrt_price_to_tick_index,
    tick_index_to_sqrt_price,
};
use crate::types::Slippage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqrtPriceBound {
    pub sqrt_price: u128,
    pub tick_index: i32,
}

/// Price-faithful slippage bounds for a sqrt price.
///
/// The *price* (not the sqrt price) is scaled by `1 -+ s` and square-rooted
/// back, so both bounds move symmetrically in price space. The lower tick is
/// the floor conversion of the lower bound, the upper tick the ceiling of the
/// upper bound.
pub fn get_slippage_bound_for_sqrt_price(
    sqrt_price: u128,
    slippage: Slippage,
) -> Result<(SqrtPriceBound, SqrtPriceBound), CoreError> {
    if sqrt_price < MIN_SQRT_PRICE || sqrt_price > MAX_SQRT_PRICE {
        return Err(SQRT_PRICE_OUT_OF_BOUNDS);
    }

    // Q128.128; sqrt of this scale is back at Q64.64
    let price_x128 = mul_u256(sqrt_price, sqrt_price);
    let denominator = U256::from(slippage.denominator);

    let scale = |factor: u64| -> Result<u128, CoreError> {
        let scaled = price_x128
            .checked_mul(U256::from(factor))
            .ok_or(ARITHMETIC_OVERFLOW)?
            / denominator;
        let bound = scaled.integer_sqrt().try_into_u128()?;
        Ok(bound.clamp(MIN_SQRT_PRICE, MAX_SQRT_PRICE))
    };

    let lower_sqrt_price = scale(slippage.denominator - slippage.numerator)?;
    let upper_sqrt_price = scale(
        slippage
            .denominator
            .checked_add(slippage.numerator)
            .ok_or(ARITHMETIC_OVERFLOW)?,
    )?;

    let lower_tick_index = sqrt_price_to_tick_index(lower_sqrt_price)?;
    let upper_tick_index = {
        let floor = sqrt_price_to_tick_index(upper_sqrt_price)?;
        if tick_index_to_sqrt_price(floor) < upper_sqrt_price {
            (floor + 1).min(MAX_TICK_INDEX)
        } else {
            floor
        }
    };

    Ok((
        SqrtPriceBound {
            sqrt_price: lower_sqrt_price,
            tick_index: lower_tick_index,
        },
        SqrtPriceBound {
            sqrt_price: upper_sqrt_price,
            tick_index: upper_tick_index,
        },
    ))
}
