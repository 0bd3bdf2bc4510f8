#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use crate::error::{AMOUNT_EXCEEDS_MAX_U64, ARITHMETIC_OVERFLOW, CoreError, DIVIDE_BY_ZERO};
use uint::construct_uint;

construct_uint! {
    // U256 of [u64; 4]
    pub struct U256(4);
}

impl U256 {
    pub fn try_into_u64(self) -> Result<u64, CoreError> {
        u64::try_from(self).map_err(|_| AMOUNT_EXCEEDS_MAX_U64)
    }

    pub fn try_into_u128(self) -> Result<u128, CoreError> {
        u128::try_from(self).map_err(|_| ARITHMETIC_OVERFLOW)
    }
}

/// Widening u128 multiplication. (2^128 - 1)^2 fits in 256 bits, so this
/// never overflows.
pub fn mul_u256(n0: u128, n1: u128) -> U256 {
    U256::from(n0) * U256::from(n1)
}

/// Shift a U256 left by one Q64.64 word, erroring when high bits would be lost.
pub fn shift_word_left(value: U256) -> Result<U256, CoreError> {
    if value.leading_zeros() < 64 {
        return Err(ARITHMETIC_OVERFLOW);
    }
    Ok(value << 64)
}

pub fn div_round_up_if(n: u128, d: u128, round_up: bool) -> Result<u128, CoreError> {
    if d == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    let quotient = n / d;
    if round_up && n % d != 0 {
        quotient.checked_add(1).ok_or(ARITHMETIC_OVERFLOW)
    } else {
        Ok(quotient)
    }
}

pub fn div_round_up_if_u256(n: U256, d: U256, round_up: bool) -> Result<u128, CoreError> {
    if d.is_zero() {
        return Err(DIVIDE_BY_ZERO);
    }
    let quotient = n / d;
    let result = if round_up && !(n % d).is_zero() {
        quotient + U256::one()
    } else {
        quotient
    };
    result.try_into_u128()
}

pub fn checked_mul_div(n0: u128, n1: u128, d: u128) -> Result<u128, CoreError> {
    checked_mul_div_round_up_if(n0, n1, d, false)
}

pub fn checked_mul_div_round_up(n0: u128, n1: u128, d: u128) -> Result<u128, CoreError> {
    checked_mul_div_round_up_if(n0, n1, d, true)
}

pub fn checked_mul_div_round_up_if(
    n0: u128,
    n1: u128,
    d: u128,
    round_up: bool,
) -> Result<u128, CoreError> {
    div_round_up_if_u256(mul_u256(n0, n1), U256::from(d), round_up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_u256_widens() {
        let product = mul_u256(u128::MAX, u128::MAX);
        assert_eq!(product, U256::from(u128::MAX) * U256::from(u128::MAX));
        assert!(product.try_into_u128().is_err());
    }

    #[test]
    fn test_div_round_up_if() {
        assert_eq!(div_round_up_if(10, 3, false).unwrap(), 3);
        assert_eq!(div_round_up_if(10, 3, true).unwrap(), 4);
        assert_eq!(div_round_up_if(9, 3, true).unwrap(), 3);
        assert_eq!(div_round_up_if(1, 0, true), Err(DIVIDE_BY_ZERO));
    }

    #[test]
    fn test_checked_mul_div() {
        assert_eq!(checked_mul_div(6, 7, 2).unwrap(), 21);
        assert_eq!(checked_mul_div_round_up(10, 1, 3).unwrap(), 4);
        // intermediate exceeds u128 but the quotient fits
        assert_eq!(
            checked_mul_div(u128::MAX, 2, u128::MAX).unwrap(),
            2u128
        );
    }

    #[test]
    fn test_shift_word_left_overflow() {
        assert!(shift_word_left(U256::from(1u8) << 200).is_err());
        assert_eq!(
            shift_word_left(U256::from(3u8)).unwrap(),
            U256::from(3u128 << 64)
        );
    }
}
