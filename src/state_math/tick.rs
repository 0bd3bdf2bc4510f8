use crate::error::{CoreError, DIVIDE_BY_ZERO};
use crate::math::tick_math::tick_index_to_sqrt_price;
use crate::state::tick_array::TICK_ARRAY_SIZE;

/// Start tick of the tick array holding `tick_index`. A zero spacing comes
/// from corrupt account data and is rejected rather than trusted.
pub fn get_tick_array_start_tick_index(
    tick_index: i32,
    tick_spacing: u16,
) -> Result<i32, CoreError> {
    if tick_spacing == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    let ticks_per_array = TICK_ARRAY_SIZE as i32 * tick_spacing as i32;
    Ok(tick_index.div_euclid(ticks_per_array) * ticks_per_array)
}

/// Snap a tick to an initializable multiple of the spacing.
/// `Some(true)` rounds up, `Some(false)` rounds down, `None` rounds to nearest.
pub fn get_initializable_tick_index(
    tick_index: i32,
    tick_spacing: u16,
    round_up: Option<bool>,
) -> Result<i32, CoreError> {
    if tick_spacing == 0 {
        return Err(DIVIDE_BY_ZERO);
    }
    let tick_spacing = tick_spacing as i32;
    let remainder = tick_index.rem_euclid(tick_spacing);
    let result = tick_index.div_euclid(tick_spacing) * tick_spacing;

    let should_round_up = match round_up {
        Some(round_up) => round_up && remainder > 0,
        None => remainder >= tick_spacing / 2,
    };

    Ok(if should_round_up {
        result + tick_spacing
    } else {
        result
    })
}

pub fn get_next_initializable_tick_index(
    tick_index: i32,
    tick_spacing: u16,
) -> Result<i32, CoreError> {
    Ok(get_initializable_tick_index(tick_index, tick_spacing, Some(false))? + tick_spacing as i32)
}

pub fn get_prev_initializable_tick_index(
    tick_index: i32,
    tick_spacing: u16,
) -> Result<i32, CoreError> {
    Ok(get_initializable_tick_index(tick_index, tick_spacing, Some(false))? - tick_spacing as i32)
}

/// Normalize a caller-supplied pair of tick indexes into `(lower, upper)`.
pub fn order_tick_indexes(tick_index_1: i32, tick_index_2: i32) -> (i32, i32) {
    if tick_index_1 <= tick_index_2 {
        (tick_index_1, tick_index_2)
    } else {
        (tick_index_2, tick_index_1)
    }
}

/// Where the current price sits relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    PriceBelowRange,
    PriceInRange,
    PriceAboveRange,
}

/// Classify a sqrt price against a tick range. Callers validate
/// `tick_lower_index < tick_upper_index`.
pub fn position_status(
    sqrt_price: u128,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> PositionStatus {
    if sqrt_price < tick_index_to_sqrt_price(tick_lower_index) {
        PositionStatus::PriceBelowRange
    } else if sqrt_price < tick_index_to_sqrt_price(tick_upper_index) {
        PositionStatus::PriceInRange
    } else {
        PositionStatus::PriceAboveRange
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::ONE_Q64;

    #[test]
    fn test_start_tick_index() {
        assert_eq!(get_tick_array_start_tick_index(0, 64).unwrap(), 0);
        assert_eq!(get_tick_array_start_tick_index(5631, 64).unwrap(), 0);
        assert_eq!(get_tick_array_start_tick_index(5632, 64).unwrap(), 5632);
        assert_eq!(get_tick_array_start_tick_index(-1, 64).unwrap(), -5632);
        assert_eq!(get_tick_array_start_tick_index(-5632, 64).unwrap(), -5632);
        assert_eq!(get_tick_array_start_tick_index(-5633, 64).unwrap(), -11264);
    }

    #[test]
    fn test_initializable_rounding() {
        // round down
        assert_eq!(get_initializable_tick_index(5, 10, Some(false)).unwrap(), 0);
        assert_eq!(get_initializable_tick_index(-5, 10, Some(false)).unwrap(), -10);
        assert_eq!(get_initializable_tick_index(10, 10, Some(false)).unwrap(), 10);

        // round up
        assert_eq!(get_initializable_tick_index(5, 10, Some(true)).unwrap(), 10);
        assert_eq!(get_initializable_tick_index(-5, 10, Some(true)).unwrap(), 0);
        assert_eq!(get_initializable_tick_index(-10, 10, Some(true)).unwrap(), -10);

        // nearest
        assert_eq!(get_initializable_tick_index(4, 10, None).unwrap(), 0);
        assert_eq!(get_initializable_tick_index(5, 10, None).unwrap(), 10);
    }

    #[test]
    fn test_zero_spacing_rejected() {
        assert_eq!(
            get_tick_array_start_tick_index(100, 0),
            Err(DIVIDE_BY_ZERO)
        );
        assert_eq!(
            get_initializable_tick_index(100, 0, Some(false)),
            Err(DIVIDE_BY_ZERO)
        );
        assert_eq!(get_next_initializable_tick_index(100, 0), Err(DIVIDE_BY_ZERO));
        assert_eq!(get_prev_initializable_tick_index(100, 0), Err(DIVIDE_BY_ZERO));
    }

    #[test]
    fn test_next_and_prev_step_over_current() {
        assert_eq!(get_next_initializable_tick_index(0, 10).unwrap(), 10);
        assert_eq!(get_next_initializable_tick_index(5, 10).unwrap(), 10);
        assert_eq!(get_prev_initializable_tick_index(0, 10).unwrap(), -10);
        assert_eq!(get_prev_initializable_tick_index(-5, 10).unwrap(), -20);
    }

    #[test]
    fn test_order_tick_indexes() {
        assert_eq!(order_tick_indexes(-10, 10), (-10, 10));
        assert_eq!(order_tick_indexes(10, -10), (-10, 10));
        assert_eq!(order_tick_indexes(7, 7), (7, 7));
    }

    #[test]
    fn test_position_status_boundaries() {
        let below = tick_index_to_sqrt_price(-200);
        let above = tick_index_to_sqrt_price(200);

        assert_eq!(
            position_status(below, -100, 100),
            PositionStatus::PriceBelowRange
        );
        assert_eq!(position_status(ONE_Q64, -100, 100), PositionStatus::PriceInRange);
        assert_eq!(
            position_status(above, -100, 100),
            PositionStatus::PriceAboveRange
        );

        // boundary prices: lower edge is in range, upper edge is above
        assert_eq!(
            position_status(tick_index_to_sqrt_price(-100), -100, 100),
            PositionStatus::PriceInRange
        );
        assert_eq!(
            position_status(tick_index_to_sqrt_price(100), -100, 100),
            PositionStatus::PriceAboveRange
        );
    }
}
