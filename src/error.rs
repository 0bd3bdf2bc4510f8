#![allow(non_snake_case)]

pub type CoreError = &'static str;

pub const TICK_ARRAY_NOT_EVENLY_SPACED: CoreError = "Tick array not evenly spaced";

pub const TICK_INDEX_OUT_OF_BOUNDS: CoreError = "Tick index out of bounds";

pub const INVALID_TICK_INDEX: CoreError = "Invalid tick index";

pub const INVALID_TICK_RANGE: CoreError = "Invalid tick range";

pub const INPUT_MINT_MISMATCH: CoreError = "Input mint does not belong to the pool";

pub const ARITHMETIC_OVERFLOW: CoreError = "Arithmetic over- or underflow";

pub const DIVIDE_BY_ZERO: CoreError = "Divide by zero";

pub const AMOUNT_EXCEEDS_MAX_U64: CoreError = "Amount exceeds max u64";

pub const SQRT_PRICE_OUT_OF_BOUNDS: CoreError = "Sqrt price out of bounds";

pub const TICK_SEQUENCE_EMPTY: CoreError = "Tick sequence empty";

pub const SQRT_PRICE_LIMIT_OUT_OF_BOUNDS: CoreError = "Sqrt price limit out of bounds";

pub const INVALID_SQRT_PRICE_LIMIT_DIRECTION: CoreError = "Invalid sqrt price limit direction";

pub const ZERO_TRADABLE_AMOUNT: CoreError = "Zero tradable amount";

pub const ZERO_LIQUIDITY: CoreError = "Zero active liquidity";

pub const INSUFFICIENT_TICK_ARRAYS: CoreError = "Insufficient tick arrays";

pub const INVALID_TICK_ARRAY_SEQUENCE: CoreError = "Invalid tick array sequence";

pub const INVALID_SLIPPAGE: CoreError = "Invalid slippage";

/// Errors that indicate a failed computation rather than an infeasible quote.
/// The router drops infeasible routes silently but surfaces these.
pub fn is_arithmetic_error(error: CoreError) -> bool {
    error == ARITHMETIC_OVERFLOW || error == DIVIDE_BY_ZERO || error == AMOUNT_EXCEEDS_MAX_U64
}
