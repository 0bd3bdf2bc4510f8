use crate::error::{AMOUNT_EXCEEDS_MAX_U64, CoreError, INVALID_SLIPPAGE};

const PERCENT_DENOMINATOR: u64 = 100;

/// A non-negative rational slippage tolerance, capped at 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slippage {
    pub numerator: u64,
    pub denominator: u64,
}

impl Slippage {
    pub const ZERO: Slippage = Slippage {
        numerator: 0,
        denominator: PERCENT_DENOMINATOR,
    };

    pub fn new(numerator: u64, denominator: u64) -> Result<Self, CoreError> {
        if denominator == 0 || numerator > denominator {
            return Err(INVALID_SLIPPAGE);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn from_bps(bps: u16) -> Self {
        Self {
            numerator: bps as u64,
            denominator: 10_000,
        }
    }

    /// floor(amount * (denominator - numerator) / denominator)
    pub fn apply_down(&self, amount: u64) -> u64 {
        let scaled = amount as u128 * (self.denominator - self.numerator) as u128;
        (scaled / self.denominator as u128) as u64
    }

    /// ceil(amount * (denominator + numerator) / denominator)
    pub fn apply_up(&self, amount: u64) -> Result<u64, CoreError> {
        let numerator = self.denominator as u128 + self.numerator as u128;
        let scaled = amount as u128 * numerator;
        let result = scaled.div_ceil(self.denominator as u128);
        u64::try_from(result).map_err(|_| AMOUNT_EXCEEDS_MAX_U64)
    }
}

impl Default for Slippage {
    fn default() -> Self {
        Slippage::ZERO
    }
}
