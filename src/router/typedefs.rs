use crate::quote::SwapQuote;
use solana_program::pubkey::Pubkey;
use std::collections::HashMap;

/// Canonical key for a token pair, byte-lexicographically ordered so both
/// trade directions resolve to the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(Pubkey, Pubkey);

impl RouteId {
    pub fn new(mint_a: Pubkey, mint_b: Pubkey) -> Self {
        if mint_a < mint_b {
            Self(mint_a, mint_b)
        } else {
            Self(mint_b, mint_a)
        }
    }
}

/// Candidate pool paths per token pair, supplied by an external graph builder.
/// Routes are simple (no repeated pools) and already deduplicated.
pub type Walks = HashMap<RouteId, Vec<Vec<Pubkey>>>;

/// One single-pool swap inside a route.
#[derive(Debug, Clone)]
pub struct Hop {
    pub pool: Pubkey,
    pub a_to_b: bool,
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount_in: u64,
    pub amount_out: u64,
    pub quote: SwapQuote,
}

/// A fully quoted route carrying one percent slice of the trade.
#[derive(Debug, Clone)]
pub struct RouteQuote {
    pub route: Vec<Pubkey>,
    pub percent: u8,
    pub amount_in: u64,
    pub amount_out: u64,
    pub hops: Vec<Hop>,
}

/// A ranked combination of route quotes whose percents sum to 100.
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub quotes: Vec<RouteQuote>,
    pub percent: u8,
    pub total_in: u64,
    pub total_out: u64,
}

/// The trade being routed.
#[derive(Debug, Clone)]
pub struct TradeParams {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub trade_amount: u64,
    pub amount_specified_is_input: bool,
    /// Program owning the pools; used to derive tick-array addresses.
    pub program_id: Pubkey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_id_is_direction_agnostic() {
        let mint_a = Pubkey::new_from_array([1u8; 32]);
        let mint_b = Pubkey::new_from_array([2u8; 32]);
        assert_eq!(RouteId::new(mint_a, mint_b), RouteId::new(mint_b, mint_a));
        assert_ne!(
            RouteId::new(mint_a, mint_b),
            RouteId::new(mint_a, Pubkey::new_from_array([3u8; 32]))
        );
    }
}
