use crate::byte_reader::ByteReader;
use anyhow::{Result, anyhow};
use solana_program::pubkey::Pubkey;

pub mod pda;
pub mod tick;
pub mod tick_array;

pub use tick::*;
pub use tick_array::*;

pub const Q64_64_SCALE: f64 = 18446744073709551616.0; // 2^64

/// On-chain pool account. `token_mint_a < token_mint_b` byte-lexicographically,
/// matching the PDA ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub tick_spacing: u16,
    pub fee_rate: u16,
    pub protocol_fee_rate: u16,
    pub liquidity: u128,
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub token_mint_a: Pubkey,
    pub token_vault_a: Pubkey,
    pub token_mint_b: Pubkey,
    pub token_vault_b: Pubkey,
}

impl Pool {
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(anyhow!("Data too short for account discriminator"));
        }

        let mut reader = ByteReader::new(&data[8..]);

        let tick_spacing = reader.read_u16()?;
        if tick_spacing == 0 {
            return Err(anyhow!("Invalid tick spacing"));
        }

        Ok(Self {
            tick_spacing,
            fee_rate: reader.read_u16()?,
            protocol_fee_rate: reader.read_u16()?,
            liquidity: reader.read_u128()?,
            sqrt_price: reader.read_u128()?,
            tick_current_index: reader.read_i32()?,
            token_mint_a: reader.read_pubkey()?,
            token_vault_a: reader.read_pubkey()?,
            token_mint_b: reader.read_pubkey()?,
            token_vault_b: reader.read_pubkey()?,
        })
    }

    /// The opposite mint of a pair member, or `None` if `from` is neither.
    #[inline]
    pub fn other_mint(&self, from: &Pubkey) -> Option<Pubkey> {
        if &self.token_mint_a == from {
            Some(self.token_mint_b)
        } else if &self.token_mint_b == from {
            Some(self.token_mint_a)
        } else {
            None
        }
    }

    pub fn get_price(&self) -> f64 {
        if self.sqrt_price == 0 {
            return 0.0;
        }
        let sqrt_price = self.sqrt_price as f64 / Q64_64_SCALE;
        sqrt_price * sqrt_price
    }
}
