use super::tick::Tick;
use crate::byte_reader::ByteReader;
use anyhow::{Result, anyhow};
use solana_program::pubkey::Pubkey;

/// The number of tick slots in a tick array account.
pub const TICK_ARRAY_SIZE: usize = 88;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickArray {
    pub start_tick_index: i32,
    pub ticks: [Tick; TICK_ARRAY_SIZE],
    pub pool: Pubkey,
}

impl TickArray {
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(anyhow!("Data too short for account discriminator"));
        }

        let mut reader = ByteReader::new(&data[8..]);

        let start_tick_index = reader.read_i32()?;

        let mut ticks = [Tick::default(); TICK_ARRAY_SIZE];
        for tick in ticks.iter_mut() {
            *tick = Tick::deserialize(&mut reader)?;
        }

        let pool = reader.read_pubkey()?;

        Ok(Self {
            start_tick_index,
            ticks,
            pool,
        })
    }

    /// An array with no initialized ticks, standing in for an account that was
    /// never created on chain.
    pub fn uninitialized(start_tick_index: i32) -> Self {
        Self {
            start_tick_index,
            ticks: [Tick::default(); TICK_ARRAY_SIZE],
            pool: Pubkey::default(),
        }
    }
}

/// The three-array window a single swap quote may traverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickArrays {
    One(TickArray),
    Two(TickArray, TickArray),
    Three(TickArray, TickArray, TickArray),
}

impl TickArrays {
    pub fn into_array(self) -> [Option<TickArray>; 3] {
        match self {
            TickArrays::One(a) => [Some(a), None, None],
            TickArrays::Two(a, b) => [Some(a), Some(b), None],
            TickArrays::Three(a, b, c) => [Some(a), Some(b), Some(c)],
        }
    }
}

impl From<[TickArray; 1]> for TickArrays {
    fn from(arr: [TickArray; 1]) -> Self {
        let [a] = arr;
        TickArrays::One(a)
    }
}

impl From<[TickArray; 2]> for TickArrays {
    fn from(arr: [TickArray; 2]) -> Self {
        let [a, b] = arr;
        TickArrays::Two(a, b)
    }
}

impl From<[TickArray; 3]> for TickArrays {
    fn from(arr: [TickArray; 3]) -> Self {
        let [a, b, c] = arr;
        TickArrays::Three(a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_round_trip() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&(-5632i32).to_le_bytes());
        for i in 0..TICK_ARRAY_SIZE {
            data.push((i == 3) as u8);
            data.extend_from_slice(&((i as i128) * 7).to_le_bytes());
            data.extend_from_slice(&((i as u128) * 7).to_le_bytes());
        }
        data.extend_from_slice(&[5u8; 32]);

        let array = TickArray::deserialize(&data).unwrap();
        assert_eq!(array.start_tick_index, -5632);
        assert!(array.ticks[3].initialized);
        assert!(!array.ticks[4].initialized);
        assert_eq!(array.ticks[10].liquidity_net, 70);
        assert_eq!(array.pool, Pubkey::new_from_array([5u8; 32]));
    }

    #[test]
    fn test_into_array_padding() {
        let arrays = TickArrays::from([TickArray::uninitialized(0)]);
        let [first, second, third] = arrays.into_array();
        assert!(first.is_some());
        assert!(second.is_none());
        assert!(third.is_none());
    }
}
