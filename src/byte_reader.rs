use anyhow::{Result, anyhow};
use solana_program::pubkey::Pubkey;

/// Cursor over little-endian account data.
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self
            .offset
            .checked_add(N)
            .ok_or_else(|| anyhow!("Read past end of buffer"))?;
        if end > self.data.len() {
            return Err(anyhow!("Read past end of buffer"));
        }
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.offset..end]);
        self.offset = end;
        Ok(bytes)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.take::<1>()?[0] != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    pub fn read_u128(&mut self) -> Result<u128> {
        Ok(u128::from_le_bytes(self.take()?))
    }

    pub fn read_i128(&mut self) -> Result<i128> {
        Ok(i128::from_le_bytes(self.take()?))
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey> {
        Ok(Pubkey::new_from_array(self.take()?))
    }
}
