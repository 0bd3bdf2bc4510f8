use crate::byte_reader::ByteReader;
use anyhow::Result;

#[derive(Debug, Default, Clone, PartialEq, Eq, Copy)]
pub struct Tick {
    pub initialized: bool,
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
}

impl Tick {
    pub fn deserialize(reader: &mut ByteReader) -> Result<Self> {
        Ok(Self {
            initialized: reader.read_bool()?,
            liquidity_net: reader.read_i128()?,
            liquidity_gross: reader.read_u128()?,
        })
    }
}

