use solana_program::pubkey::Pubkey;

/// Derive the tick-array account address for a pool and an aligned start tick.
/// The start tick is rendered in decimal, matching the on-chain seed encoding.
pub fn tick_array_address(program_id: &Pubkey, pool: &Pubkey, start_tick_index: i32) -> Pubkey {
    Pubkey::find_program_address(
        &[
            b"tick_array",
            pool.as_ref(),
            start_tick_index.to_string().as_bytes(),
        ],
        program_id,
    )
    .0
}
