use crate::state::{Pool, TickArray};
use anyhow::Result;
use async_trait::async_trait;
use solana_program::pubkey::Pubkey;

/// On-chain account source consumed by the router. Implementations batch the
/// lookups however they like but must keep results aligned with the request
/// order; a missing account is `None`, not an error.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn list_pools(
        &self,
        addresses: &[Pubkey],
        use_cache: bool,
    ) -> Result<Vec<Option<Pool>>>;

    async fn list_tick_arrays(
        &self,
        addresses: &[Pubkey],
        use_cache: bool,
    ) -> Result<Vec<Option<TickArray>>>;

    async fn get_pool(&self, address: &Pubkey, use_cache: bool) -> Result<Option<Pool>> {
        let mut pools = self
            .list_pools(std::slice::from_ref(address), use_cache)
            .await?;
        Ok(pools.pop().flatten())
    }
}
