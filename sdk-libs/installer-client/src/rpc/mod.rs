mod memory_rpc;
mod solana_rpc;

use async_trait::async_trait;
pub use memory_rpc::MemoryRpc;
pub use solana_rpc::{RetryConfig, SolanaRpc, SolanaRpcUrl};
use solana_program::pubkey::Pubkey;
use solana_sdk::account::Account;

use crate::error::ClientError;

/// Account reads needed to fetch and decode installer accounts.
#[async_trait]
pub trait AccountRpc: Send + Sync {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, ClientError>;

    /// Returns one entry per address, in the same order.
    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, ClientError>;
}
