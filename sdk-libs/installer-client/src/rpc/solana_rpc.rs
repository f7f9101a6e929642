use std::{
    fmt::{Debug, Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use solana_client::{client_error::ClientErrorKind, nonblocking::rpc_client::RpcClient};
use solana_program::pubkey::Pubkey;
use solana_sdk::{account::Account, commitment_config::CommitmentConfig};
use tokio::time::{sleep, Instant};
use tracing::warn;

use super::AccountRpc;
use crate::error::ClientError;

/// `getMultipleAccounts` accepts at most this many keys per request.
const MAX_MULTIPLE_ACCOUNTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolanaRpcUrl {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
    Custom(String),
}

impl Display for SolanaRpcUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            SolanaRpcUrl::Mainnet => "https://api.mainnet-beta.solana.com",
            SolanaRpcUrl::Testnet => "https://api.testnet.solana.com",
            SolanaRpcUrl::Devnet => "https://api.devnet.solana.com",
            SolanaRpcUrl::Localnet => "http://localhost:8899",
            SolanaRpcUrl::Custom(url) => url.as_str(),
        };
        write!(f, "{}", str)
    }
}

impl From<&str> for SolanaRpcUrl {
    fn from(value: &str) -> Self {
        match value {
            "mainnet" | "mainnet-beta" => SolanaRpcUrl::Mainnet,
            "testnet" => SolanaRpcUrl::Testnet,
            "devnet" => SolanaRpcUrl::Devnet,
            "localnet" | "local" => SolanaRpcUrl::Localnet,
            url => SolanaRpcUrl::Custom(url.to_string()),
        }
    }
}

#[derive(Clone, Debug, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 10,
            retry_delay: Duration::from_millis(500),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct SolanaRpc {
    pub client: RpcClient,
    pub retry_config: RetryConfig,
}

impl Debug for SolanaRpc {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolanaRpc {{ client: {:?} }}", self.client.url())
    }
}

impl SolanaRpc {
    pub fn new(url: SolanaRpcUrl, commitment_config: Option<CommitmentConfig>) -> Self {
        Self::new_with_retry(url, commitment_config, None)
    }

    pub fn new_with_retry(
        url: SolanaRpcUrl,
        commitment_config: Option<CommitmentConfig>,
        retry_config: Option<RetryConfig>,
    ) -> Self {
        let commitment_config = commitment_config.unwrap_or(CommitmentConfig::confirmed());
        let client = RpcClient::new_with_commitment(url.to_string(), commitment_config);
        Self {
            client,
            retry_config: retry_config.unwrap_or_default(),
        }
    }

    fn should_retry(error: &ClientError) -> bool {
        match error {
            ClientError::Rpc(err) => matches!(
                err.kind(),
                ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_)
            ),
            _ => false,
        }
    }

    async fn retry<F, Fut, T>(&self, operation: F) -> Result<T, ClientError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, ClientError>>,
    {
        let mut attempts = 0;
        let start_time = Instant::now();
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !Self::should_retry(&e) {
                        return Err(e);
                    }
                    attempts += 1;
                    if attempts >= self.retry_config.max_retries
                        || start_time.elapsed() >= self.retry_config.timeout
                    {
                        return Err(e);
                    }
                    warn!(
                        "Operation failed, retrying in {:?} (attempt {}/{}): {:?}",
                        self.retry_config.retry_delay,
                        attempts,
                        self.retry_config.max_retries,
                        e
                    );
                    sleep(self.retry_config.retry_delay).await;
                }
            }
        }
    }
}

#[async_trait]
impl AccountRpc for SolanaRpc {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, ClientError> {
        self.retry(|| async {
            self.client
                .get_account_with_commitment(address, self.client.commitment())
                .await
                .map(|response| response.value)
                .map_err(ClientError::from)
        })
        .await
    }

    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, ClientError> {
        let mut accounts = Vec::with_capacity(addresses.len());
        for chunk in addresses.chunks(MAX_MULTIPLE_ACCOUNTS) {
            let fetched = self
                .retry(|| async {
                    self.client
                        .get_multiple_accounts(chunk)
                        .await
                        .map_err(ClientError::from)
                })
                .await?;
            accounts.extend(fetched);
        }
        Ok(accounts)
    }
}
