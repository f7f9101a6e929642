use std::{collections::HashMap, sync::RwLock};

use async_trait::async_trait;
use solana_program::pubkey::Pubkey;
use solana_sdk::account::Account;

use super::AccountRpc;
use crate::error::ClientError;

/// In-memory account store, used for tests and offline decoding.
#[derive(Debug, Default)]
pub struct MemoryRpc {
    accounts: RwLock<HashMap<Pubkey, Account>>,
}

impl MemoryRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_account(&self, address: Pubkey, account: Account) {
        self.accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(address, account);
    }

    /// Stores `data` as an account owned by `owner`.
    pub fn set_account_data(&self, address: Pubkey, owner: Pubkey, data: Vec<u8>) {
        self.set_account(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn remove_account(&self, address: &Pubkey) -> Option<Account> {
        self.accounts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(address)
    }

    fn read(&self, address: &Pubkey) -> Option<Account> {
        self.accounts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(address)
            .cloned()
    }
}

#[async_trait]
impl AccountRpc for MemoryRpc {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, ClientError> {
        Ok(self.read(address))
    }

    async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> Result<Vec<Option<Account>>, ClientError> {
        Ok(addresses.iter().map(|address| self.read(address)).collect())
    }
}
