mod install_receipt;
mod installation;
mod registry;

use async_trait::async_trait;
use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::{check_discriminator, check_owner, Discriminator, DISCRIMINATOR_LEN};
pub use install_receipt::InstallReceipt;
pub use installation::Installation;
pub use registry::Registry;
use serde::{de::DeserializeOwned, Serialize};
use solana_program::pubkey::Pubkey;
use solana_sdk::account::Account;
use tracing::debug;

use crate::{
    error::{ClientError, CodecError},
    rpc::AccountRpc,
};

/// Shared codec for every account owned by the installer program.
///
/// Layout is `discriminator ++ borsh(fields)`. Bytes past the end of the
/// borsh layout are ignored since accounts are allocated for their maximum
/// size.
#[async_trait]
pub trait InstallerAccount:
    Discriminator
    + BorshSerialize
    + BorshDeserialize
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + Sized
{
    const NAME: &'static str;

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let mut data = Self::DISCRIMINATOR.to_vec();
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }

    fn decode(data: &[u8]) -> Result<Self, CodecError> {
        check_discriminator::<Self>(data)?;
        <Self as BorshDeserialize>::deserialize(&mut &data[DISCRIMINATOR_LEN..]).map_err(
            |source| CodecError::Deserialize {
                type_name: Self::NAME,
                source,
            },
        )
    }

    fn to_json(&self) -> Result<serde_json::Value, CodecError> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_json(value: serde_json::Value) -> Result<Self, CodecError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Checks the owning program before looking at the data, so a well-formed
    /// account owned by another program is still rejected.
    fn from_account(account: &Account, program_id: &Pubkey) -> Result<Self, ClientError> {
        check_owner(program_id, &account.owner)?;
        Ok(Self::decode(&account.data)?)
    }

    /// Fetches and decodes the account at `address`. Returns `None` if the
    /// account does not exist.
    async fn fetch<R: AccountRpc + ?Sized>(
        rpc: &R,
        address: &Pubkey,
        program_id: &Pubkey,
    ) -> Result<Option<Self>, ClientError> {
        match rpc.get_account(address).await? {
            Some(account) => {
                debug!(
                    "Decoding {} {} ({} bytes)",
                    Self::NAME,
                    address,
                    account.data.len()
                );
                Self::from_account(&account, program_id).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Fetches several accounts in one request, preserving the input order.
    async fn fetch_multiple<R: AccountRpc + ?Sized>(
        rpc: &R,
        addresses: &[Pubkey],
        program_id: &Pubkey,
    ) -> Result<Vec<Option<Self>>, ClientError> {
        let accounts = rpc.get_multiple_accounts(addresses).await?;
        if accounts.len() != addresses.len() {
            return Err(ClientError::AccountCountMismatch {
                expected: addresses.len(),
                actual: accounts.len(),
            });
        }
        accounts
            .iter()
            .map(|account| {
                account
                    .as_ref()
                    .map(|account| Self::from_account(account, program_id))
                    .transpose()
            })
            .collect()
    }
}

/// Size of a borsh encoded `String` of `len` bytes.
pub(crate) const fn string_space(len: usize) -> usize {
    4 + len
}

/// Size of a borsh encoded `Option<T>` whose payload is `len` bytes.
pub(crate) const fn option_space(len: usize) -> usize {
    1 + len
}
