use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use installer_client::{
    instructions::InstallerInstruction, rpc::AccountRpc, Discriminator, InstallReceipt,
    Installation, InstallerAccount, Registry,
};
use serde_json::Value;
use solana_program::pubkey::Pubkey;
use tracing::debug;

use crate::errors::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Installation,
    Registry,
    InstallReceipt,
}

impl AccountKind {
    pub const ALL: [AccountKind; 3] = [
        AccountKind::Installation,
        AccountKind::Registry,
        AccountKind::InstallReceipt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Installation => Installation::NAME,
            AccountKind::Registry => Registry::NAME,
            AccountKind::InstallReceipt => InstallReceipt::NAME,
        }
    }

    pub fn discriminator(&self) -> [u8; 8] {
        match self {
            AccountKind::Installation => Installation::DISCRIMINATOR,
            AccountKind::Registry => Registry::DISCRIMINATOR,
            AccountKind::InstallReceipt => InstallReceipt::DISCRIMINATOR,
        }
    }

    /// Identifies the account type from the leading discriminator.
    pub fn from_data(data: &[u8]) -> Option<Self> {
        let prefix = data.get(..8)?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.discriminator() == prefix)
    }
}

impl Display for AccountKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "installation" => Ok(AccountKind::Installation),
            "registry" => Ok(AccountKind::Registry),
            "installreceipt" | "receipt" => Ok(AccountKind::InstallReceipt),
            _ => Err(format!(
                "unknown account type `{}`, expected installation, registry or receipt",
                s
            )),
        }
    }
}

/// Decodes raw account data of the given type to JSON.
pub fn decode_account_json(kind: AccountKind, data: &[u8]) -> Result<Value, DashboardError> {
    let json = match kind {
        AccountKind::Installation => Installation::decode(data)?.to_json()?,
        AccountKind::Registry => Registry::decode(data)?.to_json()?,
        AccountKind::InstallReceipt => InstallReceipt::decode(data)?.to_json()?,
    };
    Ok(json)
}

/// Decodes base64 account data. Without an explicit `kind` the type is
/// taken from the discriminator.
pub fn decode_base64_account(
    kind: Option<AccountKind>,
    encoded: &str,
) -> Result<(AccountKind, Value), DashboardError> {
    let data = base64::decode(encoded.trim())?;
    let kind = match kind.or_else(|| AccountKind::from_data(&data)) {
        Some(kind) => kind,
        None => {
            return Err(DashboardError::InvalidArgument(
                "data does not start with a known account discriminator".to_string(),
            ))
        }
    };
    Ok((kind, decode_account_json(kind, &data)?))
}

/// Decodes base64 instruction data to `{"instruction": .., "args": ..}`.
pub fn decode_base64_instruction(encoded: &str) -> Result<Value, DashboardError> {
    let data = base64::decode(encoded.trim())?;
    let instruction = InstallerInstruction::decode(&data)?;
    debug!("decoded {} instruction", instruction.name());
    Ok(instruction.to_json()?)
}

/// Fetches and decodes one account. `None` when it does not exist; an
/// account owned by another program is an error.
pub async fn fetch_account_json<R>(
    rpc: &R,
    kind: AccountKind,
    address: &Pubkey,
    program_id: &Pubkey,
) -> Result<Option<Value>, DashboardError>
where
    R: AccountRpc + ?Sized,
{
    debug!("fetching {} {}", kind, address);
    let json = match kind {
        AccountKind::Installation => Installation::fetch(rpc, address, program_id)
            .await?
            .map(|account| account.to_json())
            .transpose()?,
        AccountKind::Registry => Registry::fetch(rpc, address, program_id)
            .await?
            .map(|account| account.to_json())
            .transpose()?,
        AccountKind::InstallReceipt => InstallReceipt::fetch(rpc, address, program_id)
            .await?
            .map(|account| account.to_json())
            .transpose()?,
    };
    Ok(json)
}
