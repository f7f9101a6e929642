//! Instruction builders and decoders.
//!
//! Instruction data is `discriminator ++ borsh(args)`; account metas follow
//! the order the program expects.

mod close_installation;
mod create_installation;
mod initialize_registry;
mod install;
mod set_fee;
mod update_installation;

use borsh::{BorshDeserialize, BorshSerialize};
pub use close_installation::*;
pub use create_installation::*;
pub use initialize_registry::*;
pub use install::*;
use installer_account_checks::{Discriminator, DISCRIMINATOR_LEN};
use serde::Serialize;
pub use set_fee::*;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
pub use update_installation::*;

use crate::error::CodecError;

/// Borsh encoded instruction arguments prefixed with their discriminator.
pub trait InstructionArgs: Discriminator + BorshSerialize + BorshDeserialize {
    const NAME: &'static str;

    fn data(&self) -> Result<Vec<u8>, CodecError> {
        let mut data = Self::DISCRIMINATOR.to_vec();
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }

    fn unpack(data: &[u8]) -> Result<Self, CodecError> {
        installer_account_checks::check_discriminator::<Self>(data)?;
        <Self as BorshDeserialize>::deserialize(&mut &data[DISCRIMINATOR_LEN..]).map_err(|source| {
            CodecError::Deserialize {
                type_name: Self::NAME,
                source,
            }
        })
    }
}

/// Ordered account list of an instruction.
pub trait InstructionAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta>;
}

pub fn build_instruction<A: InstructionAccounts, D: InstructionArgs>(
    program_id: &Pubkey,
    accounts: &A,
    args: &D,
) -> Result<Instruction, CodecError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(),
        data: args.data()?,
    })
}

/// Any instruction of the installer program, decoded from its data.
///
/// Serializes to JSON as `{"instruction": "<snake_name>", "args": {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "instruction", content = "args", rename_all = "snake_case")]
pub enum InstallerInstruction {
    InitializeRegistry(InitializeRegistryArgs),
    SetFee(SetFeeArgs),
    CreateInstallation(CreateInstallationArgs),
    UpdateInstallation(UpdateInstallationArgs),
    Install(InstallArgs),
    CloseInstallation(CloseInstallationArgs),
}

impl InstallerInstruction {
    /// Data shorter than a discriminator is reported as an unknown
    /// instruction, with the missing bytes zeroed.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let mut discriminator = [0u8; DISCRIMINATOR_LEN];
        if data.len() < DISCRIMINATOR_LEN {
            discriminator[..data.len()].copy_from_slice(data);
            return Err(CodecError::UnknownInstruction(discriminator));
        }
        discriminator.copy_from_slice(&data[..DISCRIMINATOR_LEN]);
        match discriminator {
            InitializeRegistryArgs::DISCRIMINATOR => {
                InitializeRegistryArgs::unpack(data).map(Self::InitializeRegistry)
            }
            SetFeeArgs::DISCRIMINATOR => SetFeeArgs::unpack(data).map(Self::SetFee),
            CreateInstallationArgs::DISCRIMINATOR => {
                CreateInstallationArgs::unpack(data).map(Self::CreateInstallation)
            }
            UpdateInstallationArgs::DISCRIMINATOR => {
                UpdateInstallationArgs::unpack(data).map(Self::UpdateInstallation)
            }
            InstallArgs::DISCRIMINATOR => InstallArgs::unpack(data).map(Self::Install),
            CloseInstallationArgs::DISCRIMINATOR => {
                CloseInstallationArgs::unpack(data).map(Self::CloseInstallation)
            }
            unknown => Err(CodecError::UnknownInstruction(unknown)),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, CodecError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializeRegistry(_) => InitializeRegistryArgs::NAME,
            Self::SetFee(_) => SetFeeArgs::NAME,
            Self::CreateInstallation(_) => CreateInstallationArgs::NAME,
            Self::UpdateInstallation(_) => UpdateInstallationArgs::NAME,
            Self::Install(_) => InstallArgs::NAME,
            Self::CloseInstallation(_) => CloseInstallationArgs::NAME,
        }
    }
}

pub(crate) fn check_name(name: &str) -> Result<(), crate::InstallerError> {
    if name.len() > crate::MAX_NAME_LEN {
        return Err(crate::InstallerError::NameTooLong);
    }
    Ok(())
}

pub(crate) fn check_uri(uri: &str) -> Result<(), crate::InstallerError> {
    if uri.len() > crate::MAX_URI_LEN {
        return Err(crate::InstallerError::UriTooLong);
    }
    Ok(())
}
