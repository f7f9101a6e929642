use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::Discriminator;
use serde::Serialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use super::{build_instruction, check_name, check_uri, InstructionAccounts, InstructionArgs};
use crate::{
    error::CodecError,
    pda::{find_installation_address, find_registry_address},
    types::{InstallationKind, InstallationTag},
};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct CreateInstallationArgs {
    pub name: String,
    pub uri: String,
    pub kind: InstallationKind,
    pub tag: InstallationTag,
    pub max_supply: Option<u64>,
}

impl Discriminator for CreateInstallationArgs {
    const DISCRIMINATOR: [u8; 8] = [228, 89, 170, 202, 66, 70, 150, 245];
}

impl InstructionArgs for CreateInstallationArgs {
    const NAME: &'static str = "create_installation";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInstallationAccounts {
    pub installation: Pubkey,
    pub registry: Pubkey,
    pub mint: Pubkey,
    pub authority: Pubkey,
    pub system_program: Pubkey,
}

impl CreateInstallationAccounts {
    /// Derives the installation and registry addresses from `mint` and the
    /// registry authority.
    pub fn new(authority: Pubkey, registry_authority: &Pubkey, mint: Pubkey) -> Self {
        Self {
            installation: find_installation_address(&mint, &crate::ID).0,
            registry: find_registry_address(registry_authority, &crate::ID).0,
            mint,
            authority,
            system_program: system_program::ID,
        }
    }
}

impl InstructionAccounts for CreateInstallationAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.installation, false),
            AccountMeta::new(self.registry, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new(self.authority, true),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

pub fn create_installation(
    accounts: &CreateInstallationAccounts,
    args: CreateInstallationArgs,
) -> Result<Instruction, CodecError> {
    check_name(&args.name)?;
    check_uri(&args.uri)?;
    build_instruction(&crate::ID, accounts, &args)
}
