use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::Discriminator;
use serde::Serialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use super::{build_instruction, InstructionAccounts, InstructionArgs};
use crate::{error::CodecError, pda::find_registry_address};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct InitializeRegistryArgs {
    pub fee_lamports: u64,
}

impl Discriminator for InitializeRegistryArgs {
    const DISCRIMINATOR: [u8; 8] = [189, 181, 20, 17, 174, 57, 249, 59];
}

impl InstructionArgs for InitializeRegistryArgs {
    const NAME: &'static str = "initialize_registry";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeRegistryAccounts {
    pub registry: Pubkey,
    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub system_program: Pubkey,
}

impl InitializeRegistryAccounts {
    pub fn new(authority: Pubkey, treasury: Pubkey) -> Self {
        Self {
            registry: find_registry_address(&authority, &crate::ID).0,
            authority,
            treasury,
            system_program: system_program::ID,
        }
    }
}

impl InstructionAccounts for InitializeRegistryAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.registry, false),
            AccountMeta::new(self.authority, true),
            AccountMeta::new_readonly(self.treasury, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

pub fn initialize_registry(
    accounts: &InitializeRegistryAccounts,
    args: InitializeRegistryArgs,
) -> Result<Instruction, CodecError> {
    build_instruction(&crate::ID, accounts, &args)
}
