use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::Discriminator;
use serde::Serialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::{build_instruction, InstructionAccounts, InstructionArgs};
use crate::error::CodecError;

/// Takes no arguments; the data is only the discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize, Serialize)]
pub struct CloseInstallationArgs {}

impl Discriminator for CloseInstallationArgs {
    const DISCRIMINATOR: [u8; 8] = [220, 177, 226, 72, 13, 30, 3, 160];
}

impl InstructionArgs for CloseInstallationArgs {
    const NAME: &'static str = "close_installation";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInstallationAccounts {
    pub installation: Pubkey,
    pub authority: Pubkey,
}

impl InstructionAccounts for CloseInstallationAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.installation, false),
            AccountMeta::new(self.authority, true),
        ]
    }
}

pub fn close_installation(accounts: &CloseInstallationAccounts) -> Result<Instruction, CodecError> {
    build_instruction(&crate::ID, accounts, &CloseInstallationArgs {})
}
