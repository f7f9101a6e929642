use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::Discriminator;
use serde::Serialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use super::{build_instruction, InstructionAccounts, InstructionArgs};
use crate::{
    error::CodecError, pda::find_receipt_address, program_error::InstallerError, MAX_MEMO_LEN,
};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct InstallArgs {
    pub amount: u64,
    pub memo: Option<String>,
}

impl Discriminator for InstallArgs {
    const DISCRIMINATOR: [u8; 8] = [15, 83, 235, 237, 55, 135, 112, 250];
}

impl InstructionArgs for InstallArgs {
    const NAME: &'static str = "install";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallAccounts {
    pub receipt: Pubkey,
    pub installation: Pubkey,
    pub registry: Pubkey,
    pub owner: Pubkey,
    pub treasury: Pubkey,
    pub system_program: Pubkey,
}

impl InstallAccounts {
    pub fn new(installation: Pubkey, registry: Pubkey, owner: Pubkey, treasury: Pubkey) -> Self {
        Self {
            receipt: find_receipt_address(&installation, &owner, &crate::ID).0,
            installation,
            registry,
            owner,
            treasury,
            system_program: system_program::ID,
        }
    }
}

impl InstructionAccounts for InstallAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.receipt, false),
            AccountMeta::new(self.installation, false),
            AccountMeta::new_readonly(self.registry, false),
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.treasury, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

pub fn install(accounts: &InstallAccounts, args: InstallArgs) -> Result<Instruction, CodecError> {
    if args.amount == 0 {
        return Err(InstallerError::InvalidAmount.into());
    }
    if args.memo.as_ref().is_some_and(|memo| memo.len() > MAX_MEMO_LEN) {
        return Err(InstallerError::MemoTooLong.into());
    }
    build_instruction(&crate::ID, accounts, &args)
}
