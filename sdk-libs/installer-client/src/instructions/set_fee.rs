use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::Discriminator;
use serde::Serialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::{build_instruction, InstructionAccounts, InstructionArgs};
use crate::error::CodecError;

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize)]
pub struct SetFeeArgs {
    pub fee_lamports: u64,
    pub paused: bool,
}

impl Discriminator for SetFeeArgs {
    const DISCRIMINATOR: [u8; 8] = [18, 154, 24, 18, 237, 214, 19, 80];
}

impl InstructionArgs for SetFeeArgs {
    const NAME: &'static str = "set_fee";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetFeeAccounts {
    pub registry: Pubkey,
    pub authority: Pubkey,
}

impl InstructionAccounts for SetFeeAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.registry, false),
            AccountMeta::new_readonly(self.authority, true),
        ]
    }
}

pub fn set_fee(accounts: &SetFeeAccounts, args: SetFeeArgs) -> Result<Instruction, CodecError> {
    build_instruction(&crate::ID, accounts, &args)
}
