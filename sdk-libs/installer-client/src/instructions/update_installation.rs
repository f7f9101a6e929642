use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::Discriminator;
use serde::Serialize;
use serde_with::{serde_as, DisplayFromStr};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::{build_instruction, check_name, check_uri, InstructionAccounts, InstructionArgs};
use crate::{error::CodecError, types::InstallationTag};

/// Fields left as `None` are not modified.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize, Serialize)]
pub struct UpdateInstallationArgs {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub tag: Option<InstallationTag>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub update_authority: Option<Pubkey>,
}

impl Discriminator for UpdateInstallationArgs {
    const DISCRIMINATOR: [u8; 8] = [87, 215, 117, 170, 147, 199, 152, 195];
}

impl InstructionArgs for UpdateInstallationArgs {
    const NAME: &'static str = "update_installation";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInstallationAccounts {
    pub installation: Pubkey,
    pub authority: Pubkey,
}

impl InstructionAccounts for UpdateInstallationAccounts {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.installation, false),
            AccountMeta::new_readonly(self.authority, true),
        ]
    }
}

pub fn update_installation(
    accounts: &UpdateInstallationAccounts,
    args: UpdateInstallationArgs,
) -> Result<Instruction, CodecError> {
    if let Some(name) = &args.name {
        check_name(name)?;
    }
    if let Some(uri) = &args.uri {
        check_uri(uri)?;
    }
    build_instruction(&crate::ID, accounts, &args)
}
