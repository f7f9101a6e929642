use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::{Discriminator, DISCRIMINATOR_LEN};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::pubkey::Pubkey;

use super::{option_space, string_space, InstallerAccount};
use crate::MAX_MEMO_LEN;

#[serde_as]
#[derive(
    Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct InstallReceipt {
    #[serde_as(as = "DisplayFromStr")]
    pub installation: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub owner: Pubkey,
    pub amount: u64,
    pub paid_lamports: u64,
    pub slot: u64,
    pub memo: Option<String>,
    pub bump: u8,
}

impl Discriminator for InstallReceipt {
    const DISCRIMINATOR: [u8; 8] = [103, 217, 176, 112, 26, 190, 26, 3];
}

impl InstallerAccount for InstallReceipt {
    const NAME: &'static str = "InstallReceipt";
}

impl InstallReceipt {
    pub const LEN: usize =
        DISCRIMINATOR_LEN + 32 + 32 + 8 + 8 + 8 + option_space(string_space(MAX_MEMO_LEN)) + 1;
}
