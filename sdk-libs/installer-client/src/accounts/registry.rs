use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::{Discriminator, DISCRIMINATOR_LEN};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::pubkey::Pubkey;

use super::InstallerAccount;

/// Program-wide registry holding the install fee and the treasury.
#[serde_as]
#[derive(
    Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Registry {
    #[serde_as(as = "DisplayFromStr")]
    pub authority: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub treasury: Pubkey,
    pub fee_lamports: u64,
    pub installation_count: u64,
    pub paused: bool,
    pub bump: u8,
}

impl Discriminator for Registry {
    const DISCRIMINATOR: [u8; 8] = [47, 174, 110, 246, 184, 182, 252, 218];
}

impl InstallerAccount for Registry {
    const NAME: &'static str = "Registry";
}

impl Registry {
    pub const LEN: usize = DISCRIMINATOR_LEN + 32 + 32 + 8 + 8 + 1 + 1;

    /// Fee charged for installing `amount` units.
    pub fn fee_for(&self, amount: u64) -> Option<u64> {
        self.fee_lamports.checked_mul(amount)
    }
}
