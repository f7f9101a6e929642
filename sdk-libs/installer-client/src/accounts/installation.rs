use borsh::{BorshDeserialize, BorshSerialize};
use installer_account_checks::{Discriminator, DISCRIMINATOR_LEN};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use solana_program::pubkey::Pubkey;

use super::{option_space, string_space, InstallerAccount};
use crate::{
    types::{InstallationKind, InstallationTag},
    MAX_NAME_LEN, MAX_URI_LEN,
};

/// A token installed through the program, one per mint.
#[serde_as]
#[derive(
    Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Installation {
    #[serde_as(as = "DisplayFromStr")]
    pub authority: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub mint: Pubkey,
    #[serde_as(as = "DisplayFromStr")]
    pub registry: Pubkey,
    pub kind: InstallationKind,
    pub tag: InstallationTag,
    pub name: String,
    pub uri: String,
    pub supply: u64,
    pub max_supply: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub update_authority: Option<Pubkey>,
    pub created_at: i64,
    pub bump: u8,
}

impl Discriminator for Installation {
    const DISCRIMINATOR: [u8; 8] = [41, 180, 71, 11, 225, 93, 219, 219];
}

impl InstallerAccount for Installation {
    const NAME: &'static str = "Installation";
}

impl Installation {
    /// Allocated size for the longest name and uri.
    pub const LEN: usize = Self::space(MAX_NAME_LEN, MAX_URI_LEN);

    pub const fn space(name_len: usize, uri_len: usize) -> usize {
        DISCRIMINATOR_LEN
            + 32 * 3
            + 1
            + 1
            + string_space(name_len)
            + string_space(uri_len)
            + 8
            + option_space(8)
            + option_space(32)
            + 8
            + 1
    }

    /// Remaining units that can still be installed, `None` when uncapped.
    pub fn remaining_supply(&self) -> Option<u64> {
        self.max_supply
            .map(|max_supply| max_supply.saturating_sub(self.supply))
    }

    /// The key allowed to update metadata, falling back to the authority.
    pub fn effective_update_authority(&self) -> Pubkey {
        self.update_authority.unwrap_or(self.authority)
    }
}
