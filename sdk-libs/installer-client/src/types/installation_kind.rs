use std::{fmt, str::FromStr};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Whether an installation mints a fungible token or a non-fungible one.
///
/// Binary form is the variant index as a single byte. JSON form is
/// `{"kind": "<Variant>"}`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(tag = "kind")]
pub enum InstallationKind {
    #[default]
    Fungible,
    NonFungible,
}

impl InstallationKind {
    pub const ALL: [InstallationKind; 2] =
        [InstallationKind::Fungible, InstallationKind::NonFungible];

    pub fn name(&self) -> &'static str {
        match self {
            InstallationKind::Fungible => "Fungible",
            InstallationKind::NonFungible => "NonFungible",
        }
    }
}

impl fmt::Display for InstallationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InstallationKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                enum_name: "InstallationKind",
                value: s.to_string(),
            })
    }
}
