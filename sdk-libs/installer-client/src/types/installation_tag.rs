use std::{fmt, str::FromStr};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Classification of an installation.
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
pub enum InstallationTag {
    #[default]
    Art,
    Collectible,
    Gaming,
    Utility,
}

impl InstallationTag {
    pub const ALL: [InstallationTag; 4] = [
        InstallationTag::Art,
        InstallationTag::Collectible,
        InstallationTag::Gaming,
        InstallationTag::Utility,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InstallationTag::Art => "Art",
            InstallationTag::Collectible => "Collectible",
            InstallationTag::Gaming => "Gaming",
            InstallationTag::Utility => "Utility",
        }
    }
}

impl fmt::Display for InstallationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InstallationTag {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                enum_name: "InstallationTag",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_index_is_wire_byte() {
        for (i, tag) in InstallationTag::ALL.into_iter().enumerate() {
            assert_eq!(borsh::to_vec(&tag).unwrap(), vec![i as u8]);
        }
        assert!(InstallationTag::try_from_slice(&[4]).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("gaming".parse(), Ok(InstallationTag::Gaming));
        assert_eq!("Utility".parse(), Ok(InstallationTag::Utility));
        assert!("Music".parse::<InstallationTag>().is_err());
    }
}
