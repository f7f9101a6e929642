use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
use thiserror::Error;

/// Custom errors returned by the on-chain program.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InstallerError {
    #[error("Signer is not the installation or registry authority")]
    Unauthorized,
    #[error("Installation name is longer than 32 bytes")]
    NameTooLong,
    #[error("Installation uri is longer than 200 bytes")]
    UriTooLong,
    #[error("Install amount would exceed max supply")]
    MaxSupplyExceeded,
    #[error("Registry is paused")]
    RegistryPaused,
    #[error("Install amount must be greater than zero")]
    InvalidAmount,
    #[error("Installation still has outstanding supply")]
    SupplyOutstanding,
    #[error("Install memo is longer than 64 bytes")]
    MemoTooLong,
}

impl InstallerError {
    pub const ALL: [InstallerError; 8] = [
        InstallerError::Unauthorized,
        InstallerError::NameTooLong,
        InstallerError::UriTooLong,
        InstallerError::MaxSupplyExceeded,
        InstallerError::RegistryPaused,
        InstallerError::InvalidAmount,
        InstallerError::SupplyOutstanding,
        InstallerError::MemoTooLong,
    ];

    pub fn code(self) -> u32 {
        self.into()
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.code() == code)
    }

    /// Extracts the program error from a failed transaction, if the failing
    /// instruction returned one of this program's custom codes.
    pub fn from_transaction_error(err: &TransactionError) -> Option<Self> {
        match err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
                Self::from_code(*code)
            }
            _ => None,
        }
    }
}

impl From<InstallerError> for u32 {
    fn from(e: InstallerError) -> u32 {
        match e {
            InstallerError::Unauthorized => 6000,
            InstallerError::NameTooLong => 6001,
            InstallerError::UriTooLong => 6002,
            InstallerError::MaxSupplyExceeded => 6003,
            InstallerError::RegistryPaused => 6004,
            InstallerError::InvalidAmount => 6005,
            InstallerError::SupplyOutstanding => 6006,
            InstallerError::MemoTooLong => 6007,
        }
    }
}

impl From<InstallerError> for solana_program::program_error::ProgramError {
    fn from(e: InstallerError) -> Self {
        solana_program::program_error::ProgramError::Custom(e.into())
    }
}
