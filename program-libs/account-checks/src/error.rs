use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AccountError {
    #[error("Account data is smaller than the discriminator.")]
    InvalidAccountSize,
    #[error("Invalid discriminator: expected {expected:?}, got {actual:?}.")]
    InvalidDiscriminator { expected: [u8; 8], actual: Vec<u8> },
    #[error("Account is owned by {actual}, expected {expected}.")]
    AccountOwnedByWrongProgram {
        expected: solana_program::pubkey::Pubkey,
        actual: solana_program::pubkey::Pubkey,
    },
    #[error("Account is already initialized.")]
    AlreadyInitialized,
    #[error("Account is not zeroed.")]
    AccountNotZeroed,
}

impl From<AccountError> for u32 {
    fn from(e: AccountError) -> u32 {
        match e {
            AccountError::InvalidAccountSize => 12001,
            AccountError::InvalidDiscriminator { .. } => 12002,
            AccountError::AccountOwnedByWrongProgram { .. } => 12003,
            AccountError::AlreadyInitialized => 12004,
            AccountError::AccountNotZeroed => 12005,
        }
    }
}

impl From<AccountError> for solana_program::program_error::ProgramError {
    fn from(e: AccountError) -> Self {
        solana_program::program_error::ProgramError::Custom(e.into())
    }
}
