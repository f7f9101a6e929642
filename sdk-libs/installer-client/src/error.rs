use installer_account_checks::AccountError;
use thiserror::Error;

use crate::program_error::InstallerError;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Account check failed: {0}")]
    Account(#[from] AccountError),

    #[error("Failed to deserialize {type_name}: {source}")]
    Deserialize {
        type_name: &'static str,
        source: std::io::Error,
    },

    #[error("Failed to serialize: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown instruction discriminator {0:?}")]
    UnknownInstruction([u8; 8]),

    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InstallerError),
}

impl CodecError {
    pub fn is_invalid_discriminator(&self) -> bool {
        matches!(
            self,
            CodecError::Account(AccountError::InvalidDiscriminator { .. })
                | CodecError::UnknownInstruction(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Account check failed: {0}")]
    Account(#[from] AccountError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("RPC error: {0}")]
    Rpc(#[from] Box<solana_client::client_error::ClientError>),

    #[error("Expected {expected} accounts, RPC returned {actual}")]
    AccountCountMismatch { expected: usize, actual: usize },

    #[error("Error: `{0}`")]
    CustomError(String),
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        ClientError::Rpc(Box::new(err))
    }
}
