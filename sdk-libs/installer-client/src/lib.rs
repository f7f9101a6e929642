//! Client bindings for the token-installer program.
//!
//! Every account type is an 8-byte discriminator followed by its borsh
//! encoded fields. Instructions carry their own discriminator followed by the
//! borsh encoded arguments.

pub mod accounts;
pub mod error;
pub mod instructions;
pub mod pda;
pub mod program_error;
pub mod rpc;
pub mod types;

pub use accounts::{InstallReceipt, Installation, InstallerAccount, Registry};
pub use error::{ClientError, CodecError};
pub use installer_account_checks::{AccountError, Discriminator, DISCRIMINATOR_LEN};
pub use program_error::InstallerError;
pub use types::{InstallationKind, InstallationTag};

solana_program::declare_id!("CEuL7fKMPQ5g7mjJvktsMZZ54uDTnmpGZwJV6ZyMqn4E");

/// Maximum length in bytes of an installation name.
pub const MAX_NAME_LEN: usize = 32;
/// Maximum length in bytes of an installation uri.
pub const MAX_URI_LEN: usize = 200;
/// Maximum length in bytes of an install receipt memo.
pub const MAX_MEMO_LEN: usize = 64;
