pub mod checks;
pub mod discriminator;
pub mod error;

pub use checks::*;
pub use discriminator::{Discriminator, DISCRIMINATOR_LEN};
pub use error::AccountError;
