pub const DISCRIMINATOR_LEN: usize = 8;

/// Fixed 8-byte tag that prefixes every serialized account or instruction of
/// a given type.
pub trait Discriminator {
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        Self::DISCRIMINATOR
    }
}

/// Derives a discriminator as the first 8 bytes of `sha256("<namespace>:<name>")`.
pub fn hashed_discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("{}:{}", namespace, name);
    let hash = solana_program::hash::hash(preimage.as_bytes());
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash.to_bytes()[..DISCRIMINATOR_LEN]);
    discriminator
}
