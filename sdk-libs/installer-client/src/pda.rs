use solana_program::pubkey::Pubkey;

pub const REGISTRY_SEED: &[u8] = b"registry";
pub const INSTALLATION_SEED: &[u8] = b"installation";
pub const RECEIPT_SEED: &[u8] = b"receipt";

pub fn find_registry_address(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REGISTRY_SEED, authority.as_ref()], program_id)
}

pub fn find_installation_address(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INSTALLATION_SEED, mint.as_ref()], program_id)
}

pub fn find_receipt_address(
    installation: &Pubkey,
    owner: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[RECEIPT_SEED, installation.as_ref(), owner.as_ref()],
        program_id,
    )
}
