use solana_program::pubkey::Pubkey;

use crate::{
    discriminator::{Discriminator, DISCRIMINATOR_LEN},
    error::AccountError,
};

/// Checks:
/// 1. account owned by program_id
/// 2. account discriminator
pub fn check_account<T: Discriminator>(
    program_id: &Pubkey,
    owner: &Pubkey,
    data: &[u8],
) -> Result<(), AccountError> {
    check_owner(program_id, owner)?;
    check_discriminator::<T>(data)
}

pub fn check_owner(expected: &Pubkey, actual: &Pubkey) -> Result<(), AccountError> {
    if expected != actual {
        return Err(AccountError::AccountOwnedByWrongProgram {
            expected: *expected,
            actual: *actual,
        });
    }
    Ok(())
}

/// Checks that `bytes` starts with `T`'s discriminator.
///
/// Buffers shorter than the discriminator can never match and are reported
/// as an invalid discriminator as well.
pub fn check_discriminator<T: Discriminator>(bytes: &[u8]) -> Result<(), AccountError> {
    check_discriminator_bytes(&T::DISCRIMINATOR, bytes)
}

pub fn check_discriminator_bytes(
    expected: &[u8; DISCRIMINATOR_LEN],
    bytes: &[u8],
) -> Result<(), AccountError> {
    let prefix = &bytes[..bytes.len().min(DISCRIMINATOR_LEN)];
    if prefix != expected {
        return Err(AccountError::InvalidDiscriminator {
            expected: *expected,
            actual: prefix.to_vec(),
        });
    }
    Ok(())
}

/// Returns the leading discriminator of `bytes`.
pub fn read_discriminator(bytes: &[u8]) -> Result<[u8; DISCRIMINATOR_LEN], AccountError> {
    if bytes.len() < DISCRIMINATOR_LEN {
        return Err(AccountError::InvalidAccountSize);
    }
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&bytes[..DISCRIMINATOR_LEN]);
    Ok(discriminator)
}

/// Checks:
/// 1. discriminator is uninitialized
/// 2. sets discriminator
pub fn set_discriminator<T: Discriminator>(bytes: &mut [u8]) -> Result<(), AccountError> {
    if bytes.len() < DISCRIMINATOR_LEN {
        return Err(AccountError::InvalidAccountSize);
    }
    check_data_is_zeroed::<DISCRIMINATOR_LEN>(bytes)
        .map_err(|_| AccountError::AlreadyInitialized)?;
    bytes[..DISCRIMINATOR_LEN].copy_from_slice(&T::DISCRIMINATOR);
    Ok(())
}

/// Check that an account is not initialized by checking its first N bytes are zeroed.
pub fn check_data_is_zeroed<const N: usize>(data: &[u8]) -> Result<(), AccountError> {
    if data.len() < N {
        return Err(AccountError::InvalidAccountSize);
    }
    if data[..N].iter().any(|&byte| byte != 0) {
        return Err(AccountError::AccountNotZeroed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    struct TestAccount;

    impl Discriminator for TestAccount {
        const DISCRIMINATOR: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
    }

    #[test]
    fn test_check_discriminator() {
        let mut data = TestAccount::DISCRIMINATOR.to_vec();
        data.extend_from_slice(&[0u8; 32]);
        assert_eq!(check_discriminator::<TestAccount>(&data), Ok(()));

        assert_eq!(
            check_discriminator::<TestAccount>(&data[..7]),
            Err(AccountError::InvalidDiscriminator {
                expected: TestAccount::DISCRIMINATOR,
                actual: vec![1, 2, 3, 4, 5, 6, 7],
            })
        );
        assert!(matches!(
            check_discriminator::<TestAccount>(&[]),
            Err(AccountError::InvalidDiscriminator { .. })
        ));

        data[7] = 9;
        assert_eq!(
            check_discriminator::<TestAccount>(&data),
            Err(AccountError::InvalidDiscriminator {
                expected: TestAccount::DISCRIMINATOR,
                actual: vec![1, 2, 3, 4, 5, 6, 7, 9],
            })
        );
    }

    #[test]
    fn test_randomized_wrong_discriminator() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1_000 {
            let len = rng.gen_range(0..512);
            let mut data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            if len >= 8 && data[..8] == TestAccount::DISCRIMINATOR {
                data[0] ^= 0xff;
            }
            assert!(matches!(
                check_discriminator::<TestAccount>(&data),
                Err(AccountError::InvalidDiscriminator { .. })
            ));
        }
    }

    #[test]
    fn test_read_discriminator() {
        assert_eq!(
            read_discriminator(&TestAccount::DISCRIMINATOR),
            Ok(TestAccount::DISCRIMINATOR)
        );
        assert_eq!(
            read_discriminator(&[1, 2, 3]),
            Err(AccountError::InvalidAccountSize)
        );
    }

    #[test]
    fn test_check_owner() {
        let program_id = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        assert_eq!(check_owner(&program_id, &program_id), Ok(()));
        assert_eq!(
            check_owner(&program_id, &other),
            Err(AccountError::AccountOwnedByWrongProgram {
                expected: program_id,
                actual: other,
            })
        );
    }

    #[test]
    fn test_check_account_checks_owner_before_discriminator() {
        let program_id = Pubkey::new_unique();
        let data = TestAccount::DISCRIMINATOR.to_vec();
        assert!(check_account::<TestAccount>(&program_id, &program_id, &data).is_ok());
        assert!(matches!(
            check_account::<TestAccount>(&program_id, &Pubkey::new_unique(), &data),
            Err(AccountError::AccountOwnedByWrongProgram { .. })
        ));
    }

    #[test]
    fn test_set_discriminator() {
        let mut data = vec![0u8; 16];
        set_discriminator::<TestAccount>(&mut data).unwrap();
        assert_eq!(data[..8], TestAccount::DISCRIMINATOR);
        assert_eq!(
            set_discriminator::<TestAccount>(&mut data),
            Err(AccountError::AlreadyInitialized)
        );
        assert_eq!(
            set_discriminator::<TestAccount>(&mut [0u8; 4]),
            Err(AccountError::InvalidAccountSize)
        );
    }

    #[test]
    fn test_check_data_is_zeroed() {
        assert_eq!(check_data_is_zeroed::<8>(&[0u8; 8]), Ok(()));
        assert_eq!(
            check_data_is_zeroed::<8>(&[0, 0, 0, 1, 0, 0, 0, 0]),
            Err(AccountError::AccountNotZeroed)
        );
    }
}
