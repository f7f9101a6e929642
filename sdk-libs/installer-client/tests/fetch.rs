use installer_client::{
    rpc::MemoryRpc, AccountError, ClientError, Installation, InstallationKind, InstallationTag,
    InstallerAccount, Registry,
};
use solana_program::pubkey::Pubkey;

fn test_registry() -> Registry {
    Registry {
        authority: Pubkey::new_unique(),
        treasury: Pubkey::new_unique(),
        fee_lamports: 1_000,
        installation_count: 2,
        paused: false,
        bump: 251,
    }
}

#[tokio::test]
async fn test_fetch_decodes_owned_account() {
    let rpc = MemoryRpc::new();
    let address = Pubkey::new_unique();
    let registry = test_registry();
    rpc.set_account_data(address, installer_client::ID, registry.encode().unwrap());

    let fetched = Registry::fetch(&rpc, &address, &installer_client::ID)
        .await
        .unwrap();
    assert_eq!(fetched, Some(registry));
}

#[tokio::test]
async fn test_fetch_missing_account_is_none() {
    let rpc = MemoryRpc::new();
    let fetched = Registry::fetch(&rpc, &Pubkey::new_unique(), &installer_client::ID)
        .await
        .unwrap();
    assert_eq!(fetched, None);
}

#[tokio::test]
async fn test_fetch_rejects_wrong_owner_even_if_data_is_valid() {
    let rpc = MemoryRpc::new();
    let address = Pubkey::new_unique();
    let other_program = Pubkey::new_unique();
    rpc.set_account_data(address, other_program, test_registry().encode().unwrap());

    let err = Registry::fetch(&rpc, &address, &installer_client::ID)
        .await
        .unwrap_err();
    match err {
        ClientError::Account(AccountError::AccountOwnedByWrongProgram { expected, actual }) => {
            assert_eq!(expected, installer_client::ID);
            assert_eq!(actual, other_program);
        }
        other => panic!("unexpected error {:?}", other),
    }

    // Malformed data under the wrong owner still reports the owner mismatch.
    rpc.set_account_data(address, other_program, vec![0u8; 3]);
    assert!(matches!(
        Registry::fetch(&rpc, &address, &installer_client::ID).await,
        Err(ClientError::Account(
            AccountError::AccountOwnedByWrongProgram { .. }
        ))
    ));
}

#[tokio::test]
async fn test_fetch_wrong_account_type() {
    let rpc = MemoryRpc::new();
    let address = Pubkey::new_unique();
    rpc.set_account_data(address, installer_client::ID, test_registry().encode().unwrap());

    let err = Installation::fetch(&rpc, &address, &installer_client::ID)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Codec(ref e) if e.is_invalid_discriminator()));
}

#[tokio::test]
async fn test_fetch_multiple_preserves_order() {
    let rpc = MemoryRpc::new();
    let first = Pubkey::new_unique();
    let missing = Pubkey::new_unique();
    let second = Pubkey::new_unique();
    let installation = |name: &str| Installation {
        authority: Pubkey::new_unique(),
        mint: Pubkey::new_unique(),
        registry: Pubkey::new_unique(),
        kind: InstallationKind::Fungible,
        tag: InstallationTag::Utility,
        name: name.to_string(),
        uri: String::new(),
        supply: 0,
        max_supply: None,
        update_authority: None,
        created_at: 0,
        bump: 255,
    };
    let a = installation("a");
    let b = installation("b");
    rpc.set_account_data(first, installer_client::ID, a.encode().unwrap());
    rpc.set_account_data(second, installer_client::ID, b.encode().unwrap());

    let fetched =
        Installation::fetch_multiple(&rpc, &[second, missing, first], &installer_client::ID)
            .await
            .unwrap();
    assert_eq!(fetched, vec![Some(b), None, Some(a)]);

    rpc.set_account_data(missing, Pubkey::new_unique(), vec![]);
    assert!(
        Installation::fetch_multiple(&rpc, &[first, missing], &installer_client::ID)
            .await
            .is_err()
    );
}
