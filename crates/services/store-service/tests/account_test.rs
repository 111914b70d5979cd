//! Account CRUD.

mod support;

use domain::{Account, Role};
use store_service_lib::repository::AccountRepository;
use tokio_test::assert_ok;

#[tokio::test]
async fn account_round_trips_through_store() {
    let (_db, stores) = support::setup().await;

    let account = Account::new("admin", Role::Admin)
        .with_age(30)
        .with_description("a long description");
    let saved = assert_ok!(stores.accounts.save(account).await);
    let id = saved.id.unwrap();

    let found = stores.accounts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.username, "admin");
    assert_eq!(found.role, Role::Admin);
    assert_eq!(found.age, Some(30));
    assert_eq!(found.description.as_deref(), Some("a long description"));
}

#[tokio::test]
async fn update_keeps_id_and_delete_removes() {
    let (_db, stores) = support::setup().await;

    let saved = stores.accounts.save(Account::new("member", Role::User)).await.unwrap();

    let mut renamed = saved.clone();
    renamed.username = "renamed".to_string();
    let updated = stores.accounts.save(renamed).await.unwrap();
    assert_eq!(updated.id, saved.id);

    let all = stores.accounts.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].username, "renamed");

    assert_ok!(stores.accounts.delete(&updated).await);
    assert!(stores.accounts.find_all().await.unwrap().is_empty());

    let err = stores.accounts.delete(&updated).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}
