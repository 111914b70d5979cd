//! Product and seller CRUD, address queries and the city bulk update.

mod support;

use domain::{Address, FetchMode, Product, ProductType, Reference, Seller};
use store_service_lib::repository::{resolve, ProductRepository, SellerRepository};
use tokio_test::assert_ok;

use support::{product, seller};

#[tokio::test]
async fn save_assigns_id_and_update_keeps_it() {
    let (_db, stores) = support::setup().await;

    let saved = product(&stores, "Widget", 500, ProductType::Food, "Seoul", None).await;
    let id = saved.id.unwrap();

    let mut changed = saved.clone();
    changed.price = 700;
    let updated = assert_ok!(stores.products.save(changed).await);
    assert_eq!(updated.id, Some(id));

    let found = stores
        .products
        .find_by_id(id, FetchMode::Lazy)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.price, 700);
    assert_eq!(found.address, Some(Address::new("Seoul", "Main st", "04524")));
}

#[tokio::test]
async fn invalid_product_is_not_stored() {
    let (_db, stores) = support::setup().await;

    let err = stores
        .products
        .save(Product::new("Widget", 0, ProductType::Food))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    let unsaved_seller = Product::new("Widget", 10, ProductType::Food)
        .with_seller(Reference::loaded(Seller::new("s@x.com")));
    assert!(stores.products.save(unsaved_seller).await.is_err());

    assert!(stores.products.find_all(FetchMode::Lazy).await.unwrap().is_empty());
}

#[tokio::test]
async fn eager_read_joins_seller_and_lazy_read_resolves_it() {
    let (_db, stores) = support::setup().await;

    let s = seller(&stores, "s@x.com").await;
    let saved = product(&stores, "Widget", 500, ProductType::Food, "Seoul", Some(&s)).await;
    let id = saved.id.unwrap();

    let eager = stores.products.find_by_id(id, FetchMode::Eager).await.unwrap().unwrap();
    let loaded = eager.seller.as_ref().and_then(Reference::get).unwrap();
    assert_eq!(loaded.email, "s@x.com");

    let mut lazy = stores.products.find_by_id(id, FetchMode::Lazy).await.unwrap().unwrap();
    let reference = lazy.seller.as_mut().unwrap();
    assert!(!reference.is_loaded());
    let resolved = assert_ok!(resolve(reference, &stores.sellers).await);
    assert_eq!(resolved.id, s.id);
}

#[tokio::test]
async fn delete_removes_row_and_missing_delete_fails() {
    let (_db, stores) = support::setup().await;

    let saved = product(&stores, "Widget", 500, ProductType::Food, "Seoul", None).await;
    assert_ok!(stores.products.delete(&saved).await);
    assert!(stores
        .products
        .find_by_id(saved.id.unwrap(), FetchMode::Lazy)
        .await
        .unwrap()
        .is_none());

    let err = stores.products.delete(&saved).await.unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");

    let transient = Product::new("Ghost", 1, ProductType::Food);
    assert!(stores.products.delete(&transient).await.is_err());
}

#[tokio::test]
async fn seller_with_products_cannot_be_deleted() {
    let (_db, stores) = support::setup().await;

    let s = seller(&stores, "s@x.com").await;
    product(&stores, "Widget", 500, ProductType::Food, "Seoul", Some(&s)).await;

    let err = stores.sellers.delete(&s).await.unwrap_err();
    assert_eq!(err.code(), "DATABASE_ERROR");
}

#[tokio::test]
async fn addresses_skip_products_without_one() {
    let (_db, stores) = support::setup().await;

    product(&stores, "Widget", 500, ProductType::Food, "Seoul", None).await;
    stores
        .products
        .save(Product::new("Nowhere", 10, ProductType::Food))
        .await
        .unwrap();
    product(&stores, "Gadget", 900, ProductType::Electronics, "Busan", None).await;

    let cities: Vec<_> = stores
        .products
        .find_all_addresses()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.city)
        .collect();
    assert_eq!(cities, vec!["Seoul", "Busan"]);
}

#[tokio::test]
async fn all_names_keep_duplicates() {
    let (_db, stores) = support::setup().await;

    product(&stores, "Widget", 500, ProductType::Food, "Seoul", None).await;
    product(&stores, "Widget", 600, ProductType::Food, "Seoul", None).await;
    product(&stores, "Gadget", 900, ProductType::Food, "Seoul", None).await;

    let names = stores.products.find_all_names().await.unwrap();
    assert_eq!(names, vec!["Widget", "Widget", "Gadget"]);
}

#[tokio::test]
async fn city_bulk_update_only_touches_matching_cities() {
    let (_db, stores) = support::setup().await;

    let seoul = product(&stores, "Widget", 1_000, ProductType::Food, "Seoul", None).await;
    let seoul_gu = product(&stores, "Gizmo", 250, ProductType::Food, "Seoul-si", None).await;
    let busan = product(&stores, "Gadget", 1_000, ProductType::Food, "Busan", None).await;

    let updated = assert_ok!(stores.products.bulk_update_price_in_city("Seoul").await);
    assert_eq!(updated, 2);

    let price = |id: Option<i32>| {
        let products = &stores.products;
        async move {
            products
                .find_by_id(id.unwrap(), FetchMode::Lazy)
                .await
                .unwrap()
                .unwrap()
                .price
        }
    };
    assert_eq!(price(seoul.id).await, 1_100);
    assert_eq!(price(seoul_gu.id).await, 275);
    assert_eq!(price(busan.id).await, 1_000);
}

#[tokio::test]
async fn city_prefix_is_literal_and_case_sensitive() {
    let (_db, stores) = support::setup().await;

    let seoul = product(&stores, "Widget", 1_000, ProductType::Food, "Seoul", None).await;

    assert_eq!(stores.products.bulk_update_price_in_city("%").await.unwrap(), 0);
    assert_eq!(stores.products.bulk_update_price_in_city("S_oul").await.unwrap(), 0);
    assert_eq!(stores.products.bulk_update_price_in_city("seoul").await.unwrap(), 0);

    let unchanged = stores
        .products
        .find_by_id(seoul.id.unwrap(), FetchMode::Lazy)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.price, 1_000);
}
