//! Custom product queries against a real database.

mod support;

use domain::{
    FetchMode, ProductSellerEmail, ProductType, Reference, TypePriceSum,
};
use store_service_lib::repository::{ProductQueries, ProductRepository};
use tokio_test::assert_ok;

use support::{product, seller};

#[tokio::test]
async fn fixed_page_is_fourth_page_of_descending_ids() {
    let (_db, stores) = support::setup().await;

    for n in 1..=45 {
        product(&stores, &format!("product{}", n), 100 * n, ProductType::Food, "Seoul", None).await;
    }

    let mut all_ids: Vec<i32> = stores
        .products
        .find_all(FetchMode::Lazy)
        .await
        .unwrap()
        .iter()
        .filter_map(|p| p.id)
        .collect();
    all_ids.sort_unstable_by(|a, b| b.cmp(a));

    let page = assert_ok!(stores.product_queries.find_products().await);
    let page_ids: Vec<i32> = page.iter().filter_map(|p| p.id).collect();

    assert_eq!(page_ids.len(), 10);
    assert!(page_ids.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(page_ids, all_ids[30..40].to_vec());
}

#[tokio::test]
async fn fixed_page_is_short_when_rows_run_out() {
    let (_db, stores) = support::setup().await;

    for n in 1..=35 {
        product(&stores, &format!("product{}", n), 100, ProductType::Food, "Seoul", None).await;
    }

    let page = stores.product_queries.find_products().await.unwrap();
    assert_eq!(page.len(), 5);
}

#[tokio::test]
async fn find_by_name_matches_substring() {
    let (_db, stores) = support::setup().await;

    product(&stores, "xxabcxx", 100, ProductType::Food, "Seoul", None).await;
    product(&stores, "other", 100, ProductType::Food, "Seoul", None).await;

    let found = assert_ok!(stores.product_queries.find_by_name("abc").await).unwrap();
    assert!(found.name.contains("abc"));

    let missing = stores.product_queries.find_by_name("zzz").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn find_by_name_with_two_matches_fails() {
    let (_db, stores) = support::setup().await;

    product(&stores, "abc-1", 100, ProductType::Food, "Seoul", None).await;
    product(&stores, "abc-2", 100, ProductType::Food, "Seoul", None).await;

    let err = stores.product_queries.find_by_name("abc").await.unwrap_err();
    assert_eq!(err.code(), "NON_UNIQUE_RESULT");
}

#[tokio::test]
async fn find_by_name_is_case_sensitive() {
    let (_db, stores) = support::setup().await;

    product(&stores, "ABC widget", 100, ProductType::Food, "Seoul", None).await;

    let found = stores.product_queries.find_by_name("abc").await.unwrap();
    assert!(found.is_none());

    let exact = stores.product_queries.find_by_name("ABC").await.unwrap();
    assert_eq!(exact.map(|p| p.name), Some("ABC widget".to_string()));
}

#[tokio::test]
async fn find_by_name_treats_wildcards_literally() {
    let (_db, stores) = support::setup().await;

    product(&stores, "Widget", 100, ProductType::Food, "Seoul", None).await;

    assert!(stores.product_queries.find_by_name("%").await.unwrap().is_none());
    assert!(stores.product_queries.find_by_name("W_dget").await.unwrap().is_none());

    product(&stores, "50% off", 100, ProductType::Food, "Seoul", None).await;
    let discounted = stores.product_queries.find_by_name("0%").await.unwrap();
    assert_eq!(discounted.map(|p| p.name), Some("50% off".to_string()));
}

#[tokio::test]
async fn sums_keep_only_groups_above_threshold() {
    let (_db, stores) = support::setup().await;

    product(&stores, "rice", 60_000, ProductType::Food, "Seoul", None).await;
    product(&stores, "kimchi", 50_000, ProductType::Food, "Seoul", None).await;
    product(&stores, "shirt", 40_000, ProductType::Clothing, "Seoul", None).await;
    product(&stores, "coat", 60_000, ProductType::Clothing, "Seoul", None).await;
    product(&stores, "phone", 90_000, ProductType::Electronics, "Seoul", None).await;

    let sums = assert_ok!(stores.product_queries.get_sum_price_by_types().await);

    // Clothing sums to exactly 100000 and is left out
    assert_eq!(
        sums,
        vec![TypePriceSum {
            product_type: ProductType::Food,
            total: 110_000
        }]
    );
}

#[tokio::test]
async fn fetch_join_loads_every_seller() {
    let (_db, stores) = support::setup().await;

    let kim = seller(&stores, "kim@shop.com").await;
    let lee = seller(&stores, "lee@shop.com").await;
    product(&stores, "Widget", 500, ProductType::Food, "Seoul", Some(&kim)).await;
    product(&stores, "Gadget", 700, ProductType::Food, "Seoul", Some(&lee)).await;
    product(&stores, "Orphan", 900, ProductType::Food, "Seoul", None).await;

    let products = assert_ok!(stores.product_queries.find_products_and_sellers().await);
    assert_eq!(products.len(), 3);

    let emails: Vec<Option<&str>> = products
        .iter()
        .map(|p| {
            p.seller
                .as_ref()
                .and_then(Reference::get)
                .map(|s| s.email.as_str())
        })
        .collect();
    assert_eq!(emails, vec![Some("kim@shop.com"), Some("lee@shop.com"), None]);
}

#[tokio::test]
async fn above_average_is_strict() {
    let (_db, stores) = support::setup().await;

    product(&stores, "cheap", 100, ProductType::Food, "Seoul", None).await;
    product(&stores, "middle", 200, ProductType::Food, "Seoul", None).await;
    product(&stores, "dear", 300, ProductType::Food, "Seoul", None).await;

    let products = assert_ok!(stores.product_queries.find_products_by_avg_price().await);
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["dear"]);
}

#[tokio::test]
async fn product_names_are_distinct() {
    let (_db, stores) = support::setup().await;

    product(&stores, "Widget", 100, ProductType::Food, "Seoul", None).await;
    product(&stores, "Widget", 200, ProductType::Food, "Seoul", None).await;
    product(&stores, "Gadget", 300, ProductType::Food, "Seoul", None).await;

    let names = assert_ok!(stores.product_queries.find_product_names().await);
    assert_eq!(names, vec!["Gadget", "Widget"]);
}

#[tokio::test]
async fn projection_pairs_name_with_seller_email() {
    let (_db, stores) = support::setup().await;

    let s = seller(&stores, "s@x.com").await;
    product(&stores, "Widget", 500, ProductType::Food, "Seoul", Some(&s)).await;
    product(&stores, "Loose", 500, ProductType::Food, "Seoul", None).await;

    let rows = assert_ok!(stores.product_queries.find_products_name_and_seller_email().await);
    assert_eq!(
        rows,
        vec![
            ProductSellerEmail {
                name: "Widget".to_string(),
                email: Some("s@x.com".to_string())
            },
            ProductSellerEmail {
                name: "Loose".to_string(),
                email: None
            },
        ]
    );
}

#[tokio::test]
async fn bulk_update_raises_prices_below_ceiling() {
    let (_db, stores) = support::setup().await;

    let prices = [1_000, 2_500, 9_990, 10_000, 25_000];
    let mut saved = Vec::new();
    for (n, price) in prices.iter().enumerate() {
        saved.push(product(&stores, &format!("p{}", n), *price, ProductType::Food, "Seoul", None).await);
    }

    let updated = assert_ok!(stores.product_queries.bulk_update_product_price().await);
    assert_eq!(updated, 3);

    // Records read before the update still carry the old price
    assert_eq!(saved[0].price, 1_000);

    let mut after = Vec::new();
    for product in &saved {
        let fresh = stores
            .products
            .find_by_id(product.id.unwrap(), FetchMode::Lazy)
            .await
            .unwrap()
            .unwrap();
        after.push(fresh.price);
    }
    assert_eq!(after, vec![1_100, 2_750, 10_989, 10_000, 25_000]);
}
