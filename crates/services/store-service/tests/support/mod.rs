//! Shared setup for the integration tests.
//!
//! Every test gets its own in-memory SQLite database with all migrations
//! applied.

#![allow(dead_code)]

use common::DatabaseConfig;
use domain::{Address, Product, ProductType, Reference, Seller};
use store_service_lib::infra::Database;
use store_service_lib::repository::{ProductRepository, SellerRepository, Stores};

pub async fn setup() -> (Database, Stores) {
    let db = Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database should open");
    db.ping().await.expect("database should answer");
    let stores = Stores::new(&db);
    (db, stores)
}

pub async fn seller(stores: &Stores, email: &str) -> Seller {
    stores.sellers.save(Seller::new(email)).await.unwrap()
}

/// Save a product priced `price` in `city`, sold by `seller` when given
pub async fn product(
    stores: &Stores,
    name: &str,
    price: i32,
    product_type: ProductType,
    city: &str,
    seller: Option<&Seller>,
) -> Product {
    let mut product = Product::new(name, price, product_type)
        .with_address(Address::new(city, "Main st", "04524"));
    if let Some(id) = seller.and_then(|s| s.id) {
        product = product.with_seller(Reference::unloaded(id));
    }
    stores.products.save(product).await.unwrap()
}
