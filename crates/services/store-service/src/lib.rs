//! Store Service Library
//!
//! Data-access layer for accounts, teams and members, products and sellers,
//! and the item hierarchy. The binary wraps it in a small CLI; tests drive the
//! stores directly.

pub mod config;
pub mod infra;
pub mod repository;
pub mod seed;

use serde_json::{json, Value};
use tracing::info;

use crate::config::StoreServiceConfig;
use crate::infra::Database;
use crate::repository::{ProductQueries, ProductRepository, Stores};
use domain::FetchMode;

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &StoreServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Write the demo data set, returning what was written as JSON.
pub async fn run_seed(config: &StoreServiceConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let summary = seed::seed(&Stores::new(&db)).await?;
    Ok(serde_json::to_value(summary)?)
}

/// Product query selected on the command line.
#[derive(Debug, Clone)]
pub enum ProductQuery {
    /// Every product with its seller loaded
    List,
    Page,
    Search(String),
    Sums,
    WithSellers,
    AboveAverage,
    Names,
    SellerEmails,
    Reprice,
    RepriceCity(String),
    Addresses,
}

/// Run one product query and return its result as JSON.
pub async fn run_product_query(
    config: &StoreServiceConfig,
    query: ProductQuery,
) -> Result<Value, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let stores = Stores::new(&db);
    let queries = &stores.product_queries;

    let value = match query {
        ProductQuery::List => {
            serde_json::to_value(stores.products.find_all(FetchMode::Eager).await?)?
        }
        ProductQuery::Page => serde_json::to_value(queries.find_products().await?)?,
        ProductQuery::Search(name) => serde_json::to_value(queries.find_by_name(&name).await?)?,
        ProductQuery::Sums => serde_json::to_value(queries.get_sum_price_by_types().await?)?,
        ProductQuery::WithSellers => {
            serde_json::to_value(queries.find_products_and_sellers().await?)?
        }
        ProductQuery::AboveAverage => {
            serde_json::to_value(queries.find_products_by_avg_price().await?)?
        }
        ProductQuery::Names => serde_json::to_value(queries.find_product_names().await?)?,
        ProductQuery::SellerEmails => {
            serde_json::to_value(queries.find_products_name_and_seller_email().await?)?
        }
        ProductQuery::Reprice => json!({ "updated": queries.bulk_update_product_price().await? }),
        ProductQuery::RepriceCity(prefix) => {
            json!({ "updated": stores.products.bulk_update_price_in_city(&prefix).await? })
        }
        ProductQuery::Addresses => {
            serde_json::to_value(stores.products.find_all_addresses().await?)?
        }
    };

    Ok(value)
}
