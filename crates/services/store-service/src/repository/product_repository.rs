//! Product repository.
//!
//! Besides CRUD this carries the derived queries over the embedded address
//! and the city-scoped bulk price update.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::{debug, info};

use super::base::{delete_model, in_transaction, persisted_id, save_model, starts_with_text};
use super::entities::{
    product::{self, Entity as ProductEntity},
    seller,
};
use common::{AppError, AppResult};
use domain::{Address, Entity, FetchMode, Product};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Validate and save a product. A referenced seller must already be stored.
    async fn save(&self, product: Product) -> AppResult<Product>;

    /// Eager reads join the seller row into the same statement
    async fn find_by_id(&self, id: i32, fetch: FetchMode) -> AppResult<Option<Product>>;

    async fn find_all(&self, fetch: FetchMode) -> AppResult<Vec<Product>>;

    async fn delete(&self, product: &Product) -> AppResult<()>;

    /// Addresses of every product that has one, in product order
    async fn find_all_addresses(&self) -> AppResult<Vec<Address>>;

    /// Name of every product, duplicates included, in product order
    async fn find_all_names(&self) -> AppResult<Vec<String>>;

    /// Raise by 10% the price of every product whose city starts with the prefix.
    ///
    /// The prefix is matched literally and case-sensitively.
    ///
    /// Returns the number of updated rows.
    async fn bulk_update_price_in_city(&self, city_prefix: &str) -> AppResult<u64>;
}

pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn save(&self, product: Product) -> AppResult<Product> {
        product.ensure_valid()?;
        if product.seller.is_some() && product.seller_id().is_none() {
            return Err(AppError::validation(format!(
                "Product '{}' references a seller that was never saved",
                product.name
            )));
        }

        let is_new = product.is_transient();
        let model = save_model(product::active_model(&product), is_new, &self.db).await?;
        debug!(product_id = model.id, is_new, "Product saved");

        Ok(Product {
            id: Some(model.id),
            ..product
        })
    }

    async fn find_by_id(&self, id: i32, fetch: FetchMode) -> AppResult<Option<Product>> {
        if fetch.is_eager() {
            let row = ProductEntity::find_by_id(id)
                .find_also_related(seller::Entity)
                .one(&self.db)
                .await?;
            return Ok(row
                .map(|(model, seller)| product::into_domain(model, seller))
                .transpose()?);
        }

        let model = ProductEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::try_from).transpose()?)
    }

    async fn find_all(&self, fetch: FetchMode) -> AppResult<Vec<Product>> {
        let rows = if fetch.is_eager() {
            ProductEntity::find()
                .find_also_related(seller::Entity)
                .order_by_asc(product::Column::Id)
                .all(&self.db)
                .await?
        } else {
            ProductEntity::find()
                .order_by_asc(product::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(|model| (model, None))
                .collect()
        };

        let products = rows
            .into_iter()
            .map(|(model, seller)| product::into_domain(model, seller))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    async fn delete(&self, product: &Product) -> AppResult<()> {
        delete_model::<ProductEntity, _>(&self.db, persisted_id(product)?).await
    }

    async fn find_all_addresses(&self) -> AppResult<Vec<Address>> {
        let rows: Vec<(Option<String>, Option<String>, Option<String>)> = ProductEntity::find()
            .select_only()
            .column(product::Column::City)
            .column(product::Column::Street)
            .column(product::Column::Zipcode)
            .order_by_asc(product::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(city, street, zipcode)| Address::from_columns(city, street, zipcode))
            .collect())
    }

    async fn find_all_names(&self) -> AppResult<Vec<String>> {
        let names: Vec<String> = ProductEntity::find()
            .select_only()
            .column(product::Column::Name)
            .order_by_asc(product::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(names)
    }

    async fn bulk_update_price_in_city(&self, city_prefix: &str) -> AppResult<u64> {
        let prefix = city_prefix.to_string();

        let updated = in_transaction(&self.db, move |txn| {
            Box::pin(async move {
                let result = ProductEntity::update_many()
                    .col_expr(product::Column::Price, product::increased_price())
                    .filter(starts_with_text(product::Column::City, &prefix))
                    .exec(txn)
                    .await?;
                Ok::<_, AppError>(result.rows_affected)
            })
        })
        .await?;

        info!(city_prefix, updated, "Product prices raised by city");
        Ok(updated)
    }
}
