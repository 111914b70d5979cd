//! Custom product queries built over the shared [`QueryFactory`].
//!
//! These are the statements the derived repository methods cannot express:
//! fixed paging, grouping with a threshold, a fetch join, an average
//! subquery, projections and a transactional bulk update.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, Query, SimpleExpr};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::{debug, info};

use super::base::contains_text;
use super::entities::{
    product::{self, Entity as ProductEntity},
    seller,
};
use crate::infra::QueryFactory;
use common::{AppError, AppResult};
use domain::{
    Product, ProductSellerEmail, ProductType, TypePriceSum, BULK_UPDATE_PRICE_CEILING,
    PRODUCT_PAGE_OFFSET, PRODUCT_PAGE_SIZE, SUM_PRICE_THRESHOLD,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductQueries: Send + Sync {
    /// The fixed page: ids descending, skipping 30 rows, at most 10 rows
    async fn find_products(&self) -> AppResult<Vec<Product>>;

    /// The single product whose name contains `name`.
    ///
    /// The match is literal and case-sensitive. More than one match fails with [`AppError::NonUniqueResult`].
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    /// Price sums per product type, only for sums above the threshold
    async fn get_sum_price_by_types(&self) -> AppResult<Vec<TypePriceSum>>;

    /// Every product with its seller loaded by the same statement
    async fn find_products_and_sellers(&self) -> AppResult<Vec<Product>>;

    /// Products priced strictly above the average price
    async fn find_products_by_avg_price(&self) -> AppResult<Vec<Product>>;

    /// Distinct product names
    async fn find_product_names(&self) -> AppResult<Vec<String>>;

    /// Product names paired with their seller's email, `None` without a seller
    async fn find_products_name_and_seller_email(&self) -> AppResult<Vec<ProductSellerEmail>>;

    /// Raise by 10% every price below the ceiling, returning the updated row count.
    ///
    /// Products read before the call keep their old price in memory.
    async fn bulk_update_product_price(&self) -> AppResult<u64>;
}

/// Concrete implementation of ProductQueries
pub struct ProductQueryStore {
    factory: QueryFactory,
}

impl ProductQueryStore {
    pub fn new(factory: QueryFactory) -> Self {
        Self { factory }
    }
}

fn to_products(models: Vec<product::Model>) -> AppResult<Vec<Product>> {
    let products = models
        .into_iter()
        .map(Product::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(products)
}

#[async_trait]
impl ProductQueries for ProductQueryStore {
    async fn find_products(&self) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .order_by_desc(product::Column::Id)
            .offset(PRODUCT_PAGE_OFFSET)
            .limit(PRODUCT_PAGE_SIZE)
            .all(self.factory.connection())
            .await?;

        to_products(models)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        // Two rows are enough to tell a unique match from an ambiguous one
        let connection = self.factory.connection();
        let mut models = ProductEntity::find()
            .filter(contains_text(
                connection.get_database_backend(),
                product::Column::Name,
                name,
            ))
            .order_by_asc(product::Column::Id)
            .limit(2)
            .all(connection)
            .await?;

        if models.len() > 1 {
            debug!(name, "Product name matched more than one row");
            return Err(AppError::non_unique("Product"));
        }

        Ok(models.pop().map(Product::try_from).transpose()?)
    }

    async fn get_sum_price_by_types(&self) -> AppResult<Vec<TypePriceSum>> {
        let rows: Vec<(String, i64)> = ProductEntity::find()
            .select_only()
            .column(product::Column::ProductType)
            .column_as(product::Column::Price.sum(), "total")
            .group_by(product::Column::ProductType)
            .having(Expr::expr(product::Column::Price.sum()).gt(SUM_PRICE_THRESHOLD))
            .order_by_asc(product::Column::ProductType)
            .into_tuple()
            .all(self.factory.connection())
            .await?;

        let sums = rows
            .into_iter()
            .map(|(product_type, total)| {
                product_type
                    .parse::<ProductType>()
                    .map(|product_type| TypePriceSum {
                        product_type,
                        total,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sums)
    }

    async fn find_products_and_sellers(&self) -> AppResult<Vec<Product>> {
        let rows = ProductEntity::find()
            .find_also_related(seller::Entity)
            .order_by_asc(product::Column::Id)
            .all(self.factory.connection())
            .await?;

        let products = rows
            .into_iter()
            .map(|(model, seller)| product::into_domain(model, seller))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    async fn find_products_by_avg_price(&self) -> AppResult<Vec<Product>> {
        let average = Query::select()
            .expr(Func::avg(Expr::col(product::Column::Price)))
            .from(ProductEntity)
            .to_owned();

        let models = ProductEntity::find()
            .filter(Expr::col(product::Column::Price).gt(SimpleExpr::SubQuery(
                None,
                Box::new(average.into_sub_query_statement()),
            )))
            .order_by_asc(product::Column::Id)
            .all(self.factory.connection())
            .await?;

        to_products(models)
    }

    async fn find_product_names(&self) -> AppResult<Vec<String>> {
        let names: Vec<String> = ProductEntity::find()
            .select_only()
            .column(product::Column::Name)
            .distinct()
            .order_by_asc(product::Column::Name)
            .into_tuple()
            .all(self.factory.connection())
            .await?;
        Ok(names)
    }

    async fn find_products_name_and_seller_email(&self) -> AppResult<Vec<ProductSellerEmail>> {
        let rows: Vec<(String, Option<String>)> = ProductEntity::find()
            .select_only()
            .column_as(product::Column::Name, "name")
            .column_as(seller::Column::Email, "email")
            .left_join(seller::Entity)
            .order_by_asc(product::Column::Id)
            .into_tuple()
            .all(self.factory.connection())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, email)| ProductSellerEmail { name, email })
            .collect())
    }

    async fn bulk_update_product_price(&self) -> AppResult<u64> {
        let updated = self
            .factory
            .transaction(|txn| {
                Box::pin(async move {
                    let result = ProductEntity::update_many()
                        .col_expr(product::Column::Price, product::increased_price())
                        .filter(product::Column::Price.lt(BULK_UPDATE_PRICE_CEILING))
                        .exec(txn)
                        .await?;
                    Ok::<_, AppError>(result.rows_affected)
                })
            })
            .await?;

        info!(updated, "Product prices raised");
        Ok(updated)
    }
}
