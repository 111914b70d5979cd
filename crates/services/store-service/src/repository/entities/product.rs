//! Product database entity for SeaORM.
//!
//! The embedded address is flattened into three nullable columns.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::ActiveValue::{NotSet, Set};

use domain::{Address, DomainError, Product, Reference, Seller, PRICE_INCREASE_RATE};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub product_type: String,
    pub city: Option<String>,
    pub street: Option<String>,
    pub zipcode: Option<String>,
    pub seller_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seller::Entity",
        from = "Column::SellerId",
        to = "super::seller::Column::Id"
    )]
    Seller,
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn active_model(product: &Product) -> ActiveModel {
    let address = product.address.as_ref();

    ActiveModel {
        id: product.id.map_or(NotSet, Set),
        name: Set(product.name.clone()),
        price: Set(product.price),
        product_type: Set(product.product_type.as_str().to_string()),
        city: Set(address.map(|a| a.city.clone())),
        street: Set(address.map(|a| a.street.clone())),
        zipcode: Set(address.map(|a| a.zipcode.clone())),
        seller_id: Set(product.seller_id()),
    }
}

/// Rebuild a product, attaching the seller row when it was joined.
pub fn into_domain(model: Model, seller: Option<super::seller::Model>) -> Result<Product, DomainError> {
    let mut product = Product::try_from(model)?;
    if let Some(seller) = seller {
        product.seller = Some(Reference::loaded(Seller::from(seller)));
    }
    Ok(product)
}

/// Price after one increase, rounded to the nearest integer.
pub fn increased_price() -> SimpleExpr {
    Func::cast_as(
        Func::round(Expr::col(Column::Price).mul(PRICE_INCREASE_RATE)),
        Alias::new("INTEGER"),
    )
    .into()
}

impl TryFrom<Model> for Product {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Product {
            id: Some(model.id),
            name: model.name,
            price: model.price,
            product_type: model.product_type.parse()?,
            address: Address::from_columns(model.city, model.street, model.zipcode),
            seller: model.seller_id.map(Reference::unloaded),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn repricing_sql(backend: DbBackend) -> String {
        Entity::update_many()
            .col_expr(Column::Price, increased_price())
            .build(backend)
            .sql
    }

    #[test]
    fn repricing_binds_rate_on_sqlite() {
        let sql = repricing_sql(DbBackend::Sqlite);
        assert!(sql.contains(r#"ROUND("price" * ?)"#), "{}", sql);
        assert!(sql.contains("AS INTEGER"), "{}", sql);
        assert!(!sql.contains('$'), "{}", sql);
    }

    #[test]
    fn repricing_binds_rate_on_postgres() {
        let sql = repricing_sql(DbBackend::Postgres);
        assert!(sql.contains(r#"ROUND("price" * $1)"#), "{}", sql);
    }
}
