//! Seller database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::Seller;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seller")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn active_model(seller: &Seller) -> ActiveModel {
    ActiveModel {
        id: seller.id.map_or(NotSet, Set),
        email: Set(seller.email.clone()),
    }
}

impl From<Model> for Seller {
    fn from(model: Model) -> Self {
        Seller {
            id: Some(model.id),
            email: model.email,
        }
    }
}
