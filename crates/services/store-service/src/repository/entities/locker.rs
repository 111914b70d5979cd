//! Locker database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::Locker;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locker")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::member::Entity")]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn active_model(locker: &Locker) -> ActiveModel {
    ActiveModel {
        id: locker.id.map_or(NotSet, Set),
        name: Set(locker.name.clone()),
    }
}

impl From<Model> for Locker {
    fn from(model: Model) -> Self {
        Locker {
            id: Some(model.id),
            name: model.name,
        }
    }
}
