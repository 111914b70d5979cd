//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::{Account, DomainError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "name")]
    pub username: String,
    pub age: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub role: String,
    pub create_date: Date,
    pub update_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Build the active model written by a save
pub fn active_model(account: &Account) -> ActiveModel {
    ActiveModel {
        id: account.id.map_or(NotSet, Set),
        username: Set(account.username.clone()),
        age: Set(account.age),
        description: Set(account.description.clone()),
        role: Set(account.role.as_str().to_string()),
        create_date: Set(account.create_date),
        update_date: Set(account.update_date),
    }
}

/// Convert database model to domain entity
impl TryFrom<Model> for Account {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Account {
            id: Some(model.id),
            username: model.username,
            age: model.age,
            description: model.description,
            role: model.role.parse()?,
            create_date: model.create_date,
            update_date: model.update_date,
        })
    }
}
