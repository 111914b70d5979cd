//! Team database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::{Collection, Team};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::member::Entity")]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn active_model(team: &Team) -> ActiveModel {
    ActiveModel {
        id: team.id.map_or(NotSet, Set),
        team_name: Set(team.team_name.clone()),
    }
}

/// Members are not read with the team row.
impl From<Model> for Team {
    fn from(model: Model) -> Self {
        Team {
            id: Some(model.id),
            team_name: model.team_name,
            members: Collection::Unloaded,
        }
    }
}
