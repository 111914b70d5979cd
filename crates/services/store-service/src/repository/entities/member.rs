//! Member database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use domain::{Member, Reference};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub team_id: Option<i32>,
    #[sea_orm(unique)]
    pub locker_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,

    #[sea_orm(
        belongs_to = "super::locker::Entity",
        from = "Column::LockerId",
        to = "super::locker::Column::Id"
    )]
    Locker,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::locker::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Locker.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Build the active model written by a save.
///
/// Associations are written through their identifiers only.
pub fn active_model(member: &Member) -> ActiveModel {
    ActiveModel {
        id: member.id.map_or(NotSet, Set),
        username: Set(member.username.clone()),
        team_id: Set(member.team_id()),
        locker_id: Set(member.locker_id()),
    }
}

/// Associations come back unloaded.
impl From<Model> for Member {
    fn from(model: Model) -> Self {
        Member {
            id: Some(model.id),
            username: model.username,
            team: model.team_id.map(Reference::unloaded),
            locker: model.locker_id.map(Reference::unloaded),
        }
    }
}
