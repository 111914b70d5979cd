//! Team repository with cascading persist and remove.
//!
//! Saving a team writes the members of a loaded collection in the same
//! transaction. Deleting a team deletes its stored members first.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{debug, info};

use super::base::{delete_model, find_model, in_transaction, persisted_id, save_model};
use super::entities::{
    member::{self, Entity as MemberEntity},
    team::{self, Entity as TeamEntity},
};
use super::member_repository::save_member;
use common::AppResult;
use domain::{Collection, Entity, FetchMode, Member, Reference, Team};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Save the team and every member in its loaded collection.
    ///
    /// Members are pointed at the team before they are written.
    async fn save(&self, team: Team) -> AppResult<Team>;

    /// Eager reads load the member collection, lazy reads leave it unloaded
    async fn find_by_id(&self, id: i32, fetch: FetchMode) -> AppResult<Option<Team>>;

    async fn find_all(&self, fetch: FetchMode) -> AppResult<Vec<Team>>;

    /// Delete the team and its members, returning how many members went with it
    async fn delete(&self, team: &Team) -> AppResult<u64>;
}

pub struct TeamStore {
    db: DatabaseConnection,
}

impl TeamStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamRepository for TeamStore {
    async fn save(&self, team: Team) -> AppResult<Team> {
        in_transaction(&self.db, move |txn| {
            Box::pin(async move { save_team(txn, team).await })
        })
        .await
    }

    async fn find_by_id(&self, id: i32, fetch: FetchMode) -> AppResult<Option<Team>> {
        let Some(model) = find_model::<TeamEntity, _>(&self.db, id).await? else {
            return Ok(None);
        };

        let mut teams = load_teams(&self.db, vec![model], fetch).await?;
        Ok(teams.pop())
    }

    async fn find_all(&self, fetch: FetchMode) -> AppResult<Vec<Team>> {
        let models = TeamEntity::find()
            .order_by_asc(team::Column::Id)
            .all(&self.db)
            .await?;

        load_teams(&self.db, models, fetch).await
    }

    async fn delete(&self, team: &Team) -> AppResult<u64> {
        let id = persisted_id(team)?;

        let removed = in_transaction(&self.db, move |txn| {
            Box::pin(async move {
                let members = MemberEntity::delete_many()
                    .filter(member::Column::TeamId.eq(id))
                    .exec(txn)
                    .await?;
                delete_model::<TeamEntity, _>(txn, id).await?;
                Ok::<_, common::AppError>(members.rows_affected)
            })
        })
        .await?;

        info!(team_id = id, members = removed, "Team deleted");
        Ok(removed)
    }
}

async fn save_team<C: ConnectionTrait>(db: &C, mut team: Team) -> AppResult<Team> {
    let is_new = team.is_transient();
    let members = team.members.take();

    let model = save_model(team::active_model(&team), is_new, db).await?;
    team.id = Some(model.id);

    if let Some(members) = members {
        let mut saved = Vec::with_capacity(members.len());
        for member in members {
            let member = member.with_team(Reference::unloaded(model.id));
            saved.push(save_member(db, member).await?);
        }
        debug!(team_id = model.id, members = saved.len(), "Team members cascaded");
        team.members = Collection::Loaded(saved);
    }

    Ok(team)
}

async fn load_teams<C: ConnectionTrait>(
    db: &C,
    models: Vec<team::Model>,
    fetch: FetchMode,
) -> AppResult<Vec<Team>> {
    if !fetch.is_eager() || models.is_empty() {
        return Ok(models.into_iter().map(Team::from).collect());
    }

    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut by_team: HashMap<i32, Vec<Member>> = HashMap::new();
    for model in MemberEntity::find()
        .filter(member::Column::TeamId.is_in(ids))
        .order_by_asc(member::Column::Id)
        .all(db)
        .await?
    {
        if let Some(team_id) = model.team_id {
            by_team.entry(team_id).or_default().push(Member::from(model));
        }
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let members = by_team.remove(&model.id).unwrap_or_default();
            Team {
                members: Collection::Loaded(members),
                ..Team::from(model)
            }
        })
        .collect())
}
