//! Member repository.
//!
//! Reads take a [`FetchMode`]: lazy reads return the team and locker as
//! unloaded references, eager reads batch-load them with one extra query
//! per association.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::base::{delete_model, find_model, persisted_id, save_model};
use super::entities::{
    locker::{self, Entity as LockerEntity},
    member::{self, Entity as MemberEntity},
    team::{self, Entity as TeamEntity},
};
use common::{AppError, AppResult};
use domain::{Entity, FetchMode, Locker, Member, Reference, Team};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert or update a member.
    ///
    /// Referenced team and locker must already be stored.
    async fn save(&self, member: Member) -> AppResult<Member>;

    async fn find_by_id(&self, id: i32, fetch: FetchMode) -> AppResult<Option<Member>>;

    async fn find_all(&self, fetch: FetchMode) -> AppResult<Vec<Member>>;

    /// Members stored with a team, in identifier order
    async fn find_by_team(&self, team_id: i32) -> AppResult<Vec<Member>>;

    async fn delete(&self, member: &Member) -> AppResult<()>;
}

pub struct MemberStore {
    db: DatabaseConnection,
}

impl MemberStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemberRepository for MemberStore {
    async fn save(&self, member: Member) -> AppResult<Member> {
        save_member(&self.db, member).await
    }

    async fn find_by_id(&self, id: i32, fetch: FetchMode) -> AppResult<Option<Member>> {
        let Some(model) = find_model::<MemberEntity, _>(&self.db, id).await? else {
            return Ok(None);
        };

        let mut members = load_members(&self.db, vec![model], fetch).await?;
        Ok(members.pop())
    }

    async fn find_all(&self, fetch: FetchMode) -> AppResult<Vec<Member>> {
        let models = MemberEntity::find()
            .order_by_asc(member::Column::Id)
            .all(&self.db)
            .await?;

        load_members(&self.db, models, fetch).await
    }

    async fn find_by_team(&self, team_id: i32) -> AppResult<Vec<Member>> {
        let models = MemberEntity::find()
            .filter(member::Column::TeamId.eq(team_id))
            .order_by_asc(member::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Member::from).collect())
    }

    async fn delete(&self, member: &Member) -> AppResult<()> {
        delete_model::<MemberEntity, _>(&self.db, persisted_id(member)?).await
    }
}

/// Write one member on any connection.
///
/// The returned member keeps the references it was saved with.
pub(crate) async fn save_member<C: ConnectionTrait>(db: &C, member: Member) -> AppResult<Member> {
    if member.team.is_some() && member.team_id().is_none() {
        return Err(AppError::validation(format!(
            "Member '{}' references a team that was never saved",
            member.username
        )));
    }
    if member.locker.is_some() && member.locker_id().is_none() {
        return Err(AppError::validation(format!(
            "Member '{}' references a locker that was never saved",
            member.username
        )));
    }

    let is_new = member.is_transient();
    let model = save_model(member::active_model(&member), is_new, db).await?;
    debug!(member_id = model.id, team_id = ?model.team_id, "Member saved");

    Ok(Member {
        id: Some(model.id),
        ..member
    })
}

/// Convert member rows, loading their associations when eager.
pub(crate) async fn load_members<C: ConnectionTrait>(
    db: &C,
    models: Vec<member::Model>,
    fetch: FetchMode,
) -> AppResult<Vec<Member>> {
    if !fetch.is_eager() || models.is_empty() {
        return Ok(models.into_iter().map(Member::from).collect());
    }

    let team_ids: Vec<i32> = models.iter().filter_map(|m| m.team_id).collect();
    let locker_ids: Vec<i32> = models.iter().filter_map(|m| m.locker_id).collect();

    let teams: HashMap<i32, Team> = if team_ids.is_empty() {
        HashMap::new()
    } else {
        TeamEntity::find()
            .filter(team::Column::Id.is_in(team_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|model| (model.id, Team::from(model)))
            .collect()
    };

    let lockers: HashMap<i32, Locker> = if locker_ids.is_empty() {
        HashMap::new()
    } else {
        LockerEntity::find()
            .filter(locker::Column::Id.is_in(locker_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|model| (model.id, Locker::from(model)))
            .collect()
    };

    let members = models
        .into_iter()
        .map(|model| {
            let team = model
                .team_id
                .and_then(|id| teams.get(&id).cloned())
                .map(Reference::loaded);
            let locker = model
                .locker_id
                .and_then(|id| lockers.get(&id).cloned())
                .map(Reference::loaded);

            let mut member = Member::from(model);
            if team.is_some() {
                member.team = team;
            }
            if locker.is_some() {
                member.locker = locker;
            }
            member
        })
        .collect();

    Ok(members)
}
