//! Locker repository.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::base::{delete_model, find_model, persisted_id, save_model};
use super::entities::locker::{self, Entity as LockerEntity};
use common::AppResult;
use domain::{Entity, Locker};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LockerRepository: Send + Sync {
    async fn save(&self, locker: Locker) -> AppResult<Locker>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Locker>>;

    async fn find_all(&self) -> AppResult<Vec<Locker>>;

    async fn delete(&self, locker: &Locker) -> AppResult<()>;
}

pub struct LockerStore {
    db: DatabaseConnection,
}

impl LockerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LockerRepository for LockerStore {
    async fn save(&self, locker: Locker) -> AppResult<Locker> {
        let is_new = locker.is_transient();
        let model = save_model(locker::active_model(&locker), is_new, &self.db).await?;
        Ok(Locker::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Locker>> {
        let model = find_model::<LockerEntity, _>(&self.db, id).await?;
        Ok(model.map(Locker::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Locker>> {
        let models = LockerEntity::find()
            .order_by_asc(locker::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Locker::from).collect())
    }

    async fn delete(&self, locker: &Locker) -> AppResult<()> {
        delete_model::<LockerEntity, _>(&self.db, persisted_id(locker)?).await
    }
}
