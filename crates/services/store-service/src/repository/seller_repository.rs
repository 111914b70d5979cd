//! Seller repository.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::base::{delete_model, find_model, persisted_id, save_model};
use super::entities::seller::{self, Entity as SellerEntity};
use common::AppResult;
use domain::{Entity, Seller};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SellerRepository: Send + Sync {
    async fn save(&self, seller: Seller) -> AppResult<Seller>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Seller>>;

    async fn find_all(&self) -> AppResult<Vec<Seller>>;

    /// Delete a seller. Fails while products still reference it.
    async fn delete(&self, seller: &Seller) -> AppResult<()>;
}

pub struct SellerStore {
    db: DatabaseConnection,
}

impl SellerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SellerRepository for SellerStore {
    async fn save(&self, seller: Seller) -> AppResult<Seller> {
        let is_new = seller.is_transient();
        let model = save_model(seller::active_model(&seller), is_new, &self.db).await?;
        Ok(Seller::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Seller>> {
        let model = find_model::<SellerEntity, _>(&self.db, id).await?;
        Ok(model.map(Seller::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Seller>> {
        let models = SellerEntity::find()
            .order_by_asc(seller::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Seller::from).collect())
    }

    async fn delete(&self, seller: &Seller) -> AppResult<()> {
        delete_model::<SellerEntity, _>(&self.db, persisted_id(seller)?).await
    }
}
