//! Account repository.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tracing::debug;

use super::base::{delete_model, find_model, persisted_id, save_model};
use super::entities::account::{self, Entity as AccountEntity};
use common::AppResult;
use domain::{Account, Entity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a transient account or update a stored one
    async fn save(&self, account: Account) -> AppResult<Account>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>>;

    /// List every account in identifier order
    async fn find_all(&self) -> AppResult<Vec<Account>>;

    async fn delete(&self, account: &Account) -> AppResult<()>;
}

/// Concrete implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn save(&self, mut account: Account) -> AppResult<Account> {
        let is_new = account.is_transient();
        if !is_new {
            account.touch();
        }

        let model = save_model(account::active_model(&account), is_new, &self.db).await?;
        debug!(account_id = model.id, is_new, "Account saved");

        Ok(Account::try_from(model)?)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        let model = find_model::<AccountEntity, _>(&self.db, id).await?;
        Ok(model.map(Account::try_from).transpose()?)
    }

    async fn find_all(&self) -> AppResult<Vec<Account>> {
        let models = AccountEntity::find()
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await?;

        let accounts = models
            .into_iter()
            .map(Account::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(accounts)
    }

    async fn delete(&self, account: &Account) -> AppResult<()> {
        let id = persisted_id(account)?;
        delete_model::<AccountEntity, _>(&self.db, id).await?;
        debug!(account_id = id, "Account deleted");
        Ok(())
    }
}
