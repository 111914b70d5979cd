//! Resolving lazy references.
//!
//! An unloaded [`Reference`] holds only the target identifier. [`resolve`]
//! reads the target through an [`EntityLoader`] the first time it is
//! accessed and keeps it loaded afterwards.

use async_trait::async_trait;
use tracing::debug;

use common::{AppError, AppResult, OptionExt};
use domain::{FetchMode, Locker, Reference, Seller, Team};

use super::locker_repository::LockerRepository;
use super::seller_repository::SellerRepository;
use super::team_repository::TeamRepository;

/// Reads the target of a reference by identifier
#[async_trait]
pub trait EntityLoader<T>: Send + Sync {
    async fn load(&self, id: i32) -> AppResult<Option<T>>;
}

#[async_trait]
impl<R> EntityLoader<Team> for R
where
    R: TeamRepository + ?Sized,
{
    async fn load(&self, id: i32) -> AppResult<Option<Team>> {
        self.find_by_id(id, FetchMode::Lazy).await
    }
}

#[async_trait]
impl<R> EntityLoader<Locker> for R
where
    R: LockerRepository + ?Sized,
{
    async fn load(&self, id: i32) -> AppResult<Option<Locker>> {
        self.find_by_id(id).await
    }
}

#[async_trait]
impl<R> EntityLoader<Seller> for R
where
    R: SellerRepository + ?Sized,
{
    async fn load(&self, id: i32) -> AppResult<Option<Seller>> {
        self.find_by_id(id).await
    }
}

/// Load the target of a reference on first access.
///
/// A loaded reference is returned as is without touching the store.
/// Fails with [`AppError::NotFound`] when the target no longer exists.
pub async fn resolve<'r, T, L>(reference: &'r mut Reference<T>, loader: &L) -> AppResult<&'r T>
where
    T: Send,
    L: EntityLoader<T> + ?Sized,
{
    if let Reference::Unloaded { id } = *reference {
        let entity = loader.load(id).await?.ok_or_not_found()?;
        debug!(id, "Lazy reference resolved");
        *reference = Reference::loaded(entity);
    }

    reference
        .get()
        .ok_or_else(|| AppError::internal("reference is still unloaded after resolving"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockSellerRepository, MockTeamRepository};
    use domain::Collection;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn team(id: i32) -> Team {
        Team {
            id: Some(id),
            team_name: "teamA".to_string(),
            members: Collection::Unloaded,
        }
    }

    #[tokio::test]
    async fn resolve_reads_unloaded_team_once() {
        let mut repo = MockTeamRepository::new();
        repo.expect_find_by_id()
            .with(eq(3), eq(FetchMode::Lazy))
            .times(1)
            .returning(|id, _| Ok(Some(team(id))));

        let mut reference = Reference::<Team>::unloaded(3);

        let loaded = assert_ok!(resolve(&mut reference, &repo).await);
        assert_eq!(loaded.team_name, "teamA");
        assert!(reference.is_loaded());

        // Second access is served from memory
        let again = assert_ok!(resolve(&mut reference, &repo).await);
        assert_eq!(again.id, Some(3));
    }

    #[tokio::test]
    async fn resolve_skips_loaded_reference() {
        let mut repo = MockTeamRepository::new();
        repo.expect_find_by_id().never();

        let mut reference = Reference::loaded(team(5));
        let loaded = assert_ok!(resolve(&mut reference, &repo).await);
        assert_eq!(loaded.id, Some(5));
    }

    #[tokio::test]
    async fn resolve_missing_target_is_not_found() {
        let mut repo = MockSellerRepository::new();
        repo.expect_find_by_id()
            .with(eq(9))
            .times(1)
            .returning(|_| Ok(None));

        let mut reference = Reference::<Seller>::unloaded(9);
        let err = assert_err!(resolve(&mut reference, &repo).await);
        assert!(matches!(err, AppError::NotFound));
        assert!(!reference.is_loaded());
    }

    #[tokio::test]
    async fn resolve_through_trait_object() {
        let mut repo = MockSellerRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(Seller { id: Some(id), email: "s@x.com".to_string() })));

        let repo: Box<dyn SellerRepository> = Box::new(repo);
        let mut reference = Reference::<Seller>::unloaded(2);
        let seller = assert_ok!(resolve(&mut reference, repo.as_ref()).await);
        assert_eq!(seller.email, "s@x.com");
    }
}
