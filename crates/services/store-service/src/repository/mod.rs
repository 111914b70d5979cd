//! Repository layer for data access.

mod account_repository;
mod base;
pub mod entities;
mod fetch;
mod item_repository;
mod locker_repository;
mod member_repository;
mod product_queries;
mod product_repository;
mod seller_repository;
mod team_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use fetch::{resolve, EntityLoader};
pub use item_repository::{ItemRepository, ItemStore};
pub use locker_repository::{LockerRepository, LockerStore};
pub use member_repository::{MemberRepository, MemberStore};
pub use product_queries::{ProductQueries, ProductQueryStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use seller_repository::{SellerRepository, SellerStore};
pub use team_repository::{TeamRepository, TeamStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use item_repository::MockItemRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use locker_repository::MockLockerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use member_repository::MockMemberRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_queries::MockProductQueries;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use seller_repository::MockSellerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use team_repository::MockTeamRepository;

use crate::infra::Database;

/// Every store, bound to one database.
pub struct Stores {
    pub accounts: AccountStore,
    pub members: MemberStore,
    pub teams: TeamStore,
    pub lockers: LockerStore,
    pub sellers: SellerStore,
    pub products: ProductStore,
    pub product_queries: ProductQueryStore,
    pub items: ItemStore,
}

impl Stores {
    pub fn new(db: &Database) -> Self {
        Self {
            accounts: AccountStore::new(db.get_connection()),
            members: MemberStore::new(db.get_connection()),
            teams: TeamStore::new(db.get_connection()),
            lockers: LockerStore::new(db.get_connection()),
            sellers: SellerStore::new(db.get_connection()),
            products: ProductStore::new(db.get_connection()),
            product_queries: ProductQueryStore::new(db.query_factory()),
            items: ItemStore::new(db.get_connection()),
        }
    }
}
