//! Domain layer - Persisted records and value objects.
//!
//! This crate contains the plain data records the store persists, with no
//! database dependency. Table mappings live next to the repositories in
//! `store-service`.

pub mod account;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod item;
pub mod member;
pub mod product;

pub use account::{Account, Role};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use fetch::{Collection, Entity, FetchMode, Reference};
pub use item::{Item, ItemKind};
pub use member::{Locker, Member, Team};
pub use product::{Address, Product, ProductSellerEmail, ProductType, Seller, TypePriceSum};
