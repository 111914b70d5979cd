//! SeaORM entity definitions
//!
//! These are table mappings kept separate from the domain records. Each
//! module converts its `Model` into the matching domain type.

pub mod account;
pub mod album;
pub mod book;
pub mod item;
pub mod locker;
pub mod member;
pub mod movie;
pub mod product;
pub mod seller;
pub mod team;

pub use item::{subtype_table, SubtypeTable, SUBTYPE_TABLES};
