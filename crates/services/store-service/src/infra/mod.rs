//! Infrastructure layer - database connection, schema and query factory.

mod db;
pub mod migrations;
mod query_factory;

pub use db::Database;
pub use migrations::Migrator;
pub use query_factory::{QueryFactory, TxFuture};
