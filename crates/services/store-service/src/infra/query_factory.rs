//! Query factory bound to the persistence context.
//!
//! Created once at startup from the [`Database`](super::Database) wrapper and
//! cloned into the custom query module. Read queries run on the shared
//! connection; statements that must commit atomically go through
//! [`QueryFactory::transaction`].

use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use common::{AppError, AppResult};

/// Boxed future borrowing the transaction it runs in.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Shared handle for building and executing custom queries.
#[derive(Clone)]
pub struct QueryFactory {
    connection: DatabaseConnection,
}

impl QueryFactory {
    pub fn new(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Connection used by read queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Everything inside the closure must use the transaction it receives,
    /// never the shared connection.
    pub async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(&'a DatabaseTransaction) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.connection.begin().await.map_err(AppError::from)?;

        let outcome = f(&txn).await;

        match outcome {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}
