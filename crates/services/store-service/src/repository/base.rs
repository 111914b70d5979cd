//! Generic persistence helpers shared by every store.
//!
//! Each helper takes any [`ConnectionTrait`], so the same code runs on the
//! pooled connection or inside a transaction.

use sea_orm::sea_query::{Alias, Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend,
    EntityTrait, IntoActiveModel, PrimaryKeyTrait,
};

use common::{AppError, AppResult};
use domain::Entity;

use crate::infra::{QueryFactory, TxFuture};

/// Find one row by primary key
pub(crate) async fn find_model<E, C>(db: &C, id: i32) -> AppResult<Option<E::Model>>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    E::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Insert a new row or update an existing one, returning the stored row.
pub(crate) async fn save_model<A, C>(
    model: A,
    is_new: bool,
    db: &C,
) -> AppResult<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'static,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    let stored = if is_new {
        model.insert(db).await?
    } else {
        model.update(db).await?
    };
    Ok(stored)
}

/// Delete one row by primary key.
///
/// Fails with [`AppError::NotFound`] when no row was removed.
pub(crate) async fn delete_model<E, C>(db: &C, id: i32) -> AppResult<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    let result = E::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Identifier of a record that must already be stored
pub(crate) fn persisted_id(entity: &impl Entity) -> AppResult<i32> {
    entity.id().ok_or(AppError::NotFound)
}

/// Run a closure in a transaction on the store's connection
pub(crate) async fn in_transaction<F, T>(db: &DatabaseConnection, f: F) -> AppResult<T>
where
    F: for<'a> FnOnce(&'a sea_orm::DatabaseTransaction) -> TxFuture<'a, T> + Send,
    T: Send,
{
    QueryFactory::new(db.clone()).transaction(f).await
}

// =============================================================================
// Text Matching
// =============================================================================
//
// LIKE treats `%` and `_` as wildcards and ignores ASCII case on SQLite, so
// literal matches go through string functions instead.

/// Case-sensitive check that `column` contains `needle` literally
pub(crate) fn contains_text<C>(backend: DbBackend, column: C, needle: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    let position = match backend {
        DbBackend::Postgres => "strpos",
        _ => "instr",
    };

    Expr::expr(
        Func::cust(Alias::new(position))
            .arg(Expr::col(column))
            .arg(needle),
    )
    .gt(0)
}

/// Case-sensitive check that `column` starts with `prefix` literally
pub(crate) fn starts_with_text<C>(column: C, prefix: &str) -> SimpleExpr
where
    C: IntoColumnRef,
{
    let length = i32::try_from(prefix.chars().count()).unwrap_or(i32::MAX);

    Expr::expr(
        Func::cust(Alias::new("substr"))
            .arg(Expr::col(column))
            .arg(1)
            .arg(length),
    )
    .eq(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{Query, SelectStatement};
    use sea_orm::Value;

    fn select_where(filter: SimpleExpr) -> SelectStatement {
        Query::select()
            .column(Alias::new("name"))
            .from(Alias::new("product"))
            .and_where(filter)
            .to_owned()
    }

    #[test]
    fn contains_uses_position_function_per_backend() {
        let sqlite = DbBackend::Sqlite.build(&select_where(contains_text(
            DbBackend::Sqlite,
            Alias::new("name"),
            "a%b",
        )));
        assert!(sqlite.sql.contains(r#"instr("name", ?) > ?"#), "{}", sqlite.sql);
        assert!(!sqlite.sql.contains("LIKE"));

        let postgres = DbBackend::Postgres.build(&select_where(contains_text(
            DbBackend::Postgres,
            Alias::new("name"),
            "a%b",
        )));
        assert!(postgres.sql.contains(r#"strpos("name", $1) > $2"#), "{}", postgres.sql);
    }

    #[test]
    fn contains_binds_needle_unescaped() {
        let statement = DbBackend::Sqlite.build(&select_where(contains_text(
            DbBackend::Sqlite,
            Alias::new("name"),
            "W_dget",
        )));
        let values = statement.values.map(|v| v.0).unwrap_or_default();
        assert_eq!(values[0], Value::from("W_dget"));
    }

    #[test]
    fn prefix_compares_leading_characters() {
        let statement = DbBackend::Sqlite.build(&select_where(starts_with_text(
            Alias::new("city"),
            "서울",
        )));
        assert!(statement.sql.contains(r#"substr("city", ?, ?) = ?"#), "{}", statement.sql);

        let values = statement.values.map(|v| v.0).unwrap_or_default();
        assert_eq!(values[1], Value::from(2));
        assert_eq!(values[2], Value::from("서울"));
    }
}
