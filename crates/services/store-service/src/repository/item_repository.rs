//! Item repository over the joined inheritance tables.
//!
//! Reads left-join every subtype table in one statement. Writes touch the
//! base row and the subtype row in one transaction.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use tracing::debug;

use super::base::{delete_model, find_model, in_transaction, persisted_id, save_model};
use super::entities::{
    album, book,
    item::{self, Entity as ItemEntity, ItemRow},
    movie, subtype_table,
};
use common::{AppError, AppResult};
use domain::{Entity, Item, ItemKind};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Save the base and subtype rows. A stored item cannot change kind.
    async fn save(&self, item: Item) -> AppResult<Item>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Item>>;

    /// Every item as its concrete kind
    async fn find_all(&self) -> AppResult<Vec<Item>>;

    /// Items stored under one discriminator tag
    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Item>>;

    async fn delete(&self, item: &Item) -> AppResult<()>;
}

pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Base columns plus every subtype column, with every subtype table left-joined.
fn select_items() -> Select<ItemEntity> {
    ItemEntity::find()
        .select_only()
        .column_as(item::Column::Id, "id")
        .column_as(item::Column::Dtype, "dtype")
        .column_as(item::Column::Name, "name")
        .column_as(item::Column::Price, "price")
        .column_as(album::Column::Id, "album_id")
        .column_as(album::Column::Artist, "artist")
        .column_as(book::Column::Id, "book_id")
        .column_as(book::Column::Author, "author")
        .column_as(book::Column::Isbn, "isbn")
        .column_as(movie::Column::Id, "movie_id")
        .column_as(movie::Column::Director, "director")
        .column_as(movie::Column::Actor, "actor")
        .left_join(album::Entity)
        .left_join(book::Entity)
        .left_join(movie::Entity)
}

async fn read_items<C: ConnectionTrait>(db: &C, select: Select<ItemEntity>) -> AppResult<Vec<Item>> {
    let rows = select
        .order_by_asc(item::Column::Id)
        .into_model::<ItemRow>()
        .all(db)
        .await?;

    let items = rows
        .into_iter()
        .map(Item::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

#[async_trait]
impl ItemRepository for ItemStore {
    async fn save(&self, item: Item) -> AppResult<Item> {
        in_transaction(&self.db, move |txn| {
            Box::pin(async move { save_item(txn, item).await })
        })
        .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Item>> {
        let mut items = read_items(&self.db, select_items().filter(item::Column::Id.eq(id))).await?;
        Ok(items.pop())
    }

    async fn find_all(&self) -> AppResult<Vec<Item>> {
        read_items(&self.db, select_items()).await
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Item>> {
        if subtype_table(tag).is_none() {
            return Err(domain::DomainError::unknown_tag("item discriminator", tag).into());
        }
        read_items(&self.db, select_items().filter(item::Column::Dtype.eq(tag))).await
    }

    async fn delete(&self, item: &Item) -> AppResult<()> {
        let id = persisted_id(item)?;
        let tag = item.tag();

        in_transaction(&self.db, move |txn| {
            Box::pin(async move {
                let table = subtype_table(tag).ok_or_else(|| {
                    AppError::internal(format!("no subtype table for tag {}", tag))
                })?;

                let statement = Query::delete()
                    .from_table(Alias::new(table.table))
                    .and_where(Expr::col(Alias::new(table.join_key)).eq(id))
                    .to_owned();
                let backend = txn.get_database_backend();
                txn.execute(backend.build(&statement)).await?;

                delete_model::<ItemEntity, _>(txn, id).await?;
                Ok::<_, AppError>(())
            })
        })
        .await?;

        debug!(item_id = id, tag, "Item deleted");
        Ok(())
    }
}

async fn save_item<C: ConnectionTrait>(db: &C, item: Item) -> AppResult<Item> {
    let is_new = item.is_transient();

    if let Some(id) = item.id {
        let stored = find_model::<ItemEntity, _>(db, id)
            .await?
            .ok_or(AppError::NotFound)?;
        if stored.dtype != item.tag() {
            return Err(AppError::validation(format!(
                "Item {} is stored as {} and cannot become {}",
                id,
                stored.dtype,
                item.tag()
            )));
        }
    }

    let base = save_model(item::active_model(&item), is_new, db).await?;

    match &item.kind {
        ItemKind::Album { artist } => {
            let row = album::ActiveModel {
                id: Set(base.id),
                artist: Set(artist.clone()),
            };
            save_model(row, is_new, db).await?;
        }
        ItemKind::Book { author, isbn } => {
            let row = book::ActiveModel {
                id: Set(base.id),
                author: Set(author.clone()),
                isbn: Set(isbn.clone()),
            };
            save_model(row, is_new, db).await?;
        }
        ItemKind::Movie { director, actor } => {
            let row = movie::ActiveModel {
                id: Set(base.id),
                director: Set(director.clone()),
                actor: Set(actor.clone()),
            };
            save_model(row, is_new, db).await?;
        }
    }

    debug!(item_id = base.id, tag = item.tag(), is_new, "Item saved");
    Ok(Item {
        id: Some(base.id),
        ..item
    })
}
