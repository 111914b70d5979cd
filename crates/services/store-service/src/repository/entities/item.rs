//! Item base table entity and the joined-inheritance mapping.
//!
//! Every item has one `item` row holding the discriminator plus exactly one
//! row in the subtype table named by [`SUBTYPE_TABLES`], sharing its key.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::FromQueryResult;

use domain::{DomainError, Item, ItemKind, ITEM_TAG_ALBUM, ITEM_TAG_BOOK, ITEM_TAG_MOVIE};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dtype: String,
    pub name: String,
    pub price: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::album::Entity")]
    Album,
    #[sea_orm(has_one = "super::book::Entity")]
    Book,
    #[sea_orm(has_one = "super::movie::Entity")]
    Movie,
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn active_model(item: &Item) -> ActiveModel {
    ActiveModel {
        id: item.id.map_or(NotSet, Set),
        dtype: Set(item.tag().to_string()),
        name: Set(item.name.clone()),
        price: Set(item.price),
    }
}

/// Storage location of one concrete item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtypeTable {
    /// Discriminator value in `item.dtype`
    pub tag: &'static str,
    pub table: &'static str,
    /// Subtype column holding the `item.id` it extends
    pub join_key: &'static str,
}

pub const SUBTYPE_TABLES: &[SubtypeTable] = &[
    SubtypeTable {
        tag: ITEM_TAG_ALBUM,
        table: "album",
        join_key: "id",
    },
    SubtypeTable {
        tag: ITEM_TAG_BOOK,
        table: "book",
        join_key: "id",
    },
    SubtypeTable {
        tag: ITEM_TAG_MOVIE,
        table: "movie",
        join_key: "id",
    },
];

/// Look up the subtype table of a discriminator
pub fn subtype_table(tag: &str) -> Option<&'static SubtypeTable> {
    SUBTYPE_TABLES.iter().find(|entry| entry.tag == tag)
}

/// One item read with every subtype table left-joined.
///
/// The `*_id` columns tell whether the matching subtype row exists.
#[derive(Debug, Clone, FromQueryResult)]
pub struct ItemRow {
    pub id: i32,
    pub dtype: String,
    pub name: String,
    pub price: i32,
    pub album_id: Option<i32>,
    pub artist: Option<String>,
    pub book_id: Option<i32>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub movie_id: Option<i32>,
    pub director: Option<String>,
    pub actor: Option<String>,
}

fn missing_subtype_row(id: i32, table: &SubtypeTable) -> DomainError {
    DomainError::validation(format!(
        "Item {} is tagged {} but has no {} row",
        id, table.tag, table.table
    ))
}

impl TryFrom<ItemRow> for Item {
    type Error = DomainError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let table = subtype_table(&row.dtype)
            .ok_or_else(|| DomainError::unknown_tag("item discriminator", &row.dtype))?;

        let kind = match table.tag {
            ITEM_TAG_ALBUM => match (row.album_id, row.artist) {
                (Some(_), Some(artist)) => ItemKind::Album { artist },
                _ => return Err(missing_subtype_row(row.id, table)),
            },
            ITEM_TAG_BOOK => match (row.book_id, row.author, row.isbn) {
                (Some(_), Some(author), Some(isbn)) => ItemKind::Book { author, isbn },
                _ => return Err(missing_subtype_row(row.id, table)),
            },
            ITEM_TAG_MOVIE => match (row.movie_id, row.director, row.actor) {
                (Some(_), Some(director), Some(actor)) => ItemKind::Movie { director, actor },
                _ => return Err(missing_subtype_row(row.id, table)),
            },
            other => return Err(DomainError::unknown_tag("item discriminator", other)),
        };

        Ok(Item {
            id: Some(row.id),
            name: row.name,
            price: row.price,
            kind,
        })
    }
}
