//! Migration: Create the item base table and one table per item kind.
//!
//! Subtype rows share the primary key of their base row.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Item::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Item::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Item::Dtype).string().not_null())
                    .col(ColumnDef::new(Item::Name).string().not_null())
                    .col(ColumnDef::new(Item::Price).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Album::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Album::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Album::Artist).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_album_item")
                            .from(Album::Table, Album::Id)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Book::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Book::Author).string().not_null())
                    .col(ColumnDef::new(Book::Isbn).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_item")
                            .from(Book::Table, Book::Id)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movie::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Movie::Director).string().not_null())
                    .col(ColumnDef::new(Movie::Actor).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_item")
                            .from(Movie::Table, Movie::Id)
                            .to(Item::Table, Item::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movie::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Book::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Album::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Item::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Item {
    Table,
    Id,
    Dtype,
    Name,
    Price,
}

#[derive(Iden)]
enum Album {
    Table,
    Id,
    Artist,
}

#[derive(Iden)]
enum Book {
    Table,
    Id,
    Author,
    Isbn,
}

#[derive(Iden)]
enum Movie {
    Table,
    Id,
    Director,
    Actor,
}
