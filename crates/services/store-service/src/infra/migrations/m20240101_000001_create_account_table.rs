//! Migration: Create account table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Account::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Username is stored under the legacy column name
                    .col(ColumnDef::new(Account::Name).string().not_null())
                    .col(ColumnDef::new(Account::Age).integer().null())
                    .col(ColumnDef::new(Account::Description).text().null())
                    .col(ColumnDef::new(Account::Role).string().not_null())
                    .col(ColumnDef::new(Account::CreateDate).date().not_null())
                    .col(ColumnDef::new(Account::UpdateDate).date().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Account {
    Table,
    Id,
    Name,
    Age,
    Description,
    Role,
    CreateDate,
    UpdateDate,
}
