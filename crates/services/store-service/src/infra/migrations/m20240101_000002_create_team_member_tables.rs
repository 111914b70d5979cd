//! Migration: Create team, locker and member tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Team::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Team::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Team::TeamName).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Locker::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locker::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Locker::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Dependents are removed by the repository before their team, so the
        // foreign keys carry no ON DELETE action.
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Member::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Member::Username).string().not_null())
                    .col(ColumnDef::new(Member::TeamId).integer().null())
                    .col(ColumnDef::new(Member::LockerId).integer().null().unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_team")
                            .from(Member::Table, Member::TeamId)
                            .to(Team::Table, Team::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_member_locker")
                            .from(Member::Table, Member::LockerId)
                            .to(Locker::Table, Locker::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_team_id")
                    .table(Member::Table)
                    .col(Member::TeamId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locker::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Team::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Team {
    Table,
    Id,
    TeamName,
}

#[derive(Iden)]
enum Locker {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Member {
    Table,
    Id,
    Username,
    TeamId,
    LockerId,
}
