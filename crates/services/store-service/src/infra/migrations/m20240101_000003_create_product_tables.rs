//! Migration: Create seller and product tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seller::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seller::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Seller::Email).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Product::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Product::Name).string().not_null())
                    .col(ColumnDef::new(Product::Price).integer().not_null())
                    .col(ColumnDef::new(Product::ProductType).string().not_null())
                    // Embedded address
                    .col(ColumnDef::new(Product::City).string().null())
                    .col(ColumnDef::new(Product::Street).string().null())
                    .col(ColumnDef::new(Product::Zipcode).string().null())
                    .col(ColumnDef::new(Product::SellerId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_seller")
                            .from(Product::Table, Product::SellerId)
                            .to(Seller::Table, Seller::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_price")
                    .table(Product::Table)
                    .col(Product::Price)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seller::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Seller {
    Table,
    Id,
    Email,
}

#[derive(Iden)]
enum Product {
    Table,
    Id,
    Name,
    Price,
    ProductType,
    City,
    Street,
    Zipcode,
    SellerId,
}
