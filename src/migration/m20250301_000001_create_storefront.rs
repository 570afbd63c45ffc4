use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Customers::Id))
                    .col(string_uniq(Customers::Email))
                    .col(string(Customers::Name))
                    .col(string(Customers::Region))
                    .col(timestamp_with_time_zone(Customers::CreatedAt))
                    .col(timestamp_with_time_zone(Customers::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Prices are minor units (cents).
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_uuid(Products::Id))
                    .col(string(Products::Name))
                    .col(text_null(Products::Description))
                    .col(big_integer(Products::Price))
                    .col(string(Products::Region))
                    .col(timestamp_with_time_zone(Products::CreatedAt))
                    .col(timestamp_with_time_zone(Products::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(pk_uuid(Purchases::Id))
                    .col(uuid(Purchases::ProductId))
                    .col(uuid(Purchases::CustomerId))
                    .col(integer(Purchases::Quantity))
                    .col(big_integer(Purchases::UnitPrice))
                    .col(big_integer(Purchases::TotalPrice))
                    .col(timestamp_with_time_zone(Purchases::CreatedAt))
                    .col(timestamp_with_time_zone(Purchases::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_product")
                            .from(Purchases::Table, Purchases::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_customer")
                            .from(Purchases::Table, Purchases::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_purchases_customer_created")
                    .table(Purchases::Table)
                    .col(Purchases::CustomerId)
                    .col(Purchases::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_purchases_product")
                    .table(Purchases::Table)
                    .col(Purchases::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    Email,
    Name,
    Region,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    Region,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Purchases {
    Table,
    Id,
    ProductId,
    CustomerId,
    Quantity,
    UnitPrice,
    TotalPrice,
    CreatedAt,
    UpdatedAt,
}
