//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Spesa:
//!
//! - `users`: authentication
//! - `customers`: billable participant records owned by users
//! - `purchases`: spending events with a denormalized running total
//! - `items`: priced lines inside a purchase
//! - `purchase_customers`: which customers take part in a purchase
//! - `item_shares`: the cents each customer owes for an item

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    Name,
    Email,
    CreatedBy,
}

#[derive(Iden)]
enum Purchases {
    Table,
    Id,
    Name,
    CreatedBy,
    CreatedAt,
    TotalAmountMinor,
}

#[derive(Iden)]
enum Items {
    Table,
    Id,
    PurchaseId,
    Name,
    PriceMinor,
}

#[derive(Iden)]
enum PurchaseCustomers {
    Table,
    PurchaseId,
    CustomerId,
}

#[derive(Iden)]
enum ItemShares {
    Table,
    ItemId,
    CustomerId,
    AmountMinor,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Customers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::Name).string().not_null())
                    .col(ColumnDef::new(Customers::Email).string())
                    .col(ColumnDef::new(Customers::CreatedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-customers-created_by")
                            .from(Customers::Table, Customers::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-customers-created_by")
                    .table(Customers::Table)
                    .col(Customers::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Purchases
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Purchases::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Purchases::Name).string().not_null())
                    .col(ColumnDef::new(Purchases::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Purchases::CreatedAt).timestamp().not_null())
                    .col(
                        ColumnDef::new(Purchases::TotalAmountMinor)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Purchases::TotalAmountMinor).gte(0)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchases-created_by")
                            .from(Purchases::Table, Purchases::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchases-created_by")
                    .table(Purchases::Table)
                    .col(Purchases::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Items
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Items::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Items::PurchaseId).string().not_null())
                    .col(ColumnDef::new(Items::Name).string().not_null())
                    .col(ColumnDef::new(Items::PriceMinor).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-items-purchase_id")
                            .from(Items::Table, Items::PurchaseId)
                            .to(Purchases::Table, Purchases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-items-purchase_id")
                    .table(Items::Table)
                    .col(Items::PurchaseId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Purchase Customers
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PurchaseCustomers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseCustomers::PurchaseId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseCustomers::CustomerId)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PurchaseCustomers::PurchaseId)
                            .col(PurchaseCustomers::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_customers-purchase_id")
                            .from(PurchaseCustomers::Table, PurchaseCustomers::PurchaseId)
                            .to(Purchases::Table, Purchases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_customers-customer_id")
                            .from(PurchaseCustomers::Table, PurchaseCustomers::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase_customers-customer_id")
                    .table(PurchaseCustomers::Table)
                    .col(PurchaseCustomers::CustomerId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Item Shares
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ItemShares::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ItemShares::ItemId).string().not_null())
                    .col(ColumnDef::new(ItemShares::CustomerId).string().not_null())
                    .col(
                        ColumnDef::new(ItemShares::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ItemShares::ItemId)
                            .col(ItemShares::CustomerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-item_shares-item_id")
                            .from(ItemShares::Table, ItemShares::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-item_shares-customer_id")
                            .from(ItemShares::Table, ItemShares::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-item_shares-customer_id")
                    .table(ItemShares::Table)
                    .col(ItemShares::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(ItemShares::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseCustomers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
