//! Create `spots` table.
//!
//! One row per parking place. The primary key is the client-supplied id, so
//! duplicate creates are rejected by the constraint itself.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Spots::Table)
                    .if_not_exists()
                    .col(string(Spots::Id).primary_key())
                    .col(string(Spots::Label).not_null())
                    .col(
                        string_len(Spots::Status, 16)
                            .not_null()
                            .check(Expr::col(Spots::Status).is_in(["FREE", "OCCUPIED"])),
                    )
                    .col(double_null(Spots::Distance))
                    .col(double_null(Spots::Threshold))
                    .col(big_integer_null(Spots::Debounce))
                    .col(string(Spots::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Spots::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Spots { Table, Id, Label, Status, Distance, Threshold, Debounce, UpdatedAt }
