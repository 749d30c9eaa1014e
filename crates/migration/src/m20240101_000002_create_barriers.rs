//! Create `barriers` table.
//!
//! Rows appear on the first state write (upsert); there is no delete path.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Barriers::Table)
                    .if_not_exists()
                    .col(string(Barriers::Id).primary_key())
                    .col(
                        string_len(Barriers::State, 16)
                            .not_null()
                            .check(Expr::col(Barriers::State).is_in(["OPENING", "OPENED", "CLOSING", "CLOSED"])),
                    )
                    .col(string(Barriers::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Barriers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Barriers { Table, Id, State, UpdatedAt }
