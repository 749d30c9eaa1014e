use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Spots: available-list and aggregate queries filter on status
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_spots_status")
                    .table(Spots::Table)
                    .col(Spots::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_spots_status").table(Spots::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Spots { Table, Status }
