#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the schema applied. Each call returns an
/// isolated database, so tests never observe each other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig::in_memory();
    models::db::connect_and_migrate(&cfg).await
}
