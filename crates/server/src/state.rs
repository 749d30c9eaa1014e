use sea_orm::DatabaseConnection;
use service::{BarrierStore, SpotStore};

/// Shared handler state. Both stores wrap the same connection pool.
#[derive(Clone)]
pub struct AppState {
    pub spots: SpotStore,
    pub barriers: BarrierStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { spots: SpotStore::new(db.clone()), barriers: BarrierStore::new(db) }
    }
}
