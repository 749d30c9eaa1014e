use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Occupancy of a parking place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotStatus {
    #[sea_orm(string_value = "FREE")]
    Free,
    #[sea_orm(string_value = "OCCUPIED")]
    Occupied,
}

impl SpotStatus {
    pub const ALL: [SpotStatus; 2] = [SpotStatus::Free, SpotStatus::Occupied];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpotStatus::Free => "FREE",
            SpotStatus::Occupied => "OCCUPIED",
        }
    }

    /// Exact, case-sensitive match on the wire value.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub label: String,
    pub status: SpotStatus,
    pub distance: Option<f64>,
    pub threshold: Option<f64>,
    pub debounce: Option<i64>,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}
