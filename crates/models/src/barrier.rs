use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Movement/position of a gate. Every state may follow every other state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarrierState {
    #[sea_orm(string_value = "OPENING")]
    Opening,
    #[sea_orm(string_value = "OPENED")]
    Opened,
    #[sea_orm(string_value = "CLOSING")]
    Closing,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

impl BarrierState {
    pub const ALL: [BarrierState; 4] = [
        BarrierState::Opening,
        BarrierState::Opened,
        BarrierState::Closing,
        BarrierState::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BarrierState::Opening => "OPENING",
            BarrierState::Opened => "OPENED",
            BarrierState::Closing => "CLOSING",
            BarrierState::Closed => "CLOSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(BarrierState::as_str).collect()
    }
}

impl std::fmt::Display for BarrierState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "barriers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub state: BarrierState,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}
