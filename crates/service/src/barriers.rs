//! BarrierStore: gate state keyed by barrier id.
//!
//! There is no create or delete. The first state write inserts the row and
//! later writes overwrite it. Transitions are not guarded; sequencing belongs
//! to whatever controller drives the gate.

use models::barrier::{self, BarrierState};
use sea_orm::{sea_query::OnConflict, ActiveValue::Set, DatabaseConnection, EntityTrait, QuerySelect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use crate::clock::now_iso;
use crate::errors::ServiceError;
use crate::patch::Field;
use crate::validation;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SetBarrierStateInput {
    pub state: Field<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrierView {
    pub state: BarrierState,
    pub updated_at: String,
}

#[derive(Clone)]
pub struct BarrierStore {
    db: DatabaseConnection,
}

impl BarrierStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    pub async fn get(&self, id: &str) -> Result<BarrierView, ServiceError> {
        let (state, updated_at) = barrier::Entity::find_by_id(id.to_string())
            .select_only()
            .column(barrier::Column::State)
            .column(barrier::Column::UpdatedAt)
            .into_tuple::<(BarrierState, String)>()
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Barrier"))?;
        Ok(BarrierView { state, updated_at })
    }

    /// Validate the requested state and upsert it.
    #[instrument(skip(self, input))]
    pub async fn set_state(
        &self,
        id: &str,
        input: SetBarrierStateInput,
    ) -> Result<barrier::Model, ServiceError> {
        let state = validation::barrier_state(input.state)?;
        self.write_state(id, state).await
    }

    /// Insert-or-update in one statement.
    #[instrument(skip(self))]
    pub async fn write_state(
        &self,
        id: &str,
        state: BarrierState,
    ) -> Result<barrier::Model, ServiceError> {
        let id = validation::record_id_str(id)?;
        let model = barrier::Model { id: id.to_string(), state, updated_at: now_iso() };
        let am = barrier::ActiveModel {
            id: Set(model.id.clone()),
            state: Set(model.state),
            updated_at: Set(model.updated_at.clone()),
        };
        barrier::Entity::insert(am)
            .on_conflict(
                OnConflict::column(barrier::Column::Id)
                    .update_columns([barrier::Column::State, barrier::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        info!(id = %model.id, state = %model.state, "barrier_state_set");
        Ok(model)
    }
}
