//! SpotStore: create/read/update/delete over the `spots` table.
//!
//! Every operation validates its input first, then runs a single statement
//! (or one transaction for update-and-read-back). Uniqueness of ids is left
//! to the primary-key constraint; no existence pre-check is performed.

use models::spot::{self, SpotStatus};
use sea_orm::{
    sea_query::Expr, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::clock::now_iso;
use crate::errors::{InvalidField, ServiceError};
use crate::patch::Field;
use crate::validation;

/// Raw create payload. Field types are checked by [`SpotStore::create`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSpotInput {
    pub id: Field<Value>,
    pub label: Field<Value>,
    pub distance: Field<Value>,
    pub threshold: Field<Value>,
    pub debounce: Field<Value>,
}

/// Raw status update payload. Omitted numeric fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSpotStatusInput {
    pub status: Field<Value>,
    pub distance: Field<Value>,
    pub threshold: Field<Value>,
    pub debounce: Field<Value>,
}

/// Validated merge-patch applied by [`SpotStore::update_status`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpotPatch {
    pub status: SpotStatus,
    pub distance: Field<f64>,
    pub threshold: Field<f64>,
    pub debounce: Field<i64>,
}

impl SpotPatch {
    pub fn status(status: SpotStatus) -> Self {
        Self { status, distance: Field::Absent, threshold: Field::Absent, debounce: Field::Absent }
    }
}

impl TryFrom<UpdateSpotStatusInput> for SpotPatch {
    type Error = ServiceError;

    fn try_from(input: UpdateSpotStatusInput) -> Result<Self, Self::Error> {
        Ok(Self {
            status: validation::spot_status(input.status)?,
            distance: validation::finite_number(InvalidField::Distance, "distance", input.distance)?,
            threshold: validation::finite_number(InvalidField::Threshold, "threshold", input.threshold)?,
            debounce: validation::integer(InvalidField::Debounce, "debounce", input.debounce)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotStatusView {
    pub status: SpotStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct AvailableSpot {
    pub id: String,
}

/// Occupancy counts over all spots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSummary {
    pub total: u64,
    pub free: u64,
    pub occupied: u64,
}

// SUM over zero rows is NULL, hence the options
#[derive(Debug, FromQueryResult)]
struct CountsRow {
    total: Option<i64>,
    free: Option<i64>,
    occupied: Option<i64>,
}

fn non_negative(v: Option<i64>) -> u64 { v.unwrap_or(0).max(0) as u64 }

#[derive(Clone)]
pub struct SpotStore {
    db: DatabaseConnection,
}

impl SpotStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Insert a new spot with status `FREE`. The label defaults to the id.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateSpotInput) -> Result<spot::Model, ServiceError> {
        let id = validation::record_id(input.id)?;
        let label = validation::label(input.label)?;
        let distance = validation::finite_number(InvalidField::Distance, "distance", input.distance)?;
        let threshold = validation::finite_number(InvalidField::Threshold, "threshold", input.threshold)?;
        let debounce = validation::integer(InvalidField::Debounce, "debounce", input.debounce)?;

        let model = spot::Model {
            label: label.unwrap_or_else(|| id.clone()),
            id,
            status: SpotStatus::Free,
            distance: distance.into_option(),
            threshold: threshold.into_option(),
            debounce: debounce.into_option(),
            updated_at: now_iso(),
        };
        let am = spot::ActiveModel {
            id: Set(model.id.clone()),
            label: Set(model.label.clone()),
            status: Set(model.status),
            distance: Set(model.distance),
            threshold: Set(model.threshold),
            debounce: Set(model.debounce),
            updated_at: Set(model.updated_at.clone()),
        };

        match spot::Entity::insert(am).exec_without_returning(&self.db).await {
            Ok(_) => {
                info!(id = %model.id, label = %model.label, "spot_created");
                Ok(model)
            }
            Err(e) => Err(map_insert_error(e, &model.id)),
        }
    }

    /// All spots ordered by id.
    pub async fn list(&self) -> Result<Vec<spot::Model>, ServiceError> {
        let rows = spot::Entity::find()
            .order_by_asc(spot::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> Result<spot::Model, ServiceError> {
        spot::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Spot"))
    }

    pub async fn get_status(&self, id: &str) -> Result<SpotStatusView, ServiceError> {
        let status = spot::Entity::find_by_id(id.to_string())
            .select_only()
            .column(spot::Column::Status)
            .into_tuple::<SpotStatus>()
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Spot"))?;
        Ok(SpotStatusView { status })
    }

    /// Validate a raw payload and apply it as a merge-patch.
    #[instrument(skip(self, input))]
    pub async fn update_status(
        &self,
        id: &str,
        input: UpdateSpotStatusInput,
    ) -> Result<spot::Model, ServiceError> {
        let patch = SpotPatch::try_from(input)?;
        self.apply_patch(id, patch).await
    }

    /// Overwrite `status` and `updated_at`, plus whichever optional fields the
    /// patch carries. Returns the row as stored after the update.
    #[instrument(skip(self, patch), fields(status = %patch.status))]
    pub async fn apply_patch(
        &self,
        id: &str,
        patch: SpotPatch,
    ) -> Result<spot::Model, ServiceError> {
        let am = spot::ActiveModel {
            status: Set(patch.status),
            distance: patch.distance.into_active_value(),
            threshold: patch.threshold.into_active_value(),
            debounce: patch.debounce.into_active_value(),
            updated_at: Set(now_iso()),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let res = spot::Entity::update_many()
            .set(am)
            .filter(spot::Column::Id.eq(id))
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            // dropping the transaction rolls it back
            return Err(ServiceError::not_found("Spot"));
        }
        let row = spot::Entity::find_by_id(id.to_string())
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Spot"))?;
        txn.commit().await?;

        info!(id = %row.id, status = %row.status, "spot_status_updated");
        Ok(row)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let res = spot::Entity::delete_by_id(id.to_string()).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("Spot"));
        }
        info!(%id, "spot_deleted");
        Ok(())
    }

    /// Ids of free spots, ordered by id.
    pub async fn list_available(&self) -> Result<Vec<AvailableSpot>, ServiceError> {
        let rows = spot::Entity::find()
            .select_only()
            .column(spot::Column::Id)
            .filter(spot::Column::Status.eq(SpotStatus::Free))
            .order_by_asc(spot::Column::Id)
            .into_model::<AvailableSpot>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Total/free/occupied counts from a single aggregate query.
    pub async fn aggregate(&self) -> Result<ParkingSummary, ServiceError> {
        let row = spot::Entity::find()
            .select_only()
            .column_as(Expr::col(spot::Column::Id).count(), "total")
            .column_as(Expr::cust("SUM(CASE WHEN status = 'FREE' THEN 1 ELSE 0 END)"), "free")
            .column_as(Expr::cust("SUM(CASE WHEN status = 'OCCUPIED' THEN 1 ELSE 0 END)"), "occupied")
            .into_model::<CountsRow>()
            .one(&self.db)
            .await?;
        Ok(row
            .map(|r| ParkingSummary {
                total: non_negative(r.total),
                free: non_negative(r.free),
                occupied: non_negative(r.occupied),
            })
            .unwrap_or_default())
    }
}

fn map_insert_error(e: DbErr, id: &str) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            warn!(%id, "spot_create_conflict");
            ServiceError::AlreadyExists(format!("Spot {id}"))
        }
        _ => ServiceError::Unavailable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_support::get_db;
    use serde_json::json;

    fn create_input(v: Value) -> CreateSpotInput { serde_json::from_value(v).expect("create input") }

    fn update_input(v: Value) -> UpdateSpotStatusInput { serde_json::from_value(v).expect("update input") }

    async fn store() -> Result<SpotStore, anyhow::Error> { Ok(SpotStore::new(get_db().await?)) }

    #[tokio::test]
    async fn create_defaults_label_status_and_numerics() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let s = store.create(create_input(json!({"id": "A1"}))).await?;
        assert_eq!(s.id, "A1");
        assert_eq!(s.label, "A1");
        assert_eq!(s.status, SpotStatus::Free);
        assert_eq!((s.distance, s.threshold, s.debounce), (None, None, None));
        assert!(s.updated_at.ends_with('Z'));

        let stored = store.get("A1").await?;
        assert_eq!(stored, s);
        Ok(())
    }

    #[tokio::test]
    async fn create_ignores_client_status_and_keeps_values() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let s = store
            .create(create_input(json!({
                "id": "B2", "label": "North 2", "status": "OCCUPIED",
                "distance": 130.5, "threshold": 50, "debounce": 3
            })))
            .await?;
        assert_eq!(s.status, SpotStatus::Free);
        assert_eq!(s.label, "North 2");
        assert_eq!(s.distance, Some(130.5));
        assert_eq!(s.threshold, Some(50.0));
        assert_eq!(s.debounce, Some(3));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_create_fails_and_keeps_first_record() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let first = store.create(create_input(json!({"id": "A1", "distance": 10.0}))).await?;
        let err = store
            .create(create_input(json!({"id": "A1", "label": "other", "distance": 99.0})))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(store.get("A1").await?, first);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_bad_fields_without_writing() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let cases = [
            (json!({}), "INVALID_ID"),
            (json!({"id": 5}), "INVALID_ID"),
            (json!({"id": "A1", "label": 3}), "INVALID_LABEL"),
            (json!({"id": "A1", "distance": "far"}), "INVALID_DISTANCE"),
            (json!({"id": "A1", "threshold": {}}), "INVALID_THRESHOLD"),
            (json!({"id": "A1", "debounce": 1.5}), "INVALID_DEBOUNCE"),
        ];
        for (body, code) in cases {
            let err = store.create(create_input(body)).await.unwrap_err();
            assert_eq!(err.code(), code);
        }
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_is_merge_patch() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let created = store
            .create(create_input(json!({"id": "A1", "distance": 12.0, "threshold": 40.0, "debounce": 5})))
            .await?;

        let updated = store.update_status("A1", update_input(json!({"status": "OCCUPIED"}))).await?;
        assert_eq!(updated.status, SpotStatus::Occupied);
        assert_eq!(updated.distance, Some(12.0));
        assert_eq!(updated.threshold, Some(40.0));
        assert_eq!(updated.debounce, Some(5));
        assert_eq!(updated.label, created.label);
        assert!(updated.updated_at >= created.updated_at);

        let updated = store
            .update_status("A1", update_input(json!({"status": "FREE", "distance": 300.25, "threshold": null})))
            .await?;
        assert_eq!(updated.status, SpotStatus::Free);
        assert_eq!(updated.distance, Some(300.25));
        assert_eq!(updated.threshold, None);
        assert_eq!(updated.debounce, Some(5));
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_spot_is_not_found() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let err = store.update_status("missing-id", update_input(json!({"status": "FREE"}))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_bad_input_and_leaves_row() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let before = store.create(create_input(json!({"id": "A1", "distance": 1.0}))).await?;

        let err = store.update_status("A1", update_input(json!({"status": "RESERVED"}))).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_STATUS");
        let err = store
            .update_status("A1", update_input(json!({"status": "OCCUPIED", "distance": "far"})))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_DISTANCE");
        let err = store
            .update_status("A1", update_input(json!({"status": "OCCUPIED", "debounce": "3"})))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_DEBOUNCE");

        assert_eq!(store.get("A1").await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn get_and_status_of_missing_spot() -> Result<(), anyhow::Error> {
        let store = store().await?;
        assert_eq!(store.get("nope").await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(store.get_status("nope").await.unwrap_err().kind(), ErrorKind::NotFound);

        store.create(create_input(json!({"id": "A1"}))).await?;
        assert_eq!(store.get_status("A1").await?, SpotStatusView { status: SpotStatus::Free });
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_recreate() -> Result<(), anyhow::Error> {
        let store = store().await?;
        store.create(create_input(json!({"id": "A1", "label": "first"}))).await?;
        store.delete("A1").await?;
        assert_eq!(store.get("A1").await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(store.delete("A1").await.unwrap_err().kind(), ErrorKind::NotFound);

        let again = store.create(create_input(json!({"id": "A1"}))).await?;
        assert_eq!(again.label, "A1");
        Ok(())
    }

    #[tokio::test]
    async fn list_and_available_are_ordered_by_id() -> Result<(), anyhow::Error> {
        let store = store().await?;
        assert!(store.list().await?.is_empty());
        for id in ["C3", "A1", "B2", "D4"] {
            store.create(create_input(json!({"id": id}))).await?;
        }
        store.apply_patch("B2", SpotPatch::status(SpotStatus::Occupied)).await?;

        let ids: Vec<_> = store.list().await?.into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["A1", "B2", "C3", "D4"]);

        let available: Vec<_> = store.list_available().await?.into_iter().map(|s| s.id).collect();
        assert_eq!(available, vec!["A1", "C3", "D4"]);
        Ok(())
    }

    #[tokio::test]
    async fn aggregate_counts_default_to_zero() -> Result<(), anyhow::Error> {
        let store = store().await?;
        assert_eq!(store.aggregate().await?, ParkingSummary { total: 0, free: 0, occupied: 0 });

        for id in ["A1", "A2", "A3"] {
            store.create(create_input(json!({"id": id}))).await?;
        }
        store.apply_patch("A2", SpotPatch::status(SpotStatus::Occupied)).await?;
        assert_eq!(store.aggregate().await?, ParkingSummary { total: 3, free: 2, occupied: 1 });
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_yield_one_winner() -> Result<(), anyhow::Error> {
        let store = store().await?;
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(create_input(json!({"id": "RACE", "label": format!("writer {i}")}))).await
            }));
        }
        let mut ok = 0;
        let mut conflicts = 0;
        for h in handles {
            match h.await? {
                Ok(_) => ok += 1,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => conflicts += 1,
                Err(e) => return Err(e.into()),
            }
        }
        assert_eq!((ok, conflicts), (1, 7));
        Ok(())
    }
}
