use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter,
    QueryOrder, Set, Statement,
};

use super::setup_test_db;
use crate::{barrier, spot, BarrierState, SpotStatus};

fn new_spot(id: &str) -> spot::ActiveModel {
    spot::ActiveModel {
        id: Set(id.to_string()),
        label: Set(format!("Place {id}")),
        status: Set(SpotStatus::Free),
        distance: Set(Some(42.5)),
        threshold: Set(None),
        debounce: Set(Some(3)),
        updated_at: Set("2024-01-01T00:00:00.000Z".to_string()),
    }
}

#[tokio::test]
async fn test_spot_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = new_spot("A1").insert(&db).await?;
    assert_eq!(created.status, SpotStatus::Free);
    assert_eq!(created.distance, Some(42.5));
    assert_eq!(created.threshold, None);

    let found = spot::Entity::find_by_id("A1".to_string()).one(&db).await?;
    assert_eq!(found.as_ref().map(|s| s.label.as_str()), Some("Place A1"));

    let mut am: spot::ActiveModel = created.into();
    am.status = Set(SpotStatus::Occupied);
    let updated = am.update(&db).await?;
    assert_eq!(updated.status, SpotStatus::Occupied);
    assert_eq!(updated.debounce, Some(3));

    let res = spot::Entity::delete_by_id("A1".to_string()).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(spot::Entity::find_by_id("A1".to_string()).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_status_stored_as_wire_string() -> Result<()> {
    let db = setup_test_db().await?;
    let mut am = new_spot("B7");
    am.status = Set(SpotStatus::Occupied);
    am.insert(&db).await?;

    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT status FROM spots WHERE id = 'B7'",
        ))
        .await?
        .expect("row");
    assert_eq!(row.try_get::<String>("", "status")?, "OCCUPIED");
    Ok(())
}

#[tokio::test]
async fn test_filter_and_order_by_status() -> Result<()> {
    let db = setup_test_db().await?;
    for id in ["C3", "A1", "B2"] {
        new_spot(id).insert(&db).await?;
    }
    let mut occupied: spot::ActiveModel = new_spot("D4");
    occupied.status = Set(SpotStatus::Occupied);
    occupied.insert(&db).await?;

    let free = spot::Entity::find()
        .filter(spot::Column::Status.eq(SpotStatus::Free))
        .order_by_asc(spot::Column::Id)
        .all(&db)
        .await?;
    let ids: Vec<_> = free.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "B2", "C3"]);
    Ok(())
}

#[tokio::test]
async fn test_barrier_crud() -> Result<()> {
    let db = setup_test_db().await?;
    let b = barrier::ActiveModel {
        id: Set("gate1".into()),
        state: Set(BarrierState::Closed),
        updated_at: Set("2024-01-01T00:00:00.000Z".into()),
    }
    .insert(&db)
    .await?;
    assert_eq!(b.state, BarrierState::Closed);

    let found = barrier::Entity::find_by_id("gate1".to_string()).one(&db).await?.expect("barrier");
    assert_eq!(found.state, BarrierState::Closed);
    Ok(())
}

#[test]
fn test_enum_wire_values() {
    assert_eq!(SpotStatus::parse("FREE"), Some(SpotStatus::Free));
    assert_eq!(SpotStatus::parse("free"), None);
    assert_eq!(SpotStatus::Occupied.to_string(), "OCCUPIED");
    assert_eq!(BarrierState::parse("CLOSING"), Some(BarrierState::Closing));
    assert_eq!(BarrierState::parse("RESERVED"), None);
    assert_eq!(BarrierState::allowed(), vec!["OPENING", "OPENED", "CLOSING", "CLOSED"]);
    assert_eq!(serde_json::to_value(SpotStatus::Free).unwrap(), serde_json::json!("FREE"));
}
