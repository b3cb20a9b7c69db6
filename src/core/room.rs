//! Room business logic - Handles all room-related operations.
//!
//! Rooms own devices only through the `devices.room_id` foreign key. Deleting
//! a room clears that key on its devices inside the same transaction; the
//! devices themselves are kept.

use crate::{
    core::{deserialize_present, required_text},
    entities::{Device, Room, device, room},
    errors::{Error, Result},
};
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use serde::Deserialize;
use std::collections::HashMap;

/// Fields accepted when creating a room.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewRoom {
    /// Required, must not be blank
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

/// Partial update of a room. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomChanges {
    /// New name, must not be blank when given
    #[serde(default)]
    pub name: Option<String>,
    /// New description; explicit `null` clears it
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
}

/// Retrieves all rooms ordered alphabetically by name.
pub async fn get_all_rooms(db: &DatabaseConnection) -> Result<Vec<room::Model>> {
    Room::find()
        .order_by_asc(room::Column::Name)
        .order_by_asc(room::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a room by its unique ID, returning None if it doesn't exist.
pub async fn get_room_by_id<C>(db: &C, room_id: i64) -> Result<Option<room::Model>>
where
    C: ConnectionTrait,
{
    Room::find_by_id(room_id).one(db).await.map_err(Into::into)
}

/// Finds a room by its unique ID, failing with [`Error::NotFound`] if it doesn't exist.
pub async fn require_room<C>(db: &C, room_id: i64) -> Result<room::Model>
where
    C: ConnectionTrait,
{
    get_room_by_id(db, room_id).await?.ok_or(Error::NotFound {
        entity: "Room",
        id: room_id,
    })
}

/// Creates a new room, trimming and validating the name.
pub async fn create_room(db: &DatabaseConnection, new_room: NewRoom) -> Result<room::Model> {
    let name = required_text("name", &new_room.name)?;

    let room = room::ActiveModel {
        name: Set(name),
        description: Set(new_room.description),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = room.insert(db).await?;
    tracing::info!(room_id = result.id, "Created room {}", result.name);
    Ok(result)
}

/// Applies the fields present in `changes` to an existing room.
pub async fn update_room(
    db: &DatabaseConnection,
    room_id: i64,
    changes: RoomChanges,
) -> Result<room::Model> {
    let room = require_room(db, room_id).await?;
    let mut active: room::ActiveModel = room.clone().into();

    if let Some(name) = changes.name {
        active.name = Set(required_text("name", &name)?);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }

    if !active.is_changed() {
        return Ok(room);
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes a room and detaches its devices.
///
/// The `room_id` of every device in the room is set to NULL before the room
/// row is removed, all in one transaction.
pub async fn delete_room(db: &DatabaseConnection, room_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let room = require_room(&txn, room_id).await?;

    let detached = Device::update_many()
        .col_expr(device::Column::RoomId, Expr::value(Option::<i64>::None))
        .filter(device::Column::RoomId.eq(room_id))
        .exec(&txn)
        .await?;

    room.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        room_id,
        detached_devices = detached.rows_affected,
        "Deleted room"
    );
    Ok(())
}

/// Counts the devices currently placed in a room.
pub async fn count_devices_in_room<C>(db: &C, room_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    Device::find()
        .filter(device::Column::RoomId.eq(room_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Device counts for every room that has at least one device, keyed by room ID.
pub async fn device_counts_by_room<C>(db: &C) -> Result<HashMap<i64, u64>>
where
    C: ConnectionTrait,
{
    let rows: Vec<(Option<i64>, i64)> = Device::find()
        .select_only()
        .column(device::Column::RoomId)
        .column_as(Expr::col(device::Column::Id).count(), "device_count")
        .filter(device::Column::RoomId.is_not_null())
        .group_by(device::Column::RoomId)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(room_id, count)| Some((room_id?, u64::try_from(count).ok()?)))
        .collect())
}
