//! Device business logic - Handles all device-related operations.
//!
//! Devices optionally reference a room and a category. Every write that sets
//! one of those references first checks the target exists, inside the same
//! transaction as the write, and reports a missing target as a validation
//! error. Deleting a device removes its log entries in the same transaction.
//!
//! Reads that feed the API return [`DeviceDetails`], which carries the current
//! room and category rows next to the device. Lists resolve those with one
//! batched query per related table instead of one query per device.

use crate::{
    core::{category, deserialize_present, required_text, room},
    entities::{
        Device, DeviceCategory, DeviceLog, Room, device, device_category, device_log,
        room as room_entity,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use std::collections::HashMap;

/// Documented values of the free-text `status` column.
///
/// The store accepts any string; these are the values the UI and the
/// dashboard statistics know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Reachable and reporting
    Online,
    /// Not reachable; the default for new devices
    Offline,
    /// Reachable but reporting a fault
    Error,
}

impl DeviceStatus {
    /// The value stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Error => "error",
        }
    }
}

/// Fields accepted when creating a device.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewDevice {
    /// Required
    pub name: String,
    /// Required: light, sensor, camera, ...
    pub device_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    /// Defaults to `"offline"`
    pub status: Option<String>,
    /// Defaults to `true`
    pub is_active: Option<bool>,
    pub last_seen: Option<DateTime<Utc>>,
    pub room_id: Option<i64>,
    pub category_id: Option<i64>,
}

/// Partial update of a device.
///
/// Absent fields are left unchanged. For nullable columns an explicit `null`
/// clears the value, e.g. `"room_id": null` takes the device out of its room.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub brand: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub ip_address: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub mac_address: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub last_seen: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub room_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category_id: Option<Option<i64>>,
}

/// A device together with the room and category it currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetails {
    pub device: device::Model,
    pub room: Option<room_entity::Model>,
    pub category: Option<device_category::Model>,
}

/// Retrieves all devices ordered by ID.
pub async fn get_all_devices(db: &DatabaseConnection) -> Result<Vec<device::Model>> {
    Device::find()
        .order_by_asc(device::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a device by its unique ID.
pub async fn get_device_by_id<C>(db: &C, device_id: i64) -> Result<Option<device::Model>>
where
    C: ConnectionTrait,
{
    Device::find_by_id(device_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a device by its unique ID, failing with [`Error::NotFound`].
pub async fn require_device<C>(db: &C, device_id: i64) -> Result<device::Model>
where
    C: ConnectionTrait,
{
    get_device_by_id(db, device_id).await?.ok_or(Error::NotFound {
        entity: "Device",
        id: device_id,
    })
}

/// All devices with their room and category resolved.
pub async fn get_all_device_details(db: &DatabaseConnection) -> Result<Vec<DeviceDetails>> {
    let devices = get_all_devices(db).await?;
    attach_relations(db, devices).await
}

/// One device with its room and category resolved, or [`Error::NotFound`].
pub async fn get_device_details(db: &DatabaseConnection, device_id: i64) -> Result<DeviceDetails> {
    let device = require_device(db, device_id).await?;
    let mut details = attach_relations(db, vec![device]).await?;
    details.pop().ok_or(Error::NotFound {
        entity: "Device",
        id: device_id,
    })
}

/// Resolves rooms and categories for a batch of devices, preserving order.
pub async fn attach_relations<C>(db: &C, devices: Vec<device::Model>) -> Result<Vec<DeviceDetails>>
where
    C: ConnectionTrait,
{
    let room_ids: Vec<i64> = devices.iter().filter_map(|d| d.room_id).collect();
    let category_ids: Vec<i64> = devices.iter().filter_map(|d| d.category_id).collect();

    let rooms: HashMap<i64, room_entity::Model> = if room_ids.is_empty() {
        HashMap::new()
    } else {
        Room::find()
            .filter(room_entity::Column::Id.is_in(room_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|r| (r.id, r))
            .collect()
    };

    let categories: HashMap<i64, device_category::Model> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        DeviceCategory::find()
            .filter(device_category::Column::Id.is_in(category_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    };

    Ok(devices
        .into_iter()
        .map(|device| DeviceDetails {
            room: device.room_id.and_then(|id| rooms.get(&id).cloned()),
            category: device.category_id.and_then(|id| categories.get(&id).cloned()),
            device,
        })
        .collect())
}

/// Fails with a validation error when a referenced room or category is missing.
async fn check_references<C>(db: &C, room_id: Option<i64>, category_id: Option<i64>) -> Result<()>
where
    C: ConnectionTrait,
{
    if let Some(room_id) = room_id {
        if room::get_room_by_id(db, room_id).await?.is_none() {
            return Err(Error::validation(format!("room {room_id} does not exist")));
        }
    }
    if let Some(category_id) = category_id {
        if category::get_category_by_id(db, category_id).await?.is_none() {
            return Err(Error::validation(format!(
                "category {category_id} does not exist"
            )));
        }
    }
    Ok(())
}

/// Creates a new device with defaults for status, activity and timestamps.
///
/// # Errors
/// Returns an error if:
/// - `name` or `device_type` is empty or whitespace-only
/// - `room_id` or `category_id` references a missing row
/// - The database insert fails
pub async fn create_device(db: &DatabaseConnection, new_device: NewDevice) -> Result<device::Model> {
    let name = required_text("name", &new_device.name)?;
    let device_type = required_text("device_type", &new_device.device_type)?;

    let txn = db.begin().await?;
    check_references(&txn, new_device.room_id, new_device.category_id).await?;

    let now = chrono::Utc::now();
    let device = device::ActiveModel {
        name: Set(name),
        device_type: Set(device_type),
        brand: Set(new_device.brand),
        model: Set(new_device.model),
        ip_address: Set(new_device.ip_address),
        mac_address: Set(new_device.mac_address),
        status: Set(new_device
            .status
            .unwrap_or_else(|| DeviceStatus::Offline.as_str().to_string())),
        is_active: Set(new_device.is_active.unwrap_or(true)),
        last_seen: Set(new_device.last_seen),
        created_at: Set(now),
        updated_at: Set(now),
        room_id: Set(new_device.room_id),
        category_id: Set(new_device.category_id),
        ..Default::default()
    };

    let result = device.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        device_id = result.id,
        device_type = %result.device_type,
        "Created device {}",
        result.name
    );
    Ok(result)
}

/// Applies the fields present in `changes` to an existing device and refreshes `updated_at`.
pub async fn update_device(
    db: &DatabaseConnection,
    device_id: i64,
    changes: DeviceChanges,
) -> Result<device::Model> {
    let txn = db.begin().await?;

    let device = require_device(&txn, device_id).await?;
    check_references(&txn, changes.room_id.flatten(), changes.category_id.flatten()).await?;

    let mut active: device::ActiveModel = device.into();

    if let Some(name) = changes.name {
        active.name = Set(required_text("name", &name)?);
    }
    if let Some(device_type) = changes.device_type {
        active.device_type = Set(required_text("device_type", &device_type)?);
    }
    if let Some(brand) = changes.brand {
        active.brand = Set(brand);
    }
    if let Some(model) = changes.model {
        active.model = Set(model);
    }
    if let Some(ip_address) = changes.ip_address {
        active.ip_address = Set(ip_address);
    }
    if let Some(mac_address) = changes.mac_address {
        active.mac_address = Set(mac_address);
    }
    if let Some(status) = changes.status {
        active.status = Set(status);
    }
    if let Some(is_active) = changes.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(last_seen) = changes.last_seen {
        active.last_seen = Set(last_seen);
    }
    if let Some(room_id) = changes.room_id {
        active.room_id = Set(room_id);
    }
    if let Some(category_id) = changes.category_id {
        active.category_id = Set(category_id);
    }
    active.updated_at = Set(chrono::Utc::now());

    let result = active.update(&txn).await?;
    txn.commit().await?;

    tracing::debug!(device_id, "Updated device");
    Ok(result)
}

/// Deletes a device and all of its log entries in one transaction.
pub async fn delete_device(db: &DatabaseConnection, device_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let device = require_device(&txn, device_id).await?;

    let removed_logs = DeviceLog::delete_many()
        .filter(device_log::Column::DeviceId.eq(device_id))
        .exec(&txn)
        .await?;

    device.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        device_id,
        removed_logs = removed_logs.rows_affected,
        "Deleted device"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_device_validation() -> Result<()> {
        let db = setup_test_db().await?;

        // Missing device_type
        let result = create_device(
            &db,
            NewDevice {
                name: "Lamp".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { ref message } if message == "device_type is required"
        ));

        // Missing name
        let result = create_device(
            &db,
            NewDevice {
                device_type: "light".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { ref message } if message == "name is required"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_device_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let device = create_device(
            &db,
            NewDevice {
                name: "Smart LED Bulb".to_string(),
                device_type: "light".to_string(),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(device.status, "offline");
        assert!(device.is_active);
        assert!(device.last_seen.is_none());
        assert!(device.room_id.is_none());
        assert!(device.category_id.is_none());
        assert_eq!(device.created_at, device.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_device_with_unknown_room() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_device(
            &db,
            NewDevice {
                name: "Lamp".to_string(),
                device_type: "light".to_string(),
                room_id: Some(404),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        assert!(get_all_devices(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_device_partial_and_touches_updated_at() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_test_room(&db, "Kitchen").await?;
        let device = create_test_device_in(&db, "Kettle", Some(room.id), None).await?;

        let updated = update_device(
            &db,
            device.id,
            DeviceChanges {
                status: Some("online".to_string()),
                ip_address: Some(Some("192.168.1.20".to_string())),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.status, "online");
        assert_eq!(updated.ip_address.as_deref(), Some("192.168.1.20"));
        assert_eq!(updated.name, "Kettle");
        assert_eq!(updated.room_id, Some(room.id));
        assert_eq!(updated.created_at, device.created_at);
        assert!(updated.updated_at >= device.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_device_null_clears_room() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_test_room(&db, "Bedroom").await?;
        let device = create_test_device_in(&db, "Lamp", Some(room.id), None).await?;

        let updated = update_device(
            &db,
            device.id,
            DeviceChanges {
                room_id: Some(None),
                ..Default::default()
            },
        )
        .await?;
        assert!(updated.room_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_device_rejects_blank_name_and_missing_category() -> Result<()> {
        let db = setup_test_db().await?;
        let device = create_test_device(&db, "Camera").await?;

        let blank = update_device(
            &db,
            device.id,
            DeviceChanges {
                name: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(blank.unwrap_err(), Error::Validation { .. }));

        let missing = update_device(
            &db,
            device.id,
            DeviceChanges {
                category_id: Some(Some(77)),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(missing.unwrap_err(), Error::Validation { .. }));

        // Nothing was written
        assert_eq!(require_device(&db, device.id).await?, device);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_device_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_device(&db, 999, DeviceChanges::default()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "Device",
                id: 999
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_device_cascades_logs() -> Result<()> {
        let db = setup_test_db().await?;
        let device = create_test_device(&db, "Motion Sensor").await?;
        let other = create_test_device(&db, "Door Sensor").await?;
        create_test_log(&db, device.id, "turned_on").await?;
        create_test_log(&db, device.id, "turned_off").await?;
        create_test_log(&db, other.id, "turned_on").await?;

        delete_device(&db, device.id).await?;

        assert!(get_device_by_id(&db, device.id).await?.is_none());
        let remaining = DeviceLog::find().all(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].device_id, other.id);

        // Deleting again reports not found
        let again = delete_device(&db, device.id).await;
        assert!(matches!(again.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_device_details_follow_current_references() -> Result<()> {
        let db = setup_test_db().await?;
        let room = create_test_room(&db, "Living Room").await?;
        let category = create_test_category(&db, "Lights").await?;
        let placed =
            create_test_device_in(&db, "Bulb", Some(room.id), Some(category.id)).await?;
        let loose = create_test_device(&db, "Plug").await?;

        let details = get_all_device_details(&db).await?;
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].device.id, placed.id);
        assert_eq!(details[0].room.as_ref(), Some(&room));
        assert_eq!(details[0].category.as_ref(), Some(&category));
        assert_eq!(details[1].device.id, loose.id);
        assert!(details[1].room.is_none());
        assert!(details[1].category.is_none());

        // Removing the room is reflected on the next read
        room::delete_room(&db, room.id).await?;
        let placed = get_device_details(&db, placed.id).await?;
        assert!(placed.room.is_none());
        assert_eq!(placed.category.as_ref(), Some(&category));

        Ok(())
    }

    #[test]
    fn test_status_values() {
        assert_eq!(DeviceStatus::Online.as_str(), "online");
        assert_eq!(DeviceStatus::Offline.as_str(), "offline");
        assert_eq!(DeviceStatus::Error.as_str(), "error");
    }
}
