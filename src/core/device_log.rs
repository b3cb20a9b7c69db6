//! Device log business logic - the change history of each device.
//!
//! Entries are listed newest first. Creating an entry requires the device to
//! exist; listing the entries of a device does not, so the history of a
//! deleted device reads as empty.

use crate::{
    core::{device, required_text},
    entities::{DeviceLog, device_log},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;

/// Fields accepted when recording a log entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewDeviceLog {
    /// What happened; `change_type` is accepted as an alias
    #[serde(alias = "change_type")]
    pub action: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    /// Defaults to now
    pub timestamp: Option<DateTime<Utc>>,
}

/// Retrieves the log entries of one device, newest first.
pub async fn get_logs_for_device(
    db: &DatabaseConnection,
    device_id: i64,
) -> Result<Vec<device_log::Model>> {
    DeviceLog::find()
        .filter(device_log::Column::DeviceId.eq(device_id))
        .order_by_desc(device_log::Column::Timestamp)
        .order_by_desc(device_log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every log entry, newest first.
pub async fn get_all_logs(db: &DatabaseConnection) -> Result<Vec<device_log::Model>> {
    DeviceLog::find()
        .order_by_desc(device_log::Column::Timestamp)
        .order_by_desc(device_log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a log entry by its unique ID, failing with [`Error::NotFound`].
pub async fn require_log(db: &DatabaseConnection, log_id: i64) -> Result<device_log::Model> {
    DeviceLog::find_by_id(log_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Device log",
            id: log_id,
        })
}

/// Records a new entry for an existing device.
///
/// # Errors
/// Returns an error if:
/// - `action` is empty or whitespace-only
/// - The device does not exist ([`Error::NotFound`])
/// - The database insert fails
pub async fn create_device_log(
    db: &DatabaseConnection,
    device_id: i64,
    new_log: NewDeviceLog,
) -> Result<device_log::Model> {
    let action = required_text("action", &new_log.action)?;

    let txn = db.begin().await?;
    device::require_device(&txn, device_id).await?;

    let log = device_log::ActiveModel {
        action: Set(action),
        old_value: Set(new_log.old_value),
        new_value: Set(new_log.new_value),
        timestamp: Set(new_log.timestamp.unwrap_or_else(Utc::now)),
        device_id: Set(device_id),
        ..Default::default()
    };

    let result = log.insert(&txn).await?;
    txn.commit().await?;

    tracing::debug!(device_id, log_id = result.id, "Recorded {}", result.action);
    Ok(result)
}

/// Deletes a single log entry.
pub async fn delete_device_log(db: &DatabaseConnection, log_id: i64) -> Result<()> {
    let log = require_log(db, log_id).await?;
    log.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_logs_are_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let device = create_test_device(&db, "Thermostat").await?;
        let start = Utc::now();

        for (offset, action) in [(0, "turned_on"), (2, "status_change"), (1, "turned_off")] {
            create_device_log(
                &db,
                device.id,
                NewDeviceLog {
                    action: action.to_string(),
                    timestamp: Some(start + Duration::seconds(offset)),
                    ..Default::default()
                },
            )
            .await?;
        }

        let actions: Vec<String> = get_logs_for_device(&db, device.id)
            .await?
            .into_iter()
            .map(|l| l.action)
            .collect();
        assert_eq!(actions, vec!["status_change", "turned_off", "turned_on"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_log_for_missing_device() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_device_log(
            &db,
            31,
            NewDeviceLog {
                action: "turned_on".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "Device",
                id: 31
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_log_requires_action() -> Result<()> {
        let db = setup_test_db().await?;
        let device = create_test_device(&db, "Lamp").await?;

        let result = create_device_log(&db, device.id, NewDeviceLog::default()).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_logs_of_unknown_device_are_empty() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_logs_for_device(&db, 5).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_single_log() -> Result<()> {
        let db = setup_test_db().await?;
        let device = create_test_device(&db, "Lamp").await?;
        let first = create_test_log(&db, device.id, "turned_on").await?;
        let second = create_test_log(&db, device.id, "turned_off").await?;

        delete_device_log(&db, first.id).await?;

        let all = get_all_logs(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, second.id);
        assert!(matches!(
            require_log(&db, first.id).await.unwrap_err(),
            Error::NotFound { .. }
        ));

        Ok(())
    }

    #[test]
    fn test_change_type_alias() {
        let log: NewDeviceLog =
            serde_json::from_str(r#"{"change_type": "status_change", "new_value": "online"}"#)
                .unwrap();
        assert_eq!(log.action, "status_change");
        assert_eq!(log.new_value.as_deref(), Some("online"));
    }
}
