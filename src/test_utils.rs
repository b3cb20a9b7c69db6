//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        category::{self, NewCategory},
        device::{self, NewDevice},
        device_log::{self, NewDeviceLog},
        room::{self, NewRoom},
        user::{self, NewUser},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test room with no description.
pub async fn create_test_room(db: &DatabaseConnection, name: &str) -> Result<entities::room::Model> {
    room::create_room(
        db,
        NewRoom {
            name: name.to_string(),
            description: None,
        },
    )
    .await
}

/// Creates a test category with no icon.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::device_category::Model> {
    category::create_category(
        db,
        NewCategory {
            name: name.to_string(),
            icon: None,
        },
    )
    .await
}

/// Creates a test device with sensible defaults.
///
/// # Defaults
/// * `device_type`: `"light"`
/// * `status`: `"offline"`
/// * no room, no category
pub async fn create_test_device(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::device::Model> {
    create_test_device_in(db, name, None, None).await
}

/// Creates a test light placed in the given room and category.
pub async fn create_test_device_in(
    db: &DatabaseConnection,
    name: &str,
    room_id: Option<i64>,
    category_id: Option<i64>,
) -> Result<entities::device::Model> {
    device::create_device(
        db,
        NewDevice {
            name: name.to_string(),
            device_type: "light".to_string(),
            room_id,
            category_id,
            ..Default::default()
        },
    )
    .await
}

/// Creates a test device with a custom type and status.
pub async fn create_test_device_with(
    db: &DatabaseConnection,
    name: &str,
    device_type: &str,
    status: &str,
) -> Result<entities::device::Model> {
    device::create_device(
        db,
        NewDevice {
            name: name.to_string(),
            device_type: device_type.to_string(),
            status: Some(status.to_string()),
            ..Default::default()
        },
    )
    .await
}

/// Records a log entry with the given action and no values.
pub async fn create_test_log(
    db: &DatabaseConnection,
    device_id: i64,
    action: &str,
) -> Result<entities::device_log::Model> {
    device_log::create_device_log(
        db,
        device_id,
        NewDeviceLog {
            action: action.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates an active test user with email `<username>@example.com`.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    user::create_user(
        db,
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            is_active: None,
        },
    )
    .await
}
