//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the foreign keys declared on the
//! entity relations (cascade for device logs, set-null for rooms and
//! categories) end up in the schema without hand-written SQL.

use crate::entities::{Device, DeviceCategory, DeviceLog, Room, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;

/// Default database location when neither the config file nor `DATABASE_URL` set one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/device_inventory.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
///
/// For a file-backed `SQLite` URL the parent directory is created first;
/// `mode=rwc` only creates the file itself.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    tracing::debug!("Connecting to database at {}", database_url);
    if let Some(path) = sqlite_file_path(database_url) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }
    Database::connect(database_url).await.map_err(Into::into)
}

/// File path of a `SQLite` URL, or `None` for in-memory and non-`SQLite` URLs.
fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    if path.is_empty() || path == ":memory:" || query.contains("mode=memory") {
        return None;
    }
    Some(Path::new(path))
}

/// Creates all tables that do not exist yet.
///
/// Parents are created before children so that the foreign keys resolve:
/// rooms and categories, then devices, then device logs.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Room).await?;
    create_table(db, DeviceCategory).await?;
    create_table(db, Device).await?;
    create_table(db, DeviceLog).await?;
    create_table(db, User).await?;
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DeviceLogModel, DeviceModel, RoomModel, UserModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<RoomModel> = Room::find().limit(1).all(&db).await?;
        let _: Vec<DeviceModel> = Device::find().limit(1).all(&db).await?;
        let _: Vec<DeviceLogModel> = DeviceLog::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let categories = DeviceCategory::find().limit(1).all(&db).await?;
        assert!(categories.is_empty());

        Ok(())
    }

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path(DEFAULT_DATABASE_URL),
            Some(Path::new("data/device_inventory.sqlite"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://db.sqlite?mode=memory"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/devices"), None);
    }

    #[tokio::test]
    async fn test_create_connection_creates_missing_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join("nested").join("data").join("devices.sqlite");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let db = create_connection(&url).await?;
        create_tables(&db).await?;

        assert!(db_path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
