//! Device category business logic.
//!
//! Category names are unique; a duplicate surfaces as [`Error::Integrity`] from
//! the unique index rather than a pre-check, so concurrent inserts are covered
//! too. Deleting a category clears `category_id` on its devices.

use crate::{
    core::{deserialize_present, required_text},
    entities::{Device, DeviceCategory, device, device_category},
    errors::{Error, Result},
};
use sea_orm::{
    PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use serde::Deserialize;
use std::collections::HashMap;

/// Fields accepted when creating a category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewCategory {
    /// Required, unique
    pub name: String,
    /// UI icon identifier
    pub icon: Option<String>,
}

/// Partial update of a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryChanges {
    /// New name, must not be blank when given
    #[serde(default)]
    pub name: Option<String>,
    /// New icon; explicit `null` clears it
    #[serde(default, deserialize_with = "deserialize_present")]
    pub icon: Option<Option<String>>,
}

/// Retrieves all categories ordered alphabetically by name.
pub async fn get_all_categories(
    db: &DatabaseConnection,
) -> Result<Vec<device_category::Model>> {
    DeviceCategory::find()
        .order_by_asc(device_category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its unique ID.
pub async fn get_category_by_id<C>(
    db: &C,
    category_id: i64,
) -> Result<Option<device_category::Model>>
where
    C: ConnectionTrait,
{
    DeviceCategory::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its unique ID, failing with [`Error::NotFound`].
pub async fn require_category<C>(db: &C, category_id: i64) -> Result<device_category::Model>
where
    C: ConnectionTrait,
{
    get_category_by_id(db, category_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "Category",
            id: category_id,
        })
}

/// Creates a new category.
pub async fn create_category(
    db: &DatabaseConnection,
    new_category: NewCategory,
) -> Result<device_category::Model> {
    let name = required_text("name", &new_category.name)?;

    let category = device_category::ActiveModel {
        name: Set(name),
        icon: Set(new_category.icon),
        ..Default::default()
    };

    let result = category.insert(db).await?;
    tracing::info!(category_id = result.id, "Created category {}", result.name);
    Ok(result)
}

/// Applies the fields present in `changes` to an existing category.
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: i64,
    changes: CategoryChanges,
) -> Result<device_category::Model> {
    let category = require_category(db, category_id).await?;
    let mut active: device_category::ActiveModel = category.clone().into();

    if let Some(name) = changes.name {
        active.name = Set(required_text("name", &name)?);
    }
    if let Some(icon) = changes.icon {
        active.icon = Set(icon);
    }

    if !active.is_changed() {
        return Ok(category);
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes a category, detaching its devices in the same transaction.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let category = require_category(&txn, category_id).await?;

    Device::update_many()
        .col_expr(device::Column::CategoryId, Expr::value(Option::<i64>::None))
        .filter(device::Column::CategoryId.eq(category_id))
        .exec(&txn)
        .await?;

    category.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(category_id, "Deleted category");
    Ok(())
}

/// Counts the devices assigned to a category.
pub async fn count_devices_in_category<C>(db: &C, category_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    Device::find()
        .filter(device::Column::CategoryId.eq(category_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Device counts per category, keyed by category ID. Categories without devices are absent.
pub async fn device_counts_by_category<C>(db: &C) -> Result<HashMap<i64, u64>>
where
    C: ConnectionTrait,
{
    let rows: Vec<(Option<i64>, i64)> = Device::find()
        .select_only()
        .column(device::Column::CategoryId)
        .column_as(Expr::col(device::Column::Id).count(), "device_count")
        .filter(device::Column::CategoryId.is_not_null())
        .group_by(device::Column::CategoryId)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(category_id, count)| Some((category_id?, u64::try_from(count).ok()?)))
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_category_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let category = create_category(
            &db,
            NewCategory {
                name: "Lights".to_string(),
                icon: Some("lightbulb".to_string()),
            },
        )
        .await?;

        assert_eq!(category.name, "Lights");
        assert_eq!(category.icon.as_deref(), Some("lightbulb"));
        assert_eq!(require_category(&db, category.id).await?, category);

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_category_name_is_integrity_error() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_category(&db, "Sensors").await?;

        let result = create_category(
            &db,
            NewCategory {
                name: "Sensors".to_string(),
                icon: None,
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Integrity { .. }));

        // The first category is untouched
        assert_eq!(get_all_categories(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_rename_to_existing_name_is_integrity_error() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_category(&db, "Lights").await?;
        let cameras = create_test_category(&db, "Cameras").await?;

        let result = update_category(
            &db,
            cameras.id,
            CategoryChanges {
                name: Some("Lights".to_string()),
                icon: None,
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Integrity { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_category_icon() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Thermostats").await?;

        let updated = update_category(
            &db,
            category.id,
            CategoryChanges {
                name: None,
                icon: Some(Some("thermostat".to_string())),
            },
        )
        .await?;
        assert_eq!(updated.name, "Thermostats");
        assert_eq!(updated.icon.as_deref(), Some("thermostat"));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_nullifies_devices() -> Result<()> {
        let db = setup_test_db().await?;
        let category = create_test_category(&db, "Cameras").await?;
        let camera = create_test_device_in(&db, "Doorbell", None, Some(category.id)).await?;

        assert_eq!(count_devices_in_category(&db, category.id).await?, 1);

        delete_category(&db, category.id).await?;

        assert!(get_category_by_id(&db, category.id).await?.is_none());
        let camera = Device::find_by_id(camera.id).one(&db).await?.unwrap();
        assert!(camera.category_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_device_counts_by_category() -> Result<()> {
        let db = setup_test_db().await?;
        let lights = create_test_category(&db, "Lights").await?;
        let sensors = create_test_category(&db, "Sensors").await?;

        create_test_device_in(&db, "Bulb 1", None, Some(lights.id)).await?;
        create_test_device_in(&db, "Bulb 2", None, Some(lights.id)).await?;

        let counts = device_counts_by_category(&db).await?;
        assert_eq!(counts.get(&lights.id), Some(&2));
        assert!(!counts.contains_key(&sensors.id));

        Ok(())
    }
}
