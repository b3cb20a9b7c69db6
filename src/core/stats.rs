//! Dashboard statistics.
//!
//! All numbers are computed with `COUNT` queries in the store; nothing is cached.

use crate::{
    core::device::DeviceStatus,
    entities::{Device, Room, device},
    errors::Result,
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, prelude::*, sea_query::Expr};
use serde::Serialize;

/// Number of devices of one `device_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTypeCount {
    pub device_type: String,
    pub count: u64,
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_devices: u64,
    pub online_devices: u64,
    pub offline_devices: u64,
    pub error_devices: u64,
    pub total_rooms: u64,
    /// Sorted by `device_type`
    pub device_types: Vec<DeviceTypeCount>,
}

async fn count_with_status<C>(db: &C, status: DeviceStatus) -> Result<u64>
where
    C: ConnectionTrait,
{
    Device::find()
        .filter(device::Column::Status.eq(status.as_str()))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Device counts grouped by `device_type`.
pub async fn count_devices_by_type<C>(db: &C) -> Result<Vec<DeviceTypeCount>>
where
    C: ConnectionTrait,
{
    let rows: Vec<(String, i64)> = Device::find()
        .select_only()
        .column(device::Column::DeviceType)
        .column_as(Expr::col(device::Column::Id).count(), "count")
        .group_by(device::Column::DeviceType)
        .order_by_asc(device::Column::DeviceType)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(device_type, count)| DeviceTypeCount {
            device_type,
            count: u64::try_from(count).unwrap_or_default(),
        })
        .collect())
}

/// Computes every dashboard count.
pub async fn get_dashboard_stats<C>(db: &C) -> Result<DashboardStats>
where
    C: ConnectionTrait,
{
    Ok(DashboardStats {
        total_devices: Device::find().count(db).await?,
        online_devices: count_with_status(db, DeviceStatus::Online).await?,
        offline_devices: count_with_status(db, DeviceStatus::Offline).await?,
        error_devices: count_with_status(db, DeviceStatus::Error).await?,
        total_rooms: Room::find().count(db).await?,
        device_types: count_devices_by_type(db).await?,
    })
}
