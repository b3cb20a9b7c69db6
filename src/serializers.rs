//! JSON representations returned by the API.
//!
//! Timestamps serialize as RFC 3339 strings and absent values as `null`.
//! Device logs and users are returned as their entity models, which already
//! have the right shape; rooms, categories and devices get views that add
//! counts or nested summaries of related rows.

use crate::{
    core::device::DeviceDetails,
    entities::{device_category, room},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A room with the number of devices currently in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub device_count: u64,
}

impl RoomView {
    #[must_use]
    pub fn new(room: room::Model, device_count: u64) -> Self {
        Self {
            id: room.id,
            name: room.name,
            description: room.description,
            created_at: room.created_at,
            device_count,
        }
    }
}

/// A category with the number of devices assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub device_count: u64,
}

impl CategoryView {
    #[must_use]
    pub fn new(category: device_category::Model, device_count: u64) -> Self {
        Self {
            id: category.id,
            name: category.name,
            icon: category.icon,
            device_count,
        }
    }
}

/// Room reference nested in a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub id: i64,
    pub name: String,
}

/// Category reference nested in a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
}

/// A device with its room and category summarized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceView {
    pub id: i64,
    pub name: String,
    pub device_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub status: String,
    pub is_active: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub room: Option<RoomSummary>,
    pub category: Option<CategorySummary>,
}

impl From<DeviceDetails> for DeviceView {
    fn from(details: DeviceDetails) -> Self {
        let DeviceDetails {
            device,
            room,
            category,
        } = details;

        Self {
            id: device.id,
            name: device.name,
            device_type: device.device_type,
            brand: device.brand,
            model: device.model,
            ip_address: device.ip_address,
            mac_address: device.mac_address,
            status: device.status,
            is_active: device.is_active,
            last_seen: device.last_seen,
            created_at: device.created_at,
            updated_at: device.updated_at,
            room: room.map(|r| RoomSummary {
                id: r.id,
                name: r.name,
            }),
            category: category.map(|c| CategorySummary {
                id: c.id,
                name: c.name,
                icon: c.icon,
            }),
        }
    }
}
