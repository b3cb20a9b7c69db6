//! Device entity - Represents a single smart-home device.
//!
//! Each device has a name, a `device_type` (light, sensor, camera...), optional
//! network identity, a free-text `status`, and optional links to a room and a
//! category. Deleting a device deletes its log entries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Device database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    /// Unique identifier for the device
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the device (e.g., "Smart LED Bulb 1")
    pub name: String,
    /// Kind of device: `"light"`, `"sensor"`, `"camera"`, ...
    pub device_type: String,
    /// Manufacturer
    pub brand: Option<String>,
    /// Manufacturer model name
    pub model: Option<String>,
    /// IP address as given, not validated
    pub ip_address: Option<String>,
    /// MAC address as given, not validated
    pub mac_address: Option<String>,
    /// `"online"`, `"offline"` or `"error"` by convention
    pub status: String,
    /// Whether the device is in use
    pub is_active: bool,
    /// Last time the device was seen on the network
    pub last_seen: Option<DateTimeUtc>,
    /// When the device was created
    pub created_at: DateTimeUtc,
    /// When the device was last modified
    pub updated_at: DateTimeUtc,
    /// Room the device lives in, if any
    pub room_id: Option<i64>,
    /// Category of the device, if any
    pub category_id: Option<i64>,
}

/// Defines relationships between Device and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each device may belong to one room
    #[sea_orm(
        belongs_to = "super::room::Entity",
        from = "Column::RoomId",
        to = "super::room::Column::Id",
        on_delete = "SetNull"
    )]
    Room,
    /// Each device may belong to one category
    #[sea_orm(
        belongs_to = "super::device_category::Entity",
        from = "Column::CategoryId",
        to = "super::device_category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    /// One device has many log entries
    #[sea_orm(has_many = "super::device_log::Entity")]
    Logs,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::device_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::device_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Logs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
