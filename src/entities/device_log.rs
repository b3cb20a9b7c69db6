//! Device log entity - One entry in a device's change history.
//!
//! Each entry records an `action` (`turned_on`, `status_change`, ...) with
//! optional old/new values and belongs to exactly one device.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Device log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "device_logs")]
pub struct Model {
    /// Unique identifier for the log entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// What happened (e.g., `"turned_on"`, `"status_change"`)
    pub action: String,
    /// Value before the change
    #[sea_orm(column_type = "Text", nullable)]
    pub old_value: Option<String>,
    /// Value after the change
    #[sea_orm(column_type = "Text", nullable)]
    pub new_value: Option<String>,
    /// When the entry was recorded
    pub timestamp: DateTimeUtc,
    /// ID of the device this entry belongs to
    pub device_id: i64,
}

/// Defines relationships between `DeviceLog` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each log entry belongs to one device
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::DeviceId",
        to = "super::device::Column::Id",
        on_delete = "Cascade"
    )]
    Device,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
