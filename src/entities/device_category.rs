//! Device category entity - Groups devices for display (lights, sensors, cameras...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Device category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "device_categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Category name, unique across all categories
    #[sea_orm(unique)]
    pub name: String,
    /// Icon identifier used by the UI
    pub icon: Option<String>,
}

/// Defines relationships between `DeviceCategory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many devices
    #[sea_orm(has_many = "super::device::Entity")]
    Devices,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Devices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
