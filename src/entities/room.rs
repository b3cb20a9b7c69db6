//! Room entity - A physical room of the home that devices are placed in.
//!
//! Deleting a room never deletes its devices; their `room_id` is cleared instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Room database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    /// Unique identifier for the room
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Living Room")
    pub name: String,
    /// Optional free-form description
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// When the room was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Room and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One room has many devices
    #[sea_orm(has_many = "super::device::Entity")]
    Devices,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Devices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
