//! User entity - An account of the home management application.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique
    #[sea_orm(unique)]
    pub username: String,
    /// Email address, unique
    #[sea_orm(unique)]
    pub email: String,
    /// When the user was created
    pub created_at: DateTimeUtc,
    /// Whether the account is enabled
    pub is_active: bool,
}

/// `User` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
