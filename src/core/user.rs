//! User business logic.
//!
//! Usernames and emails are unique; violations come back from the store as
//! [`Error::Integrity`].

use crate::{
    core::required_text,
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Fields accepted when creating a user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Defaults to `true`
    pub is_active: Option<bool>,
}

/// Partial update of a user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Retrieves all users ordered by username.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by ID, failing with [`Error::NotFound`].
pub async fn require_user(db: &DatabaseConnection, user_id: i64) -> Result<user::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "User",
            id: user_id,
        })
}

/// Creates a new user.
pub async fn create_user(db: &DatabaseConnection, new_user: NewUser) -> Result<user::Model> {
    let username = required_text("username", &new_user.username)?;
    let email = required_text("email", &new_user.email)?;

    let user = user::ActiveModel {
        username: Set(username),
        email: Set(email),
        created_at: Set(chrono::Utc::now()),
        is_active: Set(new_user.is_active.unwrap_or(true)),
        ..Default::default()
    };

    let result = user.insert(db).await?;
    tracing::info!(user_id = result.id, "Created user {}", result.username);
    Ok(result)
}

/// Applies the fields present in `changes` to an existing user.
pub async fn update_user(
    db: &DatabaseConnection,
    user_id: i64,
    changes: UserChanges,
) -> Result<user::Model> {
    let user = require_user(db, user_id).await?;
    let mut active: user::ActiveModel = user.clone().into();

    if let Some(username) = changes.username {
        active.username = Set(required_text("username", &username)?);
    }
    if let Some(email) = changes.email {
        active.email = Set(required_text("email", &email)?);
    }
    if let Some(is_active) = changes.is_active {
        active.is_active = Set(is_active);
    }

    if !active.is_changed() {
        return Ok(user);
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes a user.
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    let user = require_user(db, user_id).await?;
    user.delete(db).await?;
    tracing::info!(user_id, "Deleted user");
    Ok(())
}
