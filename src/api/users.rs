use super::{ApiJson, ApiPath, AppState, deleted};
use crate::{
    core::user::{self, NewUser, UserChanges},
    entities::user::Model as UserModel,
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::Value;

/// All users ordered by username.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserModel>>> {
    Ok(Json(user::get_all_users(&state.db).await?))
}

/// One user by id.
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<UserModel>> {
    Ok(Json(user::require_user(&state.db, user_id).await?))
}

/// Creates a user and returns it with status 201.
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<UserModel>)> {
    let user = user::create_user(&state.db, new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Partial update; serves both PUT and PATCH.
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiJson(changes): ApiJson<UserChanges>,
) -> Result<Json<UserModel>> {
    Ok(Json(user::update_user(&state.db, user_id, changes).await?))
}

/// Deletes a user.
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Value>> {
    user::delete_user(&state.db, user_id).await?;
    Ok(deleted("User"))
}
