use super::{ApiJson, ApiPath, AppState, deleted};
use crate::{
    core::room::{self, NewRoom, RoomChanges},
    errors::Result,
    serializers::RoomView,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::Value;

/// All rooms ordered by name, each with its device count.
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomView>>> {
    let rooms = room::get_all_rooms(&state.db).await?;
    let counts = room::device_counts_by_room(&state.db).await?;

    Ok(Json(
        rooms
            .into_iter()
            .map(|r| {
                let count = counts.get(&r.id).copied().unwrap_or(0);
                RoomView::new(r, count)
            })
            .collect(),
    ))
}

/// One room by id.
pub async fn get_room(
    State(state): State<AppState>,
    ApiPath(room_id): ApiPath<i64>,
) -> Result<Json<RoomView>> {
    let room = room::require_room(&state.db, room_id).await?;
    let count = room::count_devices_in_room(&state.db, room_id).await?;
    Ok(Json(RoomView::new(room, count)))
}

/// Creates a room and returns it with status 201.
pub async fn create_room(
    State(state): State<AppState>,
    ApiJson(new_room): ApiJson<NewRoom>,
) -> Result<(StatusCode, Json<RoomView>)> {
    let room = room::create_room(&state.db, new_room).await?;
    Ok((StatusCode::CREATED, Json(RoomView::new(room, 0))))
}

/// Partial update; serves both PUT and PATCH.
pub async fn update_room(
    State(state): State<AppState>,
    ApiPath(room_id): ApiPath<i64>,
    ApiJson(changes): ApiJson<RoomChanges>,
) -> Result<Json<RoomView>> {
    let room = room::update_room(&state.db, room_id, changes).await?;
    let count = room::count_devices_in_room(&state.db, room_id).await?;
    Ok(Json(RoomView::new(room, count)))
}

/// Deletes a room. Its devices stay, without a room.
pub async fn delete_room(
    State(state): State<AppState>,
    ApiPath(room_id): ApiPath<i64>,
) -> Result<Json<Value>> {
    room::delete_room(&state.db, room_id).await?;
    Ok(deleted("Room"))
}
