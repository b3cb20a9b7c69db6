use super::{ApiJson, ApiPath, AppState, deleted};
use crate::{
    core::device::{self, DeviceChanges, NewDevice},
    errors::Result,
    serializers::DeviceView,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::Value;

/// All devices ordered by id, with room and category summaries.
pub async fn list_devices(State(state): State<AppState>) -> Result<Json<Vec<DeviceView>>> {
    let devices = device::get_all_device_details(&state.db).await?;
    Ok(Json(devices.into_iter().map(DeviceView::from).collect()))
}

/// One device by id.
pub async fn get_device(
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<i64>,
) -> Result<Json<DeviceView>> {
    let details = device::get_device_details(&state.db, device_id).await?;
    Ok(Json(details.into()))
}

/// Creates a device and returns it with status 201.
pub async fn create_device(
    State(state): State<AppState>,
    ApiJson(new_device): ApiJson<NewDevice>,
) -> Result<(StatusCode, Json<DeviceView>)> {
    let created = device::create_device(&state.db, new_device).await?;
    let details = device::get_device_details(&state.db, created.id).await?;
    Ok((StatusCode::CREATED, Json(details.into())))
}

/// Partial update; serves both PUT and PATCH.
pub async fn update_device(
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<i64>,
    ApiJson(changes): ApiJson<DeviceChanges>,
) -> Result<Json<DeviceView>> {
    let updated = device::update_device(&state.db, device_id, changes).await?;
    let details = device::get_device_details(&state.db, updated.id).await?;
    Ok(Json(details.into()))
}

/// Deletes a device together with its logs.
pub async fn delete_device(
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<i64>,
) -> Result<Json<Value>> {
    device::delete_device(&state.db, device_id).await?;
    Ok(deleted("Device"))
}
