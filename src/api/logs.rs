use super::{ApiJson, ApiPath, AppState, deleted};
use crate::{
    core::device_log::{self, NewDeviceLog},
    entities::device_log::Model as DeviceLogModel,
    errors::Result,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::Value;

/// Logs of one device, newest first. A device without logs, or one that no
/// longer exists, yields an empty list.
pub async fn list_device_logs(
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<i64>,
) -> Result<Json<Vec<DeviceLogModel>>> {
    let logs = device_log::get_logs_for_device(&state.db, device_id).await?;
    Ok(Json(logs))
}

/// Records a log entry for an existing device.
pub async fn create_device_log(
    State(state): State<AppState>,
    ApiPath(device_id): ApiPath<i64>,
    ApiJson(new_log): ApiJson<NewDeviceLog>,
) -> Result<(StatusCode, Json<DeviceLogModel>)> {
    let log = device_log::create_device_log(&state.db, device_id, new_log).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Every log entry, newest first.
pub async fn list_logs(State(state): State<AppState>) -> Result<Json<Vec<DeviceLogModel>>> {
    Ok(Json(device_log::get_all_logs(&state.db).await?))
}

/// One log entry by id.
pub async fn get_log(
    State(state): State<AppState>,
    ApiPath(log_id): ApiPath<i64>,
) -> Result<Json<DeviceLogModel>> {
    Ok(Json(device_log::require_log(&state.db, log_id).await?))
}

/// Deletes a single log entry.
pub async fn delete_log(
    State(state): State<AppState>,
    ApiPath(log_id): ApiPath<i64>,
) -> Result<Json<Value>> {
    device_log::delete_device_log(&state.db, log_id).await?;
    Ok(deleted("Device log"))
}
