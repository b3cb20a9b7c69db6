//! HTTP surface of the inventory.
//!
//! Handlers are thin: they extract the path and body, call into
//! [`crate::core`], and wrap the result in a view from [`crate::serializers`].
//! Errors travel back as [`crate::errors::Error`], whose `IntoResponse`
//! implementation picks the status code and the client-facing message.
//!
//! The same routes are served under `/api` and `/api/v1`.

mod categories;
mod devices;
mod logs;
mod rooms;
mod stats;
mod users;


use crate::errors::Error;
use axum::{
    Json, Router,
    extract::{FromRequest, FromRequestParts},
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

/// JSON body extractor whose rejections become [`Error::Validation`] (400).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections become [`Error::Validation`] (400).
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

/// Builds the complete application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/api", api_routes())
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route(
            "/devices",
            get(devices::list_devices).post(devices::create_device),
        )
        .route(
            "/devices/:id",
            get(devices::get_device)
                .put(devices::update_device)
                .patch(devices::update_device)
                .delete(devices::delete_device),
        )
        .route(
            "/devices/:id/logs",
            get(logs::list_device_logs).post(logs::create_device_log),
        )
        .route("/device_logs", get(logs::list_logs))
        .route(
            "/device_logs/:id",
            get(logs::get_log).delete(logs::delete_log),
        )
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/rooms/:id",
            get(rooms::get_room)
                .put(rooms::update_room)
                .patch(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/stats", get(stats::get_stats))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Smart Home Device Manager API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "devices": "/api/devices",
            "rooms": "/api/rooms",
            "categories": "/api/categories",
            "users": "/api/users",
            "device_logs": "/api/device_logs",
            "stats": "/api/stats",
        }
    }))
}

/// Body returned by every successful DELETE.
fn deleted(entity: &str) -> Json<Value> {
    Json(json!({ "message": format!("{entity} deleted successfully") }))
}
