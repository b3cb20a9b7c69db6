use super::AppState;
use crate::{
    core::stats::{self, DashboardStats},
    errors::Result,
};
use axum::{Json, extract::State};

/// Dashboard counts.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(stats::get_dashboard_stats(&state.db).await?))
}
