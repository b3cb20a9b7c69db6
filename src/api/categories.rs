use super::{ApiJson, ApiPath, AppState, deleted};
use crate::{
    core::category::{self, CategoryChanges, NewCategory},
    errors::Result,
    serializers::CategoryView,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::Value;

/// All categories ordered by name, each with its device count.
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryView>>> {
    let categories = category::get_all_categories(&state.db).await?;
    let counts = category::device_counts_by_category(&state.db).await?;

    Ok(Json(
        categories
            .into_iter()
            .map(|c| {
                let count = counts.get(&c.id).copied().unwrap_or(0);
                CategoryView::new(c, count)
            })
            .collect(),
    ))
}

/// One category by id.
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i64>,
) -> Result<Json<CategoryView>> {
    let category = category::require_category(&state.db, category_id).await?;
    let count = category::count_devices_in_category(&state.db, category_id).await?;
    Ok(Json(CategoryView::new(category, count)))
}

/// Creates a category and returns it with status 201.
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(new_category): ApiJson<NewCategory>,
) -> Result<(StatusCode, Json<CategoryView>)> {
    let category = category::create_category(&state.db, new_category).await?;
    Ok((StatusCode::CREATED, Json(CategoryView::new(category, 0))))
}

/// Partial update; serves both PUT and PATCH.
pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i64>,
    ApiJson(changes): ApiJson<CategoryChanges>,
) -> Result<Json<CategoryView>> {
    let category = category::update_category(&state.db, category_id, changes).await?;
    let count = category::count_devices_in_category(&state.db, category_id).await?;
    Ok(Json(CategoryView::new(category, count)))
}

/// Deletes a category. Its devices stay, uncategorized.
pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i64>,
) -> Result<Json<Value>> {
    category::delete_category(&state.db, category_id).await?;
    Ok(deleted("Category"))
}
