//! Food search and food log routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{FoodLogService, FoodSearchService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use calorie_tracker_shared::types::{
    CreateFoodEntryRequest, DailyTotalResponse, EntryCreatedResponse, FoodEntryResponse,
    FoodSearchQuery, FoodSearchResult, MessageResponse, NutritionDetail, UpdateFoodEntryRequest,
    WeeklyProgressPoint, WeeklyProgressQuery,
};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Create food routes
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_foods))
        .route("/nutrition/:query", get(nutrition_detail))
        .route("/entry", post(add_entry))
        .route("/entry/:id", put(update_entry).delete(delete_entry))
        .route("/entries/:date", get(list_entries))
        .route("/daily-total/:date", get(daily_total))
        .route("/weekly-progress", get(weekly_progress))
}

/// GET /api/food/search?query=
async fn search_foods(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<FoodSearchQuery>,
) -> Json<Vec<FoodSearchResult>> {
    let results =
        FoodSearchService::search(state.nutritionix(), state.search_cache(), &params.query).await;
    Json(results)
}

/// GET /api/food/nutrition/:query
async fn nutrition_detail(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(query): Path<String>,
) -> ApiResult<Json<NutritionDetail>> {
    let detail = FoodSearchService::nutrition_detail(state.nutritionix(), &query).await?;
    Ok(Json(detail))
}

/// POST /api/food/entry
async fn add_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFoodEntryRequest>,
) -> ApiResult<(StatusCode, Json<EntryCreatedResponse>)> {
    let created = FoodLogService::add_entry(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/food/entries/:date
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<Vec<FoodEntryResponse>>> {
    let entries = FoodLogService::list_entries(state.db(), auth.user_id, date).await?;
    Ok(Json(entries))
}

/// PUT /api/food/entry/:id
async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFoodEntryRequest>,
) -> ApiResult<Json<MessageResponse>> {
    FoodLogService::update_entry(state.db(), auth.user_id, id, req).await?;
    Ok(Json(MessageResponse::new("Food entry updated successfully")))
}

/// DELETE /api/food/entry/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    FoodLogService::delete_entry(state.db(), auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Food entry deleted successfully")))
}

/// GET /api/food/daily-total/:date
async fn daily_total(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> ApiResult<Json<DailyTotalResponse>> {
    let totals = FoodLogService::daily_total(state.db(), auth.user_id, date).await?;
    Ok(Json(totals))
}

/// GET /api/food/weekly-progress?end=
async fn weekly_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<WeeklyProgressQuery>,
) -> ApiResult<Json<Vec<WeeklyProgressPoint>>> {
    let end = params.end.unwrap_or_else(|| Utc::now().date_naive());
    let points = FoodLogService::weekly_progress(state.db(), auth.user_id, end).await?;
    Ok(Json(points))
}
