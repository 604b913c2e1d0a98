//! User profile routes
//!
//! Every handler checks that the path id belongs to the caller.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use calorie_tracker_shared::types::{CalorieTargetResponse, UpdateProfileRequest, UserProfile};
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_profile).put(update_profile))
        .route("/:id/calorie-target", get(calorie_target))
}

/// GET /api/user/:id
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    auth.ensure_owner(id)?;
    let profile = ProfileService::get_profile(state.db(), id).await?;
    Ok(Json(profile))
}

/// PUT /api/user/:id
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserProfile>> {
    auth.ensure_owner(id)?;
    let profile = ProfileService::update_profile(state.db(), id, req).await?;
    Ok(Json(profile))
}

/// GET /api/user/:id/calorie-target
async fn calorie_target(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CalorieTargetResponse>> {
    auth.ensure_owner(id)?;
    let target = ProfileService::calorie_target(state.db(), id).await?;
    Ok(Json(target))
}
