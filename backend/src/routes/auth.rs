//! Authentication routes
//!
//! Registration, login, token refresh and the current user's profile.
//! Password hashing runs on the blocking pool inside `UserService`.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{ProfileService, UserService};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use calorie_tracker_shared::types::{
    AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, UserProfile,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/me", get(me))
}

/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let resp = UserService::register(state.db(), state.jwt(), req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let resp = UserService::login(state.db(), state.jwt(), req).await?;
    Ok(Json(resp))
}

/// POST /api/auth/refresh
async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let resp = UserService::refresh_token(state.db(), state.jwt(), &req.refresh_token).await?;
    Ok(Json(resp))
}

/// GET /api/auth/me
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserProfile>> {
    let profile = ProfileService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}
