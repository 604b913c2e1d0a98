//! User service for registration and sessions
//!
//! Password hashing and verification run on the blocking thread pool; the
//! JWT service is passed by reference with its keys already derived.

use super::f64_to_dec;
use super::profile::{profile_from_record, validate_biometrics, Biometrics};
use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{CreateUser, UserRecord, UserRepository};
use calorie_tracker_shared::health_metrics::{suggested_target_calories, HealthProfile};
use calorie_tracker_shared::types::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use calorie_tracker_shared::validation::{labelled, validate_email, validate_password};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::ValidateEmail;

/// Emails are matched case-insensitively
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    validate_email(email).map_err(|m| ApiError::Validation(labelled("email", m)))?;
    if !email.validate_email() {
        return Err(ApiError::Validation(labelled(
            "email",
            "Invalid email format".to_string(),
        )));
    }
    validate_password(password).map_err(|m| ApiError::Validation(labelled("password", m)))
}

/// Target stored at registration: the one supplied, else the suggestion
/// when every biometric is known
fn initial_target(req: &RegisterRequest) -> Option<i32> {
    req.target_calories.or_else(|| {
        HealthProfile::from_parts(req.height, req.weight, req.age, req.sex, req.activity_level)
            .map(|profile| suggested_target_calories(&profile))
    })
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

/// User service for authentication operations
pub struct UserService;

impl UserService {
    fn issue_tokens(
        jwt_service: &JwtService,
        user_id: Uuid,
        user: Option<UserProfile>,
    ) -> Result<AuthResponse, ApiError> {
        let token = jwt_service
            .generate_access_token(user_id)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user_id)
            .map_err(ApiError::Internal)?;

        Ok(AuthResponse {
            token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
            user_id: user_id.to_string(),
            user,
        })
    }

    /// Register a new user
    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: RegisterRequest,
    ) -> Result<AuthResponse, ApiError> {
        let email = normalize_email(&req.email);
        validate_credentials(&email, &req.password)?;
        validate_biometrics(&Biometrics {
            age: req.age,
            height: req.height,
            weight: req.weight,
            target_calories: req.target_calories,
        })?;

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let target_calories = initial_target(&req);
        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            CreateUser {
                email,
                password_hash,
                age: req.age,
                sex: req.sex.map(|s| s.as_str().to_string()),
                height_cm: req.height.map(f64_to_dec),
                weight_kg: req.weight.map(f64_to_dec),
                activity_level: req.activity_level.map(|a| a.as_str().to_string()),
                target_calories,
            },
        )
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration
            if is_unique_violation(&e) {
                ApiError::Conflict("Email already registered".to_string())
            } else {
                ApiError::Internal(e)
            }
        })?;

        info!(user_id = %user.id, "User registered");
        let user_id = user.id;
        Self::issue_tokens(jwt_service, user_id, Some(profile_from_record(user)))
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        let email = normalize_email(&req.email);
        let user: UserRecord = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        let user_id = user.id;
        Self::issue_tokens(jwt_service, user_id, Some(profile_from_record(user)))
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthResponse, ApiError> {
        let claims = jwt_service
            .validate_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        // The account may have been removed since the token was issued
        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::issue_tokens(jwt_service, user_id, None)
    }
}
