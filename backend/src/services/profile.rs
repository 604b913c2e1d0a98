//! Profile service - business logic for user profile management

use super::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::repositories::{UpdateUserProfile, UserRecord, UserRepository};
use calorie_tracker_shared::health_metrics::{
    calculate_calorie_target, ActivityLevel, BiologicalSex, HealthProfile,
};
use calorie_tracker_shared::types::{CalorieTargetResponse, UpdateProfileRequest, UserProfile};
use calorie_tracker_shared::validation::{
    get_missing_fields_labels, labelled, validate_age, validate_height_cm,
    validate_target_calories, validate_weight,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Biometric fields as submitted at registration or profile update
#[derive(Debug, Clone, Copy, Default)]
pub struct Biometrics {
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub target_calories: Option<i32>,
}

/// Validate each biometric that was supplied
pub fn validate_biometrics(b: &Biometrics) -> Result<(), ApiError> {
    if let Some(age) = b.age {
        validate_age(age).map_err(|m| ApiError::Validation(labelled("age", m)))?;
    }
    if let Some(height) = b.height {
        validate_height_cm(height).map_err(|m| ApiError::Validation(labelled("height", m)))?;
    }
    if let Some(weight) = b.weight {
        validate_weight(weight).map_err(|m| ApiError::Validation(labelled("weight", m)))?;
    }
    if let Some(target) = b.target_calories {
        validate_target_calories(target)
            .map_err(|m| ApiError::Validation(labelled("target_calories", m)))?;
    }
    Ok(())
}

/// Stored biometrics, parsed back into typed values
struct StoredBiometrics {
    age: Option<i32>,
    sex: Option<BiologicalSex>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    activity_level: Option<ActivityLevel>,
}

impl StoredBiometrics {
    fn from_record(user: &UserRecord) -> Self {
        Self {
            age: user.age,
            sex: user.sex.as_deref().and_then(|s| s.parse().ok()),
            height_cm: user.height_cm.map(dec_to_f64),
            weight_kg: user.weight_kg.map(dec_to_f64),
            activity_level: user.activity_level.as_deref().and_then(|s| s.parse().ok()),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age.is_none() {
            missing.push("age");
        }
        if self.sex.is_none() {
            missing.push("sex");
        }
        if self.height_cm.is_none() {
            missing.push("height");
        }
        if self.weight_kg.is_none() {
            missing.push("weight");
        }
        if self.activity_level.is_none() {
            missing.push("activity_level");
        }
        missing
    }

    fn health_profile(&self) -> Option<HealthProfile> {
        HealthProfile::from_parts(
            self.height_cm,
            self.weight_kg,
            self.age,
            self.sex,
            self.activity_level,
        )
    }
}

/// Build the API profile from a user row
pub fn profile_from_record(user: UserRecord) -> UserProfile {
    UserProfile {
        id: user.id.to_string(),
        email: user.email,
        age: user.age,
        sex: user.sex,
        height: user.height_cm.map(dec_to_f64),
        weight: user.weight_kg.map(dec_to_f64),
        activity_level: user.activity_level,
        target_calories: user.target_calories,
        created_at: user.created_at,
    }
}

/// Profile service for user profile operations
pub struct ProfileService;

impl ProfileService {
    async fn load(db: &PgPool, user_id: Uuid) -> Result<UserRecord, ApiError> {
        UserRepository::find_by_id(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Get user profile
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        Ok(profile_from_record(Self::load(db, user_id).await?))
    }

    /// Apply a partial profile update
    pub async fn update_profile(
        db: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        validate_biometrics(&Biometrics {
            age: req.age,
            height: req.height,
            weight: req.weight,
            target_calories: req.target_calories,
        })?;

        let updates = UpdateUserProfile {
            age: req.age,
            sex: req.sex.map(|s| s.as_str().to_string()),
            height_cm: req.height.map(f64_to_dec),
            weight_kg: req.weight.map(f64_to_dec),
            activity_level: req.activity_level.map(|a| a.as_str().to_string()),
            target_calories: req.target_calories,
        };

        let user = UserRepository::update_profile(db, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = %user_id, "Profile updated");
        Ok(profile_from_record(user))
    }

    /// BMR/TDEE breakdown for the stored profile
    pub async fn calorie_target(db: &PgPool, user_id: Uuid) -> Result<CalorieTargetResponse, ApiError> {
        let user = Self::load(db, user_id).await?;
        calorie_target_for(&user)
    }
}

fn calorie_target_for(user: &UserRecord) -> Result<CalorieTargetResponse, ApiError> {
    let stored = StoredBiometrics::from_record(user);

    let Some(profile) = stored.health_profile() else {
        let labels = get_missing_fields_labels(&stored.missing_fields());
        return Err(ApiError::Validation(format!(
            "Missing required fields: {}",
            labels.join(", ")
        )));
    };

    let result = calculate_calorie_target(&profile);
    Ok(CalorieTargetResponse {
        bmr: result.bmr,
        tdee: result.tdee,
        activity_level: profile.activity_level.as_str().to_string(),
        activity_multiplier: result.activity_multiplier,
        suggested_target: result.suggested_target,
        calories_for_loss: result.calories_for_loss,
        calories_for_gain: result.calories_for_gain,
        current_target: user.target_calories,
    })
}
