//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::health_metrics::{ActivityLevel, BiologicalSex};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Registration request with optional biometrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub sex: Option<BiologicalSex>,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub target_calories: Option<i32>,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Session tokens plus the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Access token
    pub token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

// ============================================================================
// Profile
// ============================================================================

/// User profile as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub age: Option<i32>,
    pub sex: Option<String>,
    /// Height in cm
    pub height: Option<f64>,
    /// Weight in kg
    pub weight: Option<f64>,
    pub activity_level: Option<String>,
    pub target_calories: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub sex: Option<BiologicalSex>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default)]
    pub target_calories: Option<i32>,
}

/// BMR/TDEE breakdown for a stored profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieTargetResponse {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_level: String,
    pub activity_multiplier: f64,
    pub suggested_target: i32,
    pub calories_for_loss: f64,
    pub calories_for_gain: f64,
    /// Target currently stored on the profile
    pub current_target: Option<i32>,
}

// ============================================================================
// Food Search
// ============================================================================

/// Food search query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodSearchQuery {
    #[serde(default)]
    pub query: String,
}

/// Single nutrient value reported by the lookup API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientValue {
    pub attr_id: u32,
    pub value: f64,
}

/// Food search hit, per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSearchResult {
    pub id: u32,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub serving_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_nutrients: Option<Vec<NutrientValue>>,
}

/// Detailed nutrition for a natural-language food query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionDetail {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub serving_size: String,
    pub serving_qty: f64,
    pub serving_unit: String,
}

// ============================================================================
// Food Log
// ============================================================================

/// Log a food; nutrient values are per serving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFoodEntryRequest {
    pub food_name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub serving_size: Option<String>,
    pub quantity: f64,
    pub date: NaiveDate,
}

/// Change the number of servings of an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFoodEntryRequest {
    pub quantity: f64,
}

/// Logged food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodEntryResponse {
    pub id: String,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub serving_size: Option<String>,
    pub quantity: f64,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Response to a new entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryCreatedResponse {
    pub message: String,
    #[serde(rename = "entryId")]
    pub entry_id: String,
}

/// Totals for one day against the user's target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTotalResponse {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub target_calories: Option<i32>,
    pub remaining_calories: Option<f64>,
    pub progress_percent: f64,
}

/// Weekly progress query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyProgressQuery {
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// Calories for one day of the weekly chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgressPoint {
    pub date: NaiveDate,
    pub total_calories: f64,
}
