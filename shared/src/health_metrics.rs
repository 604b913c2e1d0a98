//! Calorie target calculations
//!
//! Derives a suggested daily calorie target from a user's biometrics using the
//! Mifflin-St Jeor BMR equation scaled by an activity multiplier.
//!
//! All functions here are pure. Inputs are SI: centimeters, kilograms, years.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// User Profile Types
// ============================================================================

/// Biological sex for BMR calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl BiologicalSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "male",
            BiologicalSex::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(BiologicalSex::Male),
            "female" => Ok(BiologicalSex::Female),
            other => Err(format!("Unknown biological sex: {}", other)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    #[serde(alias = "extra_active")]
    ExtremelyActive,
}

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtremelyActive => "Very hard exercise or physical job",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extremely_active" | "extra_active" => Ok(ActivityLevel::ExtremelyActive),
            other => Err(format!("Unknown activity level: {}", other)),
        }
    }
}

/// Biometrics needed for the calorie target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Height in centimeters
    pub height_cm: f64,
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Age in years
    pub age_years: i32,
    pub sex: BiologicalSex,
    pub activity_level: ActivityLevel,
}

impl HealthProfile {
    /// Build a profile only when every input is known
    pub fn from_parts(
        height_cm: Option<f64>,
        weight_kg: Option<f64>,
        age_years: Option<i32>,
        sex: Option<BiologicalSex>,
        activity_level: Option<ActivityLevel>,
    ) -> Option<Self> {
        Some(Self {
            height_cm: height_cm?,
            weight_kg: weight_kg?,
            age_years: age_years?,
            sex: sex?,
            activity_level: activity_level?,
        })
    }
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Floor applied to the weight-loss suggestion
pub const MIN_SAFE_CALORIES: f64 = 1200.0;

/// Daily deficit/surplus used for loss and gain suggestions
pub const CALORIE_ADJUSTMENT: f64 = 500.0;

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(profile: &HealthProfile) -> f64 {
    let bmr = calculate_bmr_mifflin(profile.weight_kg, profile.height_cm, profile.age_years, profile.sex);
    bmr * profile.activity_level.multiplier()
}

/// Suggested daily target: TDEE rounded to the nearest whole calorie
pub fn suggested_target_calories(profile: &HealthProfile) -> i32 {
    calculate_tdee(profile).round() as i32
}

/// Calorie target with breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieTargetResult {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    /// Maintenance target, rounded
    pub suggested_target: i32,
    /// 500 deficit, never below 1200
    pub calories_for_loss: f64,
    /// 500 surplus
    pub calories_for_gain: f64,
}

/// Calculate the calorie target with its breakdown
pub fn calculate_calorie_target(profile: &HealthProfile) -> CalorieTargetResult {
    let bmr = calculate_bmr_mifflin(profile.weight_kg, profile.height_cm, profile.age_years, profile.sex);
    let multiplier = profile.activity_level.multiplier();
    let tdee = bmr * multiplier;

    CalorieTargetResult {
        bmr,
        tdee,
        activity_multiplier: multiplier,
        suggested_target: tdee.round() as i32,
        calories_for_loss: (tdee - CALORIE_ADJUSTMENT).max(MIN_SAFE_CALORIES),
        calories_for_gain: tdee + CALORIE_ADJUSTMENT,
    }
}
