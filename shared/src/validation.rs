//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Each validator returns a plain message; callers prefix it with the field's
//! display label.

use std::sync::OnceLock;

fn email_regex() -> &'static regex_lite::Regex {
    static EMAIL_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email_regex().is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
///
/// At least 8 characters, one uppercase letter and one digit.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number".to_string());
    }
    Ok(())
}

fn require_finite(value: f64, what: &str) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", what));
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    require_finite(height_cm, "Height")?;
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    require_finite(weight_kg, "Weight")?;
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate calories for a single serving
pub fn validate_calories(calories: f64) -> Result<(), String> {
    require_finite(calories, "Calories")?;
    if calories < 0.0 {
        return Err("Calories cannot be negative".to_string());
    }
    if calories > 50000.0 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate a macronutrient amount in grams
pub fn validate_macro_grams(grams: f64) -> Result<(), String> {
    require_finite(grams, "Amount")?;
    if grams < 0.0 {
        return Err("Amount cannot be negative".to_string());
    }
    if grams > 10000.0 {
        return Err("Amount unreasonably high".to_string());
    }
    Ok(())
}

/// Validate number of servings consumed
pub fn validate_quantity(quantity: f64) -> Result<(), String> {
    require_finite(quantity, "Quantity")?;
    if quantity <= 0.0 {
        return Err("Quantity must be positive".to_string());
    }
    if quantity > 100.0 {
        return Err("Quantity cannot exceed 100 servings".to_string());
    }
    Ok(())
}

/// Validate a daily calorie target
pub fn validate_target_calories(target: i32) -> Result<(), String> {
    if target < 500 {
        return Err("Target must be at least 500 calories".to_string());
    }
    if target > 10000 {
        return Err("Target cannot exceed 10000 calories".to_string());
    }
    Ok(())
}

/// Validate the name of a logged food
pub fn validate_food_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Food name cannot be empty".to_string());
    }
    if name.len() > 255 {
        return Err("Food name too long".to_string());
    }
    Ok(())
}

/// Valid activity levels
pub const VALID_ACTIVITY_LEVELS: &[&str] = &[
    "sedentary",
    "lightly_active",
    "moderately_active",
    "very_active",
    "extremely_active",
];

/// Validate activity level
pub fn validate_activity_level(level: &str) -> Result<(), String> {
    level
        .parse::<crate::health_metrics::ActivityLevel>()
        .map(|_| ())
        .map_err(|_| {
            format!(
                "Invalid activity level. Must be one of: {}",
                VALID_ACTIVITY_LEVELS.join(", ")
            )
        })
}

/// Valid biological sex values
pub const VALID_BIOLOGICAL_SEX: &[&str] = &["male", "female"];

/// Validate biological sex
pub fn validate_biological_sex(sex: &str) -> Result<(), String> {
    let normalized = sex.to_lowercase();
    if VALID_BIOLOGICAL_SEX.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Invalid biological sex. Must be one of: {}",
            VALID_BIOLOGICAL_SEX.join(", ")
        ))
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "email" => "Email",
        "password" => "Password",
        "age" => "Age",
        "sex" | "biological_sex" => "Sex",
        "height" | "height_cm" => "Height",
        "weight" | "weight_kg" => "Weight",
        "activity_level" => "Activity Level",
        "target_calories" => "Target Calories",
        "food_name" => "Food Name",
        "calories" => "Calories",
        "protein" => "Protein",
        "carbs" => "Carbohydrates",
        "fat" => "Fat",
        "quantity" => "Quantity",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Format a validator message with the field's display label
pub fn labelled(field: &str, message: String) -> String {
    format!("{}: {}", get_field_display_label(field), message)
}
