//! Outbound HTTP clients

pub mod nutritionix;

pub use nutritionix::{NutritionixClient, NutritionixError};
