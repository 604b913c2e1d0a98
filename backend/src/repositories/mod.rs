//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod daily_total;
pub mod food_entry;
pub mod user;

pub use daily_total::{DailyCalories, DailyTotal, DailyTotalRepository};
pub use food_entry::{CreateFoodEntry, FoodEntry, FoodEntryRepository};
pub use user::{CreateUser, UpdateUserProfile, UserRecord, UserRepository};
