//! Food log service
//!
//! Every write to `food_entries` recomputes the affected day's
//! `daily_totals` row inside the same transaction, so totals always equal
//! the sum of `value * quantity` over the day's entries.

use super::{dec_to_f64, f64_to_dec};
use crate::error::ApiError;
use crate::repositories::{
    CreateFoodEntry, DailyCalories, DailyTotalRepository, FoodEntry, FoodEntryRepository,
    UserRepository,
};
use calorie_tracker_shared::types::{
    CreateFoodEntryRequest, DailyTotalResponse, EntryCreatedResponse, FoodEntryResponse,
    UpdateFoodEntryRequest, WeeklyProgressPoint,
};
use calorie_tracker_shared::validation::{
    labelled, validate_calories, validate_food_name, validate_macro_grams, validate_quantity,
};
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Days before `end` covered by the weekly chart
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

fn validate_entry(req: &CreateFoodEntryRequest) -> Result<(), ApiError> {
    validate_food_name(&req.food_name)
        .map_err(|m| ApiError::Validation(labelled("food_name", m)))?;
    validate_calories(req.calories).map_err(|m| ApiError::Validation(labelled("calories", m)))?;

    for (field, value) in [("protein", req.protein), ("carbs", req.carbs), ("fat", req.fat)] {
        if let Some(grams) = value {
            validate_macro_grams(grams).map_err(|m| ApiError::Validation(labelled(field, m)))?;
        }
    }

    validate_quantity(req.quantity).map_err(|m| ApiError::Validation(labelled("quantity", m)))
}

fn entry_response(entry: FoodEntry) -> FoodEntryResponse {
    FoodEntryResponse {
        id: entry.id.to_string(),
        food_name: entry.food_name,
        calories: dec_to_f64(entry.calories),
        protein: dec_to_f64(entry.protein),
        carbs: dec_to_f64(entry.carbs),
        fat: dec_to_f64(entry.fat),
        serving_size: entry.serving_size,
        quantity: dec_to_f64(entry.quantity),
        date: entry.date,
        created_at: entry.created_at,
    }
}

/// Share of the target eaten, capped at 100; 0 without a usable target
pub fn progress_percent(total_calories: f64, target: Option<i32>) -> f64 {
    match target {
        Some(target) if target > 0 => (total_calories * 100.0 / target as f64).min(100.0),
        _ => 0.0,
    }
}

/// First day of the weekly window ending on `end`
pub fn weekly_window_start(end: NaiveDate) -> Result<NaiveDate, ApiError> {
    end.checked_sub_signed(Duration::days(WEEKLY_WINDOW_DAYS))
        .ok_or_else(|| ApiError::BadRequest("End date is out of range".to_string()))
}

/// One point per day from `start` to `end`, zero where nothing was logged
pub fn fill_week(start: NaiveDate, end: NaiveDate, rows: &[DailyCalories]) -> Vec<WeeklyProgressPoint> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| WeeklyProgressPoint {
            date,
            total_calories: rows
                .iter()
                .find(|row| row.date == date)
                .map(|row| dec_to_f64(row.total_calories))
                .unwrap_or(0.0),
        })
        .collect()
}

/// Food log service
pub struct FoodLogService;

impl FoodLogService {
    /// Log a food and refresh the day's totals
    pub async fn add_entry(
        db: &PgPool,
        user_id: Uuid,
        req: CreateFoodEntryRequest,
    ) -> Result<EntryCreatedResponse, ApiError> {
        validate_entry(&req)?;

        let input = CreateFoodEntry {
            user_id,
            food_name: req.food_name.trim().to_string(),
            calories: f64_to_dec(req.calories),
            protein: f64_to_dec(req.protein.unwrap_or(0.0)),
            carbs: f64_to_dec(req.carbs.unwrap_or(0.0)),
            fat: f64_to_dec(req.fat.unwrap_or(0.0)),
            serving_size: req.serving_size.filter(|s| !s.trim().is_empty()),
            quantity: f64_to_dec(req.quantity),
            date: req.date,
        };

        let mut tx = db.begin().await?;
        let entry = FoodEntryRepository::create(&mut tx, input)
            .await
            .map_err(ApiError::Internal)?;
        DailyTotalRepository::recompute(&mut tx, user_id, entry.date)
            .await
            .map_err(ApiError::Internal)?;
        tx.commit().await?;

        info!(user_id = %user_id, entry_id = %entry.id, date = %entry.date, "Food entry added");
        Ok(EntryCreatedResponse {
            message: "Food entry added successfully".to_string(),
            entry_id: entry.id.to_string(),
        })
    }

    /// Entries for a day, newest first
    pub async fn list_entries(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<FoodEntryResponse>, ApiError> {
        let entries = FoodEntryRepository::list_by_date(db, user_id, date)
            .await
            .map_err(ApiError::Internal)?;

        Ok(entries.into_iter().map(entry_response).collect())
    }

    /// Change an entry's quantity
    pub async fn update_entry(
        db: &PgPool,
        user_id: Uuid,
        entry_id: Uuid,
        req: UpdateFoodEntryRequest,
    ) -> Result<FoodEntryResponse, ApiError> {
        validate_quantity(req.quantity)
            .map_err(|m| ApiError::Validation(labelled("quantity", m)))?;

        let mut tx = db.begin().await?;
        let quantity = f64_to_dec(req.quantity);
        let entry = FoodEntryRepository::update_quantity(&mut tx, user_id, entry_id, quantity)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Food entry not found".to_string()))?;
        DailyTotalRepository::recompute(&mut tx, user_id, entry.date)
            .await
            .map_err(ApiError::Internal)?;
        tx.commit().await?;

        info!(user_id = %user_id, entry_id = %entry_id, "Food entry updated");
        Ok(entry_response(entry))
    }

    /// Remove an entry
    pub async fn delete_entry(db: &PgPool, user_id: Uuid, entry_id: Uuid) -> Result<(), ApiError> {
        let mut tx = db.begin().await?;
        let date = FoodEntryRepository::delete(&mut tx, user_id, entry_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Food entry not found".to_string()))?;
        DailyTotalRepository::recompute(&mut tx, user_id, date)
            .await
            .map_err(ApiError::Internal)?;
        tx.commit().await?;

        info!(user_id = %user_id, entry_id = %entry_id, "Food entry deleted");
        Ok(())
    }

    /// Totals for a day measured against the user's target
    pub async fn daily_total(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<DailyTotalResponse, ApiError> {
        let user = UserRepository::find_by_id(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let totals = DailyTotalRepository::find(db, user_id, date)
            .await
            .map_err(ApiError::Internal)?;

        let (calories, protein, carbs, fat) = totals
            .map(|t| {
                (
                    dec_to_f64(t.total_calories),
                    dec_to_f64(t.total_protein),
                    dec_to_f64(t.total_carbs),
                    dec_to_f64(t.total_fat),
                )
            })
            .unwrap_or_default();

        let target = user.target_calories;
        Ok(DailyTotalResponse {
            date,
            total_calories: calories,
            total_protein: protein,
            total_carbs: carbs,
            total_fat: fat,
            target_calories: target,
            remaining_calories: target.map(|t| t as f64 - calories),
            progress_percent: progress_percent(calories, target),
        })
    }

    /// Calories per day for the week ending on `end`, oldest first
    pub async fn weekly_progress(
        db: &PgPool,
        user_id: Uuid,
        end: NaiveDate,
    ) -> Result<Vec<WeeklyProgressPoint>, ApiError> {
        let start = weekly_window_start(end)?;
        let rows = DailyTotalRepository::calories_in_range(db, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(fill_week(start, end, &rows))
    }
}
