//! Food entry repository
//!
//! Writes take a `PgConnection` so callers can run them inside the same
//! transaction that refreshes the day's totals.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Food entry row; nutrient values are per serving
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_name: String,
    pub calories: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub serving_size: Option<String>,
    pub quantity: Decimal,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Input for logging food
#[derive(Debug, Clone)]
pub struct CreateFoodEntry {
    pub user_id: Uuid,
    pub food_name: String,
    pub calories: Decimal,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub serving_size: Option<String>,
    pub quantity: Decimal,
    pub date: NaiveDate,
}

const ENTRY_COLUMNS: &str = "id, user_id, food_name, calories, protein, carbs, fat, \
                             serving_size, quantity, date, created_at";

/// Food entry repository
pub struct FoodEntryRepository;

impl FoodEntryRepository {
    /// Insert an entry
    pub async fn create(conn: &mut PgConnection, input: CreateFoodEntry) -> Result<FoodEntry> {
        let entry = sqlx::query_as::<_, FoodEntry>(&format!(
            r#"
            INSERT INTO food_entries (user_id, food_name, calories, protein, carbs, fat,
                                      serving_size, quantity, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(input.user_id)
        .bind(input.food_name)
        .bind(input.calories)
        .bind(input.protein)
        .bind(input.carbs)
        .bind(input.fat)
        .bind(input.serving_size)
        .bind(input.quantity)
        .bind(input.date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(entry)
    }

    /// Entries for one day, newest first
    pub async fn list_by_date(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<Vec<FoodEntry>> {
        let entries = sqlx::query_as::<_, FoodEntry>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM food_entries
            WHERE user_id = $1 AND date = $2
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Change an entry's quantity; `None` if the user has no such entry
    pub async fn update_quantity(
        conn: &mut PgConnection,
        user_id: Uuid,
        id: Uuid,
        quantity: Decimal,
    ) -> Result<Option<FoodEntry>> {
        let entry = sqlx::query_as::<_, FoodEntry>(&format!(
            r#"
            UPDATE food_entries SET quantity = $3
            WHERE id = $1 AND user_id = $2
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(quantity)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(entry)
    }

    /// Delete an entry, returning the date it was logged on
    pub async fn delete(conn: &mut PgConnection, user_id: Uuid, id: Uuid) -> Result<Option<NaiveDate>> {
        let date = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            DELETE FROM food_entries
            WHERE id = $1 AND user_id = $2
            RETURNING date
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(date)
    }
}
