//! Daily totals repository
//!
//! `daily_totals` holds one row per (user, date) equal to the sum of
//! `value * quantity` over that day's food entries. Rows are only ever
//! written by `recompute`.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Aggregated nutrition for one day
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyTotal {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub total_calories: Decimal,
    pub total_protein: Decimal,
    pub total_carbs: Decimal,
    pub total_fat: Decimal,
}

/// Calories for one day of a range
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyCalories {
    pub date: NaiveDate,
    pub total_calories: Decimal,
}

/// Daily totals repository
pub struct DailyTotalRepository;

impl DailyTotalRepository {
    /// Rebuild the totals row for a day from its food entries
    ///
    /// A day with no entries ends up with an all-zero row.
    ///
    /// Takes a transaction-scoped advisory lock on (user, date) first. The SUM
    /// runs as a separate statement, so its snapshot includes every entry
    /// committed by a writer that held the lock before us.
    pub async fn recompute(conn: &mut PgConnection, user_id: Uuid, date: NaiveDate) -> Result<DailyTotal> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::uuid::text || ':' || $2::date::text, 0))")
            .bind(user_id)
            .bind(date)
            .execute(&mut *conn)
            .await?;

        let total = sqlx::query_as::<_, DailyTotal>(
            r#"
            INSERT INTO daily_totals (user_id, date, total_calories, total_protein,
                                      total_carbs, total_fat, updated_at)
            SELECT $1::uuid, $2::date,
                   COALESCE(SUM(calories * quantity), 0),
                   COALESCE(SUM(protein * quantity), 0),
                   COALESCE(SUM(carbs * quantity), 0),
                   COALESCE(SUM(fat * quantity), 0),
                   NOW()
            FROM food_entries
            WHERE user_id = $1 AND date = $2
            ON CONFLICT (user_id, date) DO UPDATE SET
                total_calories = EXCLUDED.total_calories,
                total_protein = EXCLUDED.total_protein,
                total_carbs = EXCLUDED.total_carbs,
                total_fat = EXCLUDED.total_fat,
                updated_at = NOW()
            RETURNING user_id, date, total_calories, total_protein, total_carbs, total_fat
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&mut *conn)
        .await?;

        Ok(total)
    }

    /// Totals for one day, if anything was ever logged
    pub async fn find(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<Option<DailyTotal>> {
        let total = sqlx::query_as::<_, DailyTotal>(
            r#"
            SELECT user_id, date, total_calories, total_protein, total_carbs, total_fat
            FROM daily_totals
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(total)
    }

    /// Calories per day over an inclusive date range, oldest first
    pub async fn calories_in_range(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCalories>> {
        let rows = sqlx::query_as::<_, DailyCalories>(
            r#"
            SELECT date, total_calories
            FROM daily_totals
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}
