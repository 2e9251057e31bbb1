use anyhow::Context;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::ledger::MealRecord;
use super::types::Nutrients;

#[derive(Debug, Clone, FromRow)]
struct MealRecordRow {
    consumed_at: OffsetDateTime,
    portion_multiplier: f64,
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fats_g: f64,
    sodium_mg: f64,
    fiber_g: f64,
    sugar_g: f64,
    calcium_mg: f64,
    iron_mg: f64,
}

impl From<MealRecordRow> for MealRecord {
    fn from(r: MealRecordRow) -> Self {
        MealRecord {
            consumed_at: r.consumed_at,
            portion_multiplier: r.portion_multiplier,
            per_serving: Nutrients {
                calories: r.calories,
                protein: r.protein_g,
                carbs: r.carbs_g,
                fats: r.fats_g,
                sodium: r.sodium_mg,
                fiber: r.fiber_g,
                sugar: r.sugar_g,
                calcium: r.calcium_mg,
                iron: r.iron_mg,
            },
        }
    }
}

/// All meal records for the user whose UTC calendar date falls in the
/// inclusive range, joined with the food's per-serving nutrient snapshot.
/// Order is irrelevant: the ledger re-buckets by date.
pub async fn fetch_meal_records(
    db: &PgPool,
    user_id: Uuid,
    start: Date,
    end: Date,
) -> anyhow::Result<Vec<MealRecord>> {
    let rows = sqlx::query_as::<_, MealRecordRow>(
        r#"
        SELECT l.consumed_at, l.portion_multiplier,
               f.calories, f.protein_g, f.carbs_g, f.fats_g,
               f.sodium_mg, f.fiber_g, f.sugar_g, f.calcium_mg, f.iron_mg
        FROM meal_logs l
        JOIN food_items f ON f.id = l.food_item_id
        WHERE l.user_id = $1
          AND (l.consumed_at AT TIME ZONE 'UTC')::date >= $2
          AND (l.consumed_at AT TIME ZONE 'UTC')::date <= $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .context("fetch meal records")?;

    Ok(rows.into_iter().map(MealRecord::from).collect())
}

/// One row per scored day for the goal, newest first.
#[derive(Debug, Clone, FromRow)]
pub struct GoalStreakRow {
    pub streak_date: Date,
    pub achieved: bool,
    pub actual_value: f64,
    pub deviation_percentage: f64,
}

/// Fetches the goal's achievement history since `since` in one query, so a
/// whole backward scan runs against a single consistent snapshot.
pub async fn fetch_streak_history(
    db: &PgPool,
    user_id: Uuid,
    goal_id: Uuid,
    since: Date,
) -> anyhow::Result<Vec<GoalStreakRow>> {
    let rows = sqlx::query_as::<_, GoalStreakRow>(
        r#"
        SELECT streak_date, achieved, actual_value, deviation_percentage
        FROM goal_streaks
        WHERE user_id = $1 AND goal_id = $2 AND streak_date >= $3
        ORDER BY streak_date DESC
        "#,
    )
    .bind(user_id)
    .bind(goal_id)
    .bind(since)
    .fetch_all(db)
    .await
    .context("fetch streak history")?;
    Ok(rows)
}
