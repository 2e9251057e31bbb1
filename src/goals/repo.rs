use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NutritionGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: String,
    pub target_value: f64,
    pub target_min: Option<f64>,
    pub target_max: Option<f64>,
    pub unit: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

pub async fn fetch_active(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<NutritionGoal>> {
    let rows = sqlx::query_as::<_, NutritionGoal>(
        r#"
        SELECT id, user_id, goal_type, target_value, target_min, target_max,
               unit, is_active, created_at
        FROM nutrition_goals
        WHERE user_id = $1 AND is_active
        ORDER BY goal_type
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("fetch active goals")?;
    Ok(rows)
}

pub async fn get_by_id(
    db: &PgPool,
    user_id: Uuid,
    goal_id: Uuid,
) -> anyhow::Result<Option<NutritionGoal>> {
    let row = sqlx::query_as::<_, NutritionGoal>(
        r#"
        SELECT id, user_id, goal_type, target_value, target_min, target_max,
               unit, is_active, created_at
        FROM nutrition_goals
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(goal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("get goal by id")?;
    Ok(row)
}

/// Inserts a goal, deactivating any previous active goal of the same type
/// in the same transaction. Old goals stay around (inactive) so their
/// streak history keeps meaning.
pub async fn create(
    db: &PgPool,
    user_id: Uuid,
    goal_type: &str,
    target_value: f64,
    target_min: Option<f64>,
    target_max: Option<f64>,
    unit: &str,
) -> anyhow::Result<NutritionGoal> {
    let mut tx = db.begin().await.context("begin tx")?;

    sqlx::query(
        r#"
        UPDATE nutrition_goals
        SET is_active = FALSE, updated_at = now()
        WHERE user_id = $1 AND goal_type = $2 AND is_active
        "#,
    )
    .bind(user_id)
    .bind(goal_type)
    .execute(&mut *tx)
    .await
    .context("deactivate previous goal")?;

    let goal = sqlx::query_as::<_, NutritionGoal>(
        r#"
        INSERT INTO nutrition_goals (user_id, goal_type, target_value, target_min, target_max, unit)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, goal_type, target_value, target_min, target_max,
                  unit, is_active, created_at
        "#,
    )
    .bind(user_id)
    .bind(goal_type)
    .bind(target_value)
    .bind(target_min)
    .bind(target_max)
    .bind(unit)
    .fetch_one(&mut *tx)
    .await
    .context("insert goal")?;

    tx.commit().await.context("commit tx")?;
    Ok(goal)
}

/// Soft delete: returns false when no matching active goal exists.
pub async fn deactivate(db: &PgPool, user_id: Uuid, goal_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE nutrition_goals
        SET is_active = FALSE, updated_at = now()
        WHERE id = $1 AND user_id = $2 AND is_active
        "#,
    )
    .bind(goal_id)
    .bind(user_id)
    .execute(db)
    .await
    .context("deactivate goal")?;
    Ok(result.rows_affected() > 0)
}
