use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use time::{Date, Duration, OffsetDateTime};
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::dto::{CreateGoalBody, GoalResponse, GoalWithStreak};
use super::repo;
use crate::auth::AuthUser;
use crate::insights::{repo as insights_repo, streak};
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<GoalWithStreak>>, (StatusCode, String)> {
    let goals = repo::fetch_active(&state.db, user_id)
        .await
        .map_err(internal)?;

    let today = OffsetDateTime::now_utc().date();
    let since = today - Duration::days(streak::LOOKBACK_DAYS);

    let mut items = Vec::with_capacity(goals.len());
    for goal in goals {
        let rows = insights_repo::fetch_streak_history(&state.db, user_id, goal.id, since)
            .await
            .map_err(internal)?;
        let achieved_by_date: HashMap<Date, bool> =
            rows.iter().map(|r| (r.streak_date, r.achieved)).collect();
        let current_streak = streak::current_streak(today, &achieved_by_date);
        items.push(GoalWithStreak {
            goal: GoalResponse::from(goal),
            current_streak,
        });
    }
    Ok(Json(items))
}

#[instrument(skip(state, body))]
pub async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateGoalBody>,
) -> Result<(StatusCode, Json<GoalResponse>), (StatusCode, String)> {
    if !body.target_value.is_finite() || body.target_value <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "target_value must be positive".into(),
        ));
    }

    let goal = repo::create(
        &state.db,
        user_id,
        body.goal_type.as_str(),
        body.target_value,
        body.target_min,
        body.target_max,
        &body.unit,
    )
    .await
    .map_err(internal)?;

    info!(%user_id, goal_id = %goal.id, goal_type = %goal.goal_type, "goal created");
    Ok((StatusCode::CREATED, Json(GoalResponse::from(goal))))
}

#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(goal_id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let removed = repo::deactivate(&state.db, user_id, goal_id)
        .await
        .map_err(internal)?;
    if !removed {
        return Err((StatusCode::NOT_FOUND, "Goal not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
