use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use time::{Date, Duration, OffsetDateTime};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use super::dto::{resolve_range, GoalStreakResponse, InsightsQuery, StreakHistoryEntry};
use super::report::{self, InsightsReport};
use super::{repo, streak};
use crate::auth::AuthUser;
use crate::goals::dto::GoalResponse;
use crate::state::AppState;

/// How much achievement history the streak endpoint returns for charting.
const HISTORY_DAYS: i64 = 30;

#[instrument(skip(state))]
pub async fn get_insights(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<InsightsQuery>,
) -> Result<Json<InsightsReport>, (StatusCode, String)> {
    let today = OffsetDateTime::now_utc().date();
    let (start, end) = resolve_range(&q, today).map_err(|msg| {
        warn!(%user_id, "bad insights range: {msg}");
        (StatusCode::BAD_REQUEST, msg)
    })?;

    let records = repo::fetch_meal_records(&state.db, user_id, start, end)
        .await
        .map_err(internal)?;
    let goals = crate::goals::repo::fetch_active(&state.db, user_id)
        .await
        .map_err(internal)?;

    let report = report::build_report(&records, &goals, start, end)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(report))
}

#[instrument(skip(state))]
pub async fn get_goal_streak(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(goal_id): Path<Uuid>,
) -> Result<Json<GoalStreakResponse>, (StatusCode, String)> {
    let goal = crate::goals::repo::get_by_id(&state.db, user_id, goal_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Goal not found".to_string()))?;

    let today = OffsetDateTime::now_utc().date();
    let rows = repo::fetch_streak_history(
        &state.db,
        user_id,
        goal_id,
        today - Duration::days(streak::LOOKBACK_DAYS),
    )
    .await
    .map_err(internal)?;

    let achieved_by_date: HashMap<Date, bool> =
        rows.iter().map(|r| (r.streak_date, r.achieved)).collect();
    let current_streak = streak::current_streak(today, &achieved_by_date);

    let cutoff = today - Duration::days(HISTORY_DAYS);
    let history: Vec<StreakHistoryEntry> = rows
        .iter()
        .filter(|r| r.streak_date >= cutoff)
        .rev() // rows come newest-first; history charts oldest-first
        .map(StreakHistoryEntry::from)
        .collect();

    Ok(Json(GoalStreakResponse {
        goal: GoalResponse::from(goal),
        current_streak,
        history,
    }))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
