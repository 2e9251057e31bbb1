use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration};

use super::repo::GoalStreakRow;
use super::types::date_fmt;
use crate::goals::dto::GoalResponse;

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Resolves the requested range. Unless both bounds are supplied the range
/// defaults to the last seven days ending today (an 8-entry table).
pub fn resolve_range(q: &InsightsQuery, today: Date) -> Result<(Date, Date), String> {
    match (q.start_date.as_deref(), q.end_date.as_deref()) {
        (Some(start), Some(end)) => Ok((parse_date(start)?, parse_date(end)?)),
        _ => Ok((today - Duration::days(7), today)),
    }
}

fn parse_date(raw: &str) -> Result<Date, String> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| "invalid date format, use YYYY-MM-DD".to_string())
}

#[derive(Debug, Serialize)]
pub struct StreakHistoryEntry {
    #[serde(with = "date_fmt")]
    pub date: Date,
    pub achieved: bool,
    pub actual_value: f64,
    pub deviation_percentage: f64,
}

impl From<&GoalStreakRow> for StreakHistoryEntry {
    fn from(r: &GoalStreakRow) -> Self {
        StreakHistoryEntry {
            date: r.streak_date,
            achieved: r.achieved,
            actual_value: r.actual_value,
            deviation_percentage: r.deviation_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GoalStreakResponse {
    pub goal: GoalResponse,
    pub current_streak: u32,
    pub history: Vec<StreakHistoryEntry>,
}
