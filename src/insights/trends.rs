use serde::Serialize;

use super::types::{DailyTotals, Nutrient};

/// Fewer data-days than this and no trend is reported.
const MIN_DATA_DAYS: usize = 3;
const RISING_FACTOR: f64 = 1.10;
const FALLING_FACTOR: f64 = 0.90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trend {
    #[serde(rename = "type")]
    pub kind: TrendKind,
    pub metric: Nutrient,
    pub message: String,
}

/// Directional change in calorie intake across the window: the ordered
/// data-day values are split at the index midpoint (odd counts give the
/// extra day to the second half) and the half-means compared.
///
/// This is a coarse two-bucket heuristic, not a statistical trend test.
/// Calories only for now; other nutrients would follow the same rule.
pub fn analyze(days: &[DailyTotals]) -> Vec<Trend> {
    let values: Vec<f64> = days
        .iter()
        .filter(|d| d.meal_count > 0)
        .map(|d| d.totals.calories)
        .collect();

    let mut trends = Vec::new();
    if values.len() < MIN_DATA_DAYS {
        return trends;
    }

    let mid = values.len() / 2;
    let first_half_avg = values[..mid].iter().sum::<f64>() / mid as f64;
    let second_half_avg =
        values[mid..].iter().sum::<f64>() / (values.len() - mid) as f64;

    let kind = if second_half_avg > first_half_avg * RISING_FACTOR {
        TrendKind::Increasing
    } else if second_half_avg < first_half_avg * FALLING_FACTOR {
        TrendKind::Decreasing
    } else {
        TrendKind::Stable
    };
    let message = match kind {
        TrendKind::Increasing => {
            "Your calorie intake has been increasing over the selected period"
        }
        TrendKind::Decreasing => {
            "Your calorie intake has been decreasing over the selected period"
        }
        TrendKind::Stable => "Your calorie intake has been consistent",
    };

    trends.push(Trend {
        kind,
        metric: Nutrient::Calories,
        message: message.to_string(),
    });
    trends
}
