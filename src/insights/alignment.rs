use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use super::types::{round1, round2, Nutrient, Nutrients};
use crate::goals::repo::NutritionGoal;

const BAND_LOW_PCT: f64 = 90.0;
const BAND_HIGH_PCT: f64 = 110.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    OnTrack,
    NeedsAttention,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalAlignment {
    pub goal_id: Uuid,
    pub target: f64,
    pub actual: f64,
    pub percentage: f64,
    pub deviation: f64,
    pub status: AlignmentStatus,
    pub unit: String,
}

/// Compares average intake against each active goal. A goal is skipped
/// (no entry, no error) when its type is unrecognized or its target is not
/// positive, since no meaningful ratio exists.
///
/// The ±10% band is symmetric: it does not distinguish nutrients one wants
/// to maximize (protein, fiber) from ones to minimize (sodium, sugar).
/// Callers needing directional semantics must layer them on top.
pub fn evaluate(
    averages: &Nutrients,
    goals: &[NutritionGoal],
) -> BTreeMap<Nutrient, GoalAlignment> {
    let mut alignment = BTreeMap::new();

    for goal in goals {
        let Some(nutrient) = Nutrient::parse(&goal.goal_type) else {
            continue;
        };
        if goal.target_value <= 0.0 {
            continue;
        }

        let actual = averages.get(nutrient);
        let percentage = actual / goal.target_value * 100.0;
        // Band check on the raw percentage; rounding is display-only.
        let status = if (BAND_LOW_PCT..=BAND_HIGH_PCT).contains(&percentage) {
            AlignmentStatus::OnTrack
        } else {
            AlignmentStatus::NeedsAttention
        };

        alignment.insert(
            nutrient,
            GoalAlignment {
                goal_id: goal.id,
                target: goal.target_value,
                actual,
                percentage: round1(percentage),
                deviation: round2(actual - goal.target_value),
                status,
                unit: goal.unit.clone(),
            },
        );
    }

    alignment
}
