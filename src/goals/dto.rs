use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::NutritionGoal;
use crate::insights::types::Nutrient;

#[derive(Debug, Deserialize)]
pub struct CreateGoalBody {
    pub goal_type: Nutrient,
    pub target_value: f64,
    pub target_min: Option<f64>,
    pub target_max: Option<f64>,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "g".to_string()
}

#[derive(Debug, Serialize)]
pub struct GoalResponse {
    pub id: Uuid,
    pub goal_type: String,
    pub target_value: f64,
    pub target_min: Option<f64>,
    pub target_max: Option<f64>,
    pub unit: String,
    pub is_active: bool,
}

impl From<NutritionGoal> for GoalResponse {
    fn from(g: NutritionGoal) -> Self {
        GoalResponse {
            id: g.id,
            goal_type: g.goal_type,
            target_value: g.target_value,
            target_min: g.target_min,
            target_max: g.target_max,
            unit: g.unit,
            is_active: g.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GoalWithStreak {
    #[serde(flatten)]
    pub goal: GoalResponse,
    pub current_streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_accepts_known_goal_types_only() {
        let body: CreateGoalBody =
            serde_json::from_str(r#"{"goal_type": "sodium", "target_value": 2000.0, "unit": "mg"}"#)
                .unwrap();
        assert_eq!(body.goal_type, Nutrient::Sodium);
        assert_eq!(body.unit, "mg");

        let err = serde_json::from_str::<CreateGoalBody>(
            r#"{"goal_type": "vitamin_c", "target_value": 60.0}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn unit_defaults_to_grams() {
        let body: CreateGoalBody =
            serde_json::from_str(r#"{"goal_type": "protein", "target_value": 120.0}"#).unwrap();
        assert_eq!(body.unit, "g");
    }
}
