use serde::Serialize;

use super::types::{Nutrient, Nutrients};

const SODIUM_DAILY_LIMIT_MG: f64 = 2300.0;
const FIBER_DAILY_MINIMUM_G: f64 = 25.0;
const PROTEIN_DAILY_MINIMUM_G: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub category: Nutrient,
    pub message: String,
    pub suggestion: String,
}

fn recommendation(
    priority: Priority,
    category: Nutrient,
    message: &str,
    suggestion: &str,
) -> Recommendation {
    Recommendation {
        priority,
        category,
        message: message.to_string(),
        suggestion: suggestion.to_string(),
    }
}

/// Rule-based suggestions evaluated against the daily averages. Rules are
/// independent: every matching rule fires exactly once, in table order.
pub fn recommend(averages: &Nutrients) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if averages.sodium > SODIUM_DAILY_LIMIT_MG {
        recommendations.push(recommendation(
            Priority::High,
            Nutrient::Sodium,
            "Your sodium intake is above the recommended daily limit of 2,300mg",
            "Consider choosing lower-sodium options when planning your meals",
        ));
    }

    if averages.fiber < FIBER_DAILY_MINIMUM_G {
        recommendations.push(recommendation(
            Priority::Medium,
            Nutrient::Fiber,
            "You could benefit from more fiber in your diet",
            "Try adding more whole grains, fruits, and vegetables to your meals",
        ));
    }

    if averages.protein < PROTEIN_DAILY_MINIMUM_G {
        recommendations.push(recommendation(
            Priority::Medium,
            Nutrient::Protein,
            "Your protein intake is on the lower side",
            "Include protein-rich foods like lean meats, legumes, or tofu",
        ));
    }

    recommendations
}
