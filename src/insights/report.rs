use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use super::aggregate::{self, Extreme, MacroDistribution};
use super::alignment::{self, GoalAlignment};
use super::ledger::{self, MealRecord};
use super::recommend::{self, Recommendation};
use super::trends::{self, Trend};
use super::types::{date_fmt, DailyTotals, InsightsError, Nutrient, Nutrients};
use crate::goals::repo::NutritionGoal;

#[derive(Debug, Serialize)]
pub struct DateRange {
    #[serde(with = "date_fmt")]
    pub start: Date,
    #[serde(with = "date_fmt")]
    pub end: Date,
    pub days: i64,
}

/// The full per-user insights payload. No persisted identity: recomputed
/// from the meal-log and goal snapshots on every request.
#[derive(Debug, Serialize)]
pub struct InsightsReport {
    pub date_range: DateRange,
    pub daily_averages: Nutrients,
    pub goal_alignment: BTreeMap<Nutrient, GoalAlignment>,
    pub trends: Vec<Trend>,
    pub recommendations: Vec<Recommendation>,
    pub highest_intake_day: Option<DailyTotals>,
    pub lowest_intake_day: Option<DailyTotals>,
    pub macro_distribution: MacroDistribution,
    pub daily_data: Vec<DailyTotals>,
}

/// Pure function of its inputs: buckets records into the per-day table, then
/// derives averages, alignment, trend, recommendations, extremes and the
/// macro split from it.
pub fn build_report(
    records: &[MealRecord],
    goals: &[NutritionGoal],
    start: Date,
    end: Date,
) -> Result<InsightsReport, InsightsError> {
    let daily_data = ledger::daily_totals(records, start, end)?;
    let daily_averages = aggregate::daily_averages(&daily_data);

    Ok(InsightsReport {
        date_range: DateRange {
            start,
            end,
            days: (end - start).whole_days() + 1,
        },
        goal_alignment: alignment::evaluate(&daily_averages, goals),
        trends: trends::analyze(&daily_data),
        recommendations: recommend::recommend(&daily_averages),
        highest_intake_day: aggregate::extreme_day(&daily_data, Nutrient::Calories, Extreme::Max),
        lowest_intake_day: aggregate::extreme_day(&daily_data, Nutrient::Calories, Extreme::Min),
        macro_distribution: aggregate::macro_distribution(&daily_averages),
        daily_averages,
        daily_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::alignment::AlignmentStatus;
    use crate::insights::recommend::Priority;
    use time::macros::{date, datetime};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn goal(goal_type: &str, target_value: f64, unit: &str) -> NutritionGoal {
        NutritionGoal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            goal_type: goal_type.to_string(),
            target_value,
            target_min: None,
            target_max: None,
            unit: unit.to_string(),
            is_active: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    // 7-day range, one meal logged on day 3 only.
    #[test]
    fn single_data_day_dominates_the_report() {
        let records = vec![MealRecord {
            consumed_at: datetime!(2026-08-03 12:30 UTC),
            portion_multiplier: 1.0,
            per_serving: Nutrients {
                calories: 2000.0,
                protein: 100.0,
                carbs: 250.0,
                fats: 70.0,
                ..Default::default()
            },
        }];

        let report =
            build_report(&records, &[], date!(2026 - 08 - 01), date!(2026 - 08 - 07)).unwrap();

        assert_eq!(report.date_range.days, 7);
        assert_eq!(report.daily_data.len(), 7);

        // Averages over the single data-day equal that day's totals.
        assert_eq!(report.daily_averages.calories, 2000.0);
        assert_eq!(report.daily_averages.protein, 100.0);
        assert_eq!(report.daily_averages.carbs, 250.0);
        assert_eq!(report.daily_averages.fats, 70.0);

        let highest = report.highest_intake_day.unwrap();
        let lowest = report.lowest_intake_day.unwrap();
        assert_eq!(highest.date, date!(2026 - 08 - 03));
        assert_eq!(lowest.date, date!(2026 - 08 - 03));

        // 400 + 1000 + 630 macro kcal via the 4/4/9 weighting.
        assert_eq!(report.macro_distribution.protein, 19.7);
        assert_eq!(report.macro_distribution.carbs, 49.3);
        assert_eq!(report.macro_distribution.fats, 31.0);

        // One data-day: no trend.
        assert!(report.trends.is_empty());
    }

    // Sodium averaging 2300mg against a 2000mg goal: fails the alignment
    // band but does not trip the strictly-greater recommendation threshold.
    #[test]
    fn sodium_at_limit_fails_band_without_recommendation() {
        let records = vec![MealRecord {
            consumed_at: datetime!(2026-08-01 18:00 UTC),
            portion_multiplier: 1.0,
            per_serving: Nutrients {
                sodium: 2300.0,
                fiber: 30.0,
                protein: 80.0,
                ..Default::default()
            },
        }];
        let goals = vec![goal("sodium", 2000.0, "mg")];

        let report =
            build_report(&records, &goals, date!(2026 - 08 - 01), date!(2026 - 08 - 03)).unwrap();

        let entry = &report.goal_alignment[&Nutrient::Sodium];
        assert_eq!(entry.percentage, 115.0);
        assert_eq!(entry.status, AlignmentStatus::NeedsAttention);
        assert!(report
            .recommendations
            .iter()
            .all(|r| r.category != Nutrient::Sodium));
    }

    #[test]
    fn sodium_above_limit_gets_high_priority_recommendation() {
        let records = vec![MealRecord {
            consumed_at: datetime!(2026-08-01 18:00 UTC),
            portion_multiplier: 1.0,
            per_serving: Nutrients {
                sodium: 2500.0,
                fiber: 30.0,
                protein: 80.0,
                ..Default::default()
            },
        }];

        let report =
            build_report(&records, &[], date!(2026 - 08 - 01), date!(2026 - 08 - 01)).unwrap();

        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].category, Nutrient::Sodium);
        assert_eq!(report.recommendations[0].priority, Priority::High);
    }

    // An empty range still yields a complete, well-typed report.
    #[test]
    fn empty_range_yields_zeroed_report_not_error() {
        let goals = vec![goal("calories", 2200.0, "kcal"), goal("protein", 120.0, "g")];

        let report =
            build_report(&[], &goals, date!(2026 - 08 - 01), date!(2026 - 08 - 07)).unwrap();

        assert_eq!(report.daily_averages, Nutrients::default());
        assert_eq!(report.macro_distribution, MacroDistribution::default());
        assert!(report.trends.is_empty());
        assert!(report.highest_intake_day.is_none());
        assert!(report.lowest_intake_day.is_none());
        assert_eq!(report.daily_data.len(), 7);

        // Goals with positive targets still get alignment entries.
        assert_eq!(report.goal_alignment.len(), 2);
        for entry in report.goal_alignment.values() {
            assert_eq!(entry.actual, 0.0);
            assert_eq!(entry.status, AlignmentStatus::NeedsAttention);
        }
    }

    #[test]
    fn inverted_range_is_an_error() {
        let err = build_report(&[], &[], date!(2026 - 08 - 07), date!(2026 - 08 - 01)).unwrap_err();
        assert!(matches!(err, InsightsError::InvalidRange { .. }));
    }

    #[test]
    fn report_serializes_with_expected_shape() {
        let report =
            build_report(&[], &[], date!(2026 - 08 - 01), date!(2026 - 08 - 02)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["date_range"]["start"], "2026-08-01");
        assert_eq!(json["date_range"]["days"], 2);
        assert_eq!(json["daily_averages"]["calories"], 0.0);
        assert!(json["highest_intake_day"].is_null());
        assert_eq!(json["daily_data"].as_array().unwrap().len(), 2);
        assert_eq!(json["macro_distribution"]["protein"], 0.0);
    }
}
