use serde::Serialize;

use super::types::{round1, round2, DailyTotals, Nutrient, Nutrients};

const PROTEIN_KCAL_PER_G: f64 = 4.0;
const CARBS_KCAL_PER_G: f64 = 4.0;
const FATS_KCAL_PER_G: f64 = 9.0;

/// Average intake per nutrient across data-days only, rounded to two
/// decimals. With zero data-days every average is 0 — a "nothing logged yet"
/// default, not an error.
pub fn daily_averages(days: &[DailyTotals]) -> Nutrients {
    let mut sum = Nutrients::default();
    let mut data_days = 0u32;
    for day in days {
        if day.meal_count > 0 {
            sum.add(&day.totals);
            data_days += 1;
        }
    }
    if data_days == 0 {
        return Nutrients::default();
    }
    sum.map(|v| round2(v / f64::from(data_days)))
}

/// Share of macronutrient calories contributed by protein, carbs and fats,
/// in percent rounded to one decimal. All zero when no macros were consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroDistribution {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

pub fn macro_distribution(averages: &Nutrients) -> MacroDistribution {
    let protein = averages.protein * PROTEIN_KCAL_PER_G;
    let carbs = averages.carbs * CARBS_KCAL_PER_G;
    let fats = averages.fats * FATS_KCAL_PER_G;

    let total = protein + carbs + fats;
    if total == 0.0 {
        return MacroDistribution::default();
    }

    MacroDistribution {
        protein: round1(protein / total * 100.0),
        carbs: round1(carbs / total * 100.0),
        fats: round1(fats / total * 100.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// The data-day with the highest (or lowest) value of `metric`. Ties keep
/// the earliest day; `None` when the range has no data-days.
pub fn extreme_day(
    days: &[DailyTotals],
    metric: Nutrient,
    extreme: Extreme,
) -> Option<DailyTotals> {
    let mut best: Option<DailyTotals> = None;
    for day in days.iter().filter(|d| d.meal_count > 0) {
        let value = day.totals.get(metric);
        let better = match &best {
            None => true,
            Some(b) => match extreme {
                Extreme::Max => value > b.totals.get(metric),
                Extreme::Min => value < b.totals.get(metric),
            },
        };
        if better {
            best = Some(*day);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn day(date: time::Date, calories: f64, meal_count: u32) -> DailyTotals {
        DailyTotals {
            date,
            totals: Nutrients {
                calories,
                ..Default::default()
            },
            meal_count,
        }
    }

    #[test]
    fn averages_skip_no_data_days() {
        // One data-day among nine empty ones: the average IS that day.
        let mut days = vec![day(date!(2026 - 08 - 01), 0.0, 0); 9];
        days.push(DailyTotals {
            date: date!(2026 - 08 - 10),
            totals: Nutrients {
                calories: 2000.0,
                protein: 100.0,
                sodium: 1500.0,
                ..Default::default()
            },
            meal_count: 2,
        });

        let avg = daily_averages(&days);
        assert_eq!(avg.calories, 2000.0);
        assert_eq!(avg.protein, 100.0);
        assert_eq!(avg.sodium, 1500.0);
    }

    #[test]
    fn averages_divide_by_data_day_count() {
        let days = vec![
            day(date!(2026 - 08 - 01), 1000.0, 1),
            day(date!(2026 - 08 - 02), 0.0, 0),
            day(date!(2026 - 08 - 03), 2000.0, 3),
        ];
        assert_eq!(daily_averages(&days).calories, 1500.0);
    }

    #[test]
    fn averages_default_to_zero_without_data() {
        let days = vec![day(date!(2026 - 08 - 01), 0.0, 0)];
        assert_eq!(daily_averages(&days), Nutrients::default());
    }

    #[test]
    fn averages_round_to_two_decimals() {
        let days = vec![
            day(date!(2026 - 08 - 01), 100.0, 1),
            day(date!(2026 - 08 - 02), 101.0, 1),
            day(date!(2026 - 08 - 03), 101.0, 1),
        ];
        assert_eq!(daily_averages(&days).calories, 100.67);
    }

    #[test]
    fn macro_shares_sum_to_hundred() {
        let averages = Nutrients {
            protein: 100.0,
            carbs: 250.0,
            fats: 70.0,
            ..Default::default()
        };
        let dist = macro_distribution(&averages);
        // 400 / 1000 / 630 kcal out of 2030 total
        assert_eq!(dist.protein, 19.7);
        assert_eq!(dist.carbs, 49.3);
        assert_eq!(dist.fats, 31.0);
        let sum = dist.protein + dist.carbs + dist.fats;
        assert!((sum - 100.0).abs() <= 0.1, "shares sum to {sum}");
    }

    #[test]
    fn macro_shares_are_zero_when_nothing_consumed() {
        let dist = macro_distribution(&Nutrients::default());
        assert_eq!(dist, MacroDistribution::default());
    }

    #[test]
    fn extreme_day_picks_max_and_min_among_data_days() {
        let days = vec![
            day(date!(2026 - 08 - 01), 0.0, 0), // empty day never wins min
            day(date!(2026 - 08 - 02), 1800.0, 2),
            day(date!(2026 - 08 - 03), 2400.0, 3),
            day(date!(2026 - 08 - 04), 1200.0, 1),
        ];
        let highest = extreme_day(&days, Nutrient::Calories, Extreme::Max).unwrap();
        assert_eq!(highest.date, date!(2026 - 08 - 03));
        let lowest = extreme_day(&days, Nutrient::Calories, Extreme::Min).unwrap();
        assert_eq!(lowest.date, date!(2026 - 08 - 04));
    }

    #[test]
    fn extreme_day_ties_resolve_to_earliest_date() {
        let days = vec![
            day(date!(2026 - 08 - 01), 2000.0, 1),
            day(date!(2026 - 08 - 02), 2000.0, 1),
        ];
        let highest = extreme_day(&days, Nutrient::Calories, Extreme::Max).unwrap();
        assert_eq!(highest.date, date!(2026 - 08 - 01));
        let lowest = extreme_day(&days, Nutrient::Calories, Extreme::Min).unwrap();
        assert_eq!(lowest.date, date!(2026 - 08 - 01));
    }

    #[test]
    fn extreme_day_is_none_without_data_days() {
        let days = vec![day(date!(2026 - 08 - 01), 0.0, 0)];
        assert_eq!(extreme_day(&days, Nutrient::Calories, Extreme::Max), None);
    }
}
