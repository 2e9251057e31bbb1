use std::collections::HashMap;

use time::{Date, OffsetDateTime};

use super::types::{DailyTotals, InsightsError, Nutrients};

/// One consumed portion: the food's per-serving nutrient snapshot plus the
/// portion multiplier. Multiplier validity is enforced at the write path
/// (logging subsystem + DB check constraint), never re-checked here.
#[derive(Debug, Clone)]
pub struct MealRecord {
    pub consumed_at: OffsetDateTime,
    pub portion_multiplier: f64,
    pub per_serving: Nutrients,
}

impl MealRecord {
    pub fn actual_nutrients(&self) -> Nutrients {
        self.per_serving.scaled(self.portion_multiplier)
    }
}

/// Buckets meal records into per-day nutrient totals for the inclusive
/// range. Produces exactly one entry per calendar day, ascending, no gaps;
/// days without records appear with `meal_count == 0`.
///
/// Records are bucketed by their UTC calendar date. One pass over the
/// records, one pass over the calendar.
pub fn daily_totals(
    records: &[MealRecord],
    start: Date,
    end: Date,
) -> Result<Vec<DailyTotals>, InsightsError> {
    if start > end {
        return Err(InsightsError::InvalidRange { start, end });
    }

    let mut by_date: HashMap<Date, (Nutrients, u32)> = HashMap::new();
    for record in records {
        let day = record.consumed_at.date();
        if day < start || day > end {
            continue;
        }
        let entry = by_date.entry(day).or_default();
        entry.0.add(&record.actual_nutrients());
        entry.1 += 1;
    }

    let mut days = Vec::with_capacity(((end - start).whole_days() + 1) as usize);
    let mut current = start;
    loop {
        let (totals, meal_count) = by_date.get(&current).copied().unwrap_or_default();
        days.push(DailyTotals {
            date: current,
            totals,
            meal_count,
        });
        if current == end {
            break;
        }
        current = match current.next_day() {
            Some(d) => d,
            None => break,
        };
    }
    Ok(days)
}
