use std::collections::HashMap;

use time::Date;

/// The backward scan never looks further than one year back.
pub const LOOKBACK_DAYS: i64 = 365;

/// Consecutive days, ending today, on which the goal was achieved.
///
/// Walks backward from `today` over a snapshot of per-day achievement
/// outcomes: an achieved day extends the streak, a missed day ends it, and a
/// day with no record ends it too (no record means the evaluation job never
/// scored that day, so the chain is broken). 0 when today itself is missing
/// or missed.
pub fn current_streak(today: Date, achieved_by_date: &HashMap<Date, bool>) -> u32 {
    let mut streak = 0;
    let mut day = today;
    for _ in 0..LOOKBACK_DAYS {
        match achieved_by_date.get(&day) {
            Some(true) => streak += 1,
            Some(false) | None => break,
        }
        day = match day.previous_day() {
            Some(d) => d,
            None => break,
        };
    }
    streak
}
