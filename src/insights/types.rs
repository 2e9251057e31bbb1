use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

/// Errors surfaced by the report computation itself. Collaborator failures
/// (database, etc.) propagate as `anyhow::Error` from the repo layer.
#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("invalid date range: {start} is after {end}")]
    InvalidRange { start: Date, end: Date },
}

/// The nine tracked nutrients. The goal-type vocabulary is the same set,
/// so this enum doubles as the key for goal alignment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fats,
    Sodium,
    Fiber,
    Sugar,
    Calcium,
    Iron,
}

impl Nutrient {
    pub fn as_str(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fats => "fats",
            Nutrient::Sodium => "sodium",
            Nutrient::Fiber => "fiber",
            Nutrient::Sugar => "sugar",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
        }
    }

    /// Parses a stored goal-type string. Unknown strings yield `None`; the
    /// caller skips such goals rather than failing the whole report.
    pub fn parse(s: &str) -> Option<Nutrient> {
        match s {
            "calories" => Some(Nutrient::Calories),
            "protein" => Some(Nutrient::Protein),
            "carbs" => Some(Nutrient::Carbs),
            "fats" => Some(Nutrient::Fats),
            "sodium" => Some(Nutrient::Sodium),
            "fiber" => Some(Nutrient::Fiber),
            "sugar" => Some(Nutrient::Sugar),
            "calcium" => Some(Nutrient::Calcium),
            "iron" => Some(Nutrient::Iron),
            _ => None,
        }
    }
}

/// Per-day (or per-serving) amounts of every tracked nutrient.
/// Grams for macros, mg for sodium/calcium/iron, kcal for calories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub sodium: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub calcium: f64,
    pub iron: f64,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fats => self.fats,
            Nutrient::Sodium => self.sodium,
            Nutrient::Fiber => self.fiber,
            Nutrient::Sugar => self.sugar,
            Nutrient::Calcium => self.calcium,
            Nutrient::Iron => self.iron,
        }
    }

    pub fn add(&mut self, other: &Nutrients) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fats += other.fats;
        self.sodium += other.sodium;
        self.fiber += other.fiber;
        self.sugar += other.sugar;
        self.calcium += other.calcium;
        self.iron += other.iron;
    }

    pub fn scaled(&self, factor: f64) -> Nutrients {
        self.map(|v| v * factor)
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Nutrients {
        Nutrients {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fats: f(self.fats),
            sodium: f(self.sodium),
            fiber: f(self.fiber),
            sugar: f(self.sugar),
            calcium: f(self.calcium),
            iron: f(self.iron),
        }
    }
}

/// Nutrient sums for one calendar date. `meal_count == 0` marks a no-data
/// day: it stays in the per-day table but is excluded from averages,
/// extremes, and trends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotals {
    #[serde(with = "date_fmt")]
    pub date: Date,
    #[serde(flatten)]
    pub totals: Nutrients,
    pub meal_count: u32,
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// `YYYY-MM-DD` serialization for `time::Date` fields.
pub(crate) mod date_fmt {
    use serde::Serializer;
    use time::macros::format_description;
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let out = date
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;
        s.serialize_str(&out)
    }
}
