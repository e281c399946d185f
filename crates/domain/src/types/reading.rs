//! Glucose reading types
//!
//! One immutable measurement event. Readings are appended by the
//! measurement-entry flows (manual entry, file import, device pairing) with
//! caller-assigned ids and never updated or deleted afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One glucose measurement event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseReading {
    /// Unique identifier, assigned by the caller (not by the store)
    pub id: String,
    /// Sortable ISO-8601 timestamp of when the value was measured, distinct
    /// from insertion time
    pub measurement_time: String,
    /// Glucose level in mg/dL, non-negative
    pub glucose_level: f64,
    pub meal_context: Option<MealContext>,
    /// Free-text duration descriptor ("2h after lunch")
    pub time_since_meal: Option<String>,
    pub notes: Option<String>,
}

impl GlucoseReading {
    /// New reading with only the mandatory fields set.
    pub fn new(
        id: impl Into<String>,
        measurement_time: impl Into<String>,
        glucose_level: f64,
    ) -> Self {
        Self {
            id: id.into(),
            measurement_time: measurement_time.into(),
            glucose_level,
            meal_context: None,
            time_since_meal: None,
            notes: None,
        }
    }
}

/// Meal context of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealContext {
    Fasting,
    BeforeMeal,
    AfterMeal,
    Bedtime,
}

impl MealContext {
    /// Stable textual form used in the database column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fasting => "fasting",
            Self::BeforeMeal => "before_meal",
            Self::AfterMeal => "after_meal",
            Self::Bedtime => "bedtime",
        }
    }
}

impl fmt::Display for MealContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fasting" => Ok(Self::Fasting),
            "before_meal" => Ok(Self::BeforeMeal),
            "after_meal" => Ok(Self::AfterMeal),
            "bedtime" => Ok(Self::Bedtime),
            _ => Err(format!("invalid MealContext: {s}")),
        }
    }
}
