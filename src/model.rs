//! Backend record mirrors and the per-call report context.
//!
//! The record types in this module mirror the JSON documents served by the
//! backend table API (`tables/patients/{id}`, `tables/diet_plans`,
//! `tables/progress_tracking`).  They deliberately keep every
//! patient-supplied field optional: a report must render with any subset of
//! the data present, substituting [`PLACEHOLDER`] for whatever is missing.
//!
//! [`ReportContext`] bundles the records a single report-generation call
//! works from.  It is constructed once per call by the host and passed into
//! the report builders explicitly; the crate holds no global state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed fallback text rendered for absent optional fields.
pub const PLACEHOLDER: &str = "N/A";

/// A patient record as served by `GET tables/patients/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Backend identifier, e.g. `pat_001`.
    pub id: String,
    /// Full name.
    pub name: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    /// Self-reported gender.
    pub gender: Option<String>,
    /// Height in centimetres.
    pub height: Option<f32>,
    /// Weight in kilograms.
    pub weight: Option<f32>,
    /// Precomputed body-mass index.
    pub bmi: Option<f32>,
    /// Dominant dosha label (Vata, Pitta or Kapha); opaque to this crate.
    pub dominant_dosha: Option<String>,
    /// Dietary preference label, e.g. `Vegetarian`.
    pub dietary_preference: Option<String>,
}

impl Patient {
    /// Creates an otherwise empty record with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Lower-case, dash-separated form of the patient name used in exported
    /// file names.  Falls back to `patient` when the name is absent.
    pub fn file_slug(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join("-"),
            _ => "patient".to_string(),
        }
    }
}

/// An active diet plan as served by `GET tables/diet_plans`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    /// Display name of the plan.
    pub plan_name: Option<String>,
    /// First day the plan applies.
    pub start_date: Option<NaiveDate>,
    /// Plan status, e.g. `Active`.
    pub status: Option<String>,
    /// Dosha the plan is balancing.
    pub dosha_focus: Option<String>,
    /// Thermal preference, e.g. `Cooling`.
    pub thermal_preference: Option<String>,
    /// Daily calorie target in kcal.
    pub target_calories: Option<u32>,
    /// Daily protein target in grams.
    pub target_protein: Option<u32>,
    /// Daily carbohydrate target in grams.
    pub target_carbs: Option<u32>,
    /// Daily fat target in grams.
    pub target_fat: Option<u32>,
    /// Rasa (taste) categories to emphasize.
    #[serde(default)]
    pub primary_rasa: Vec<String>,
    /// Rasa categories to avoid.
    #[serde(default)]
    pub avoid_rasa: Vec<String>,
}

/// A single progress-tracking record as served by
/// `GET tables/progress_tracking`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Day the measurements were taken.
    pub date: NaiveDate,
    /// Weight in kilograms.
    pub weight: f32,
    /// Body-mass index on that day.
    pub bmi: f32,
    /// Precomputed adherence to the diet plan, 0-100.
    pub compliance_percentage: f32,
    /// Self-reported energy level label.
    pub energy_level: Option<String>,
    /// Self-reported sleep quality label.
    pub sleep_quality: Option<String>,
    /// Self-reported stress level label.
    pub stress_level: Option<String>,
}

/// Envelope wrapping list responses from the table API, `{ "data": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableResponse<T> {
    /// The wrapped records; absent or null payloads decode as empty.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// One meal entry of a daily schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Meal slot, e.g. `Breakfast` or `Evening Snack`.
    pub meal_type: String,
    /// Suggested time of day, e.g. `7:30 AM`.
    pub time: String,
    /// Food items with their per-item calorie notes.
    pub items: Vec<String>,
    /// Calorie total for the whole meal.
    pub total_calories: u32,
}

impl Meal {
    /// Creates a meal entry.
    pub fn new(
        meal_type: impl Into<String>,
        time: impl Into<String>,
        items: impl Into<Vec<String>>,
        total_calories: u32,
    ) -> Self {
        Self {
            meal_type: meal_type.into(),
            time: time.into(),
            items: items.into(),
            total_calories,
        }
    }
}

/// The standard daily meal schedule printed when no per-day schedule is
/// available from the backend.
pub fn default_daily_plan() -> Vec<Meal> {
    vec![
        Meal::new(
            "Breakfast",
            "7:30 AM",
            vec![
                "Oats Porridge with Almonds (320 cal)".to_string(),
                "Fresh Cucumber Juice (45 cal)".to_string(),
            ],
            365,
        ),
        Meal::new(
            "Mid-Morning",
            "10:00 AM",
            vec!["Coconut Water (60 cal)".to_string()],
            60,
        ),
        Meal::new(
            "Lunch",
            "12:30 PM",
            vec![
                "Basmati Rice (180 cal)".to_string(),
                "Moong Dal Curry (150 cal)".to_string(),
                "Steamed Vegetables (80 cal)".to_string(),
            ],
            410,
        ),
        Meal::new(
            "Evening Snack",
            "4:00 PM",
            vec!["Herbal Tea with Mint (25 cal)".to_string()],
            25,
        ),
        Meal::new(
            "Dinner",
            "7:30 PM",
            vec![
                "Quinoa Salad (220 cal)".to_string(),
                "Bitter Gourd Sabji (95 cal)".to_string(),
            ],
            315,
        ),
    ]
}

/// The data a single report-generation call works from.
///
/// The host constructs one context per call, filling in whatever records it
/// has (dashboard state or freshly fetched fallbacks).  A fetch failure
/// simply leaves the corresponding field empty; the report builders render
/// placeholders instead of failing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportContext {
    patient: Option<Patient>,
    diet_plan: Option<DietPlan>,
    progress: Vec<ProgressRecord>,
}

impl ReportContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the patient record, if any.
    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    /// Returns the active diet plan, if any.
    pub fn diet_plan(&self) -> Option<&DietPlan> {
        self.diet_plan.as_ref()
    }

    /// Returns the progress history, most entries first or last in any order.
    pub fn progress(&self) -> &[ProgressRecord] {
        &self.progress
    }

    /// Sets the patient record and returns the updated context.
    pub fn with_patient(mut self, patient: impl Into<Option<Patient>>) -> Self {
        self.patient = patient.into();
        self
    }

    /// Sets the diet plan and returns the updated context.
    pub fn with_diet_plan(mut self, diet_plan: impl Into<Option<DietPlan>>) -> Self {
        self.diet_plan = diet_plan.into();
        self
    }

    /// Sets the progress history and returns the updated context.
    pub fn with_progress<I>(mut self, progress: I) -> Self
    where
        I: IntoIterator<Item = ProgressRecord>,
    {
        self.progress = progress.into_iter().collect();
        self
    }
}
