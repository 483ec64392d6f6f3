use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Measurement, NutritionLog, WorkoutLog};

/// One line of a member's progress timeline.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProgressEntry {
    Workout(WorkoutLog),
    Meal(NutritionLog),
    Measurement(Measurement),
}

impl ProgressEntry {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ProgressEntry::Workout(w) => w.logged_at,
            ProgressEntry::Meal(m) => m.logged_at,
            ProgressEntry::Measurement(m) => m.recorded_at,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProgressEntry::Workout(_) => "Workout",
            ProgressEntry::Meal(_) => "Meal",
            ProgressEntry::Measurement(_) => "Measurement",
        }
    }

    /// `(field, value)` pairs describing the entry.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        match self {
            ProgressEntry::Workout(w) => {
                let mut fields = vec![
                    ("exercise_type", w.exercise_type.clone()),
                    ("duration", format!("{} min", w.duration_minutes)),
                    ("calories", w.calories_burned.to_string()),
                ];
                if let Some(distance) = w.distance_km {
                    fields.push(("distance", format!("{distance:.2} km")));
                }
                if let Some(notes) = &w.notes {
                    fields.push(("notes", notes.clone()));
                }
                fields
            }
            ProgressEntry::Meal(m) => vec![
                ("meal_type", m.meal_type.label().to_string()),
                ("food_items", m.food_items.clone()),
                ("calories", m.calories.to_string()),
                ("protein", format!("{} g", m.protein_g)),
                ("carbs", format!("{} g", m.carbs_g)),
                ("fat", format!("{} g", m.fat_g)),
            ],
            ProgressEntry::Measurement(m) => {
                let mut fields = Vec::new();
                if let Some(weight) = m.weight_kg {
                    fields.push(("weight", format!("{weight:.1} kg")));
                }
                if let Some(speed) = m.running_speed_kmh {
                    fields.push(("running_speed", format!("{speed:.1} km/h")));
                }
                fields
            }
        }
    }
}

/// Merge the three record kinds into one list, oldest first.
pub fn build_timeline(
    workouts: Vec<WorkoutLog>,
    meals: Vec<NutritionLog>,
    measurements: Vec<Measurement>,
) -> Vec<ProgressEntry> {
    let mut entries: Vec<ProgressEntry> = workouts
        .into_iter()
        .map(ProgressEntry::Workout)
        .chain(meals.into_iter().map(ProgressEntry::Meal))
        .chain(measurements.into_iter().map(ProgressEntry::Measurement))
        .collect();
    entries.sort_by_key(ProgressEntry::timestamp);
    entries
}
