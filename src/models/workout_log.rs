use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input;
use super::FromSqliteRow;
use crate::error::{AppError, Result};

/// Exercise types offered by both interfaces; any text is accepted.
pub const EXERCISE_TYPES: &[&str] = &["Running", "Weight Lifting", "Yoga", "Swimming", "Cycling"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    pub id: String,
    pub member_id: String,
    pub exercise_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub distance_km: Option<f64>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkoutLog {
    pub fn is_corrected(&self) -> bool {
        self.updated_at.is_some()
    }

    pub fn distance_display(&self) -> String {
        self.distance_km
            .map(|km| format!("{km:.2} km"))
            .unwrap_or_default()
    }
}

impl FromSqliteRow for WorkoutLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            member_id: row.get("member_id")?,
            exercise_type: row.get("exercise_type")?,
            duration_minutes: row.get("duration_minutes")?,
            calories_burned: row.get("calories_burned")?,
            distance_km: row.get("distance_km")?,
            notes: row.get("notes")?,
            logged_at: row.get("logged_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutLogWithMember {
    pub log: WorkoutLog,
    pub member_name: String,
}

impl FromSqliteRow for WorkoutLogWithMember {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            log: WorkoutLog::from_row(row)?,
            member_name: row.get("member_name")?,
        })
    }
}

/// Workout totals for one member over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberWorkoutSummary {
    pub member_id: String,
    pub member_name: String,
    pub workouts: i64,
    pub total_minutes: i64,
    pub total_calories: i64,
}

impl FromSqliteRow for MemberWorkoutSummary {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            member_id: row.get("member_id")?,
            member_name: row.get("member_name")?,
            workouts: row.get("workouts")?,
            total_minutes: row.get("total_minutes")?,
            total_calories: row.get("total_calories")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutInput {
    pub member_id: String,
    pub exercise_type: String,
    pub duration_minutes: String,
    pub calories_burned: String,
    #[serde(default)]
    pub distance_km: String,
    #[serde(default)]
    pub notes: String,
    /// Day the workout took place (`YYYY-MM-DD`); blank means now.
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutLog {
    pub member_id: String,
    pub exercise_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub distance_km: Option<f64>,
    pub notes: Option<String>,
    pub performed_on: Option<NaiveDate>,
}

impl WorkoutInput {
    pub fn from_log(log: &WorkoutLog) -> Self {
        Self {
            member_id: log.member_id.clone(),
            exercise_type: log.exercise_type.clone(),
            duration_minutes: log.duration_minutes.to_string(),
            calories_burned: log.calories_burned.to_string(),
            distance_km: log.distance_km.map(|d| d.to_string()).unwrap_or_default(),
            notes: log.notes.clone().unwrap_or_default(),
            date: log.logged_at.date_naive().to_string(),
        }
    }

    pub fn parse(&self) -> Result<NewWorkoutLog> {
        Ok(NewWorkoutLog {
            member_id: input::required("Member", &self.member_id)?,
            exercise_type: input::required("Exercise type", &self.exercise_type)?,
            duration_minutes: input::whole_number("Duration", &self.duration_minutes, 0..=1440)?,
            calories_burned: input::whole_number_or(
                "Calories burned",
                &self.calories_burned,
                0..=20_000,
                0,
            )?,
            distance_km: input::optional_positive_decimal("Distance", Some(&self.distance_km))?,
            notes: input::optional(Some(&self.notes)),
            performed_on: parse_optional_date(&self.date)?,
        })
    }
}

/// Parse a `YYYY-MM-DD` date; blank means `None`.
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::validation("Date must be in YYYY-MM-DD format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> WorkoutInput {
        WorkoutInput {
            member_id: "M001".to_string(),
            exercise_type: "Running".to_string(),
            duration_minutes: "45".to_string(),
            calories_burned: "400".to_string(),
            distance_km: "7.5".to_string(),
            notes: String::new(),
            date: String::new(),
        }
    }

    #[test]
    fn test_parse_valid_workout() {
        let workout = valid_input().parse().unwrap();

        assert_eq!(workout.duration_minutes, 45);
        assert_eq!(workout.calories_burned, 400);
        assert_eq!(workout.distance_km, Some(7.5));
        assert_eq!(workout.notes, None);
        assert_eq!(workout.performed_on, None);
    }

    #[test]
    fn test_parse_blank_calories_defaults_to_zero() {
        let input = WorkoutInput {
            calories_burned: String::new(),
            ..valid_input()
        };
        assert_eq!(input.parse().unwrap().calories_burned, 0);
    }

    #[test]
    fn test_parse_rejects_missing_exercise_type() {
        let input = WorkoutInput {
            exercise_type: String::new(),
            ..valid_input()
        };
        assert!(matches!(input.parse(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_rejects_negative_duration() {
        let input = WorkoutInput {
            duration_minutes: "-5".to_string(),
            ..valid_input()
        };
        assert!(input.parse().is_err());
    }

    #[test]
    fn test_parse_date() {
        let input = WorkoutInput {
            date: "2026-03-01".to_string(),
            ..valid_input()
        };
        assert_eq!(
            input.parse().unwrap().performed_on,
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert!(parse_optional_date("03/01/2026").is_err());
    }
}
