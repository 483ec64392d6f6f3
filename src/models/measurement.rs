use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input;
use super::FromSqliteRow;
use crate::error::{AppError, Result};

/// A body measurement: the member's weight and running speed on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: String,
    pub member_id: String,
    pub weight_kg: Option<f64>,
    pub running_speed_kmh: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl FromSqliteRow for Measurement {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            member_id: row.get("member_id")?,
            weight_kg: row.get("weight_kg")?,
            running_speed_kmh: row.get("running_speed_kmh")?,
            recorded_at: row.get("recorded_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementInput {
    pub member_id: String,
    #[serde(default)]
    pub weight_kg: String,
    #[serde(default)]
    pub running_speed_kmh: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub member_id: String,
    pub weight_kg: Option<f64>,
    pub running_speed_kmh: Option<f64>,
}

impl MeasurementInput {
    pub fn parse(&self) -> Result<NewMeasurement> {
        let member_id = input::required("Member", &self.member_id)?;
        let weight_kg = input::optional_positive_decimal("Weight", Some(&self.weight_kg))?;
        let running_speed_kmh =
            input::optional_positive_decimal("Running speed", Some(&self.running_speed_kmh))?;

        if weight_kg.is_none() && running_speed_kmh.is_none() {
            return Err(AppError::validation(
                "Enter a weight or a running speed to record",
            ));
        }

        Ok(NewMeasurement {
            member_id,
            weight_kg,
            running_speed_kmh,
        })
    }
}
