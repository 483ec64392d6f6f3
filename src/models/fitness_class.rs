use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input;
use super::FromSqliteRow;
use crate::error::Result;

pub const MAX_CAPACITY: i64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessClass {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub schedule: String,
    pub trainer_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for FitnessClass {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            capacity: row.get("capacity")?,
            schedule: row.get("schedule")?,
            trainer_id: row.get("trainer_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A class together with its trainer's name and current enrollment.
#[derive(Debug, Clone, Serialize)]
pub struct ClassOverview {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub schedule: String,
    pub trainer_id: Option<String>,
    pub trainer_name: Option<String>,
    pub enrolled: i64,
}

impl ClassOverview {
    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }

    pub fn spots_left(&self) -> i64 {
        (self.capacity - self.enrolled).max(0)
    }
}

impl FromSqliteRow for ClassOverview {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            capacity: row.get("capacity")?,
            schedule: row.get("schedule")?,
            trainer_id: row.get("trainer_id")?,
            trainer_name: row.get("trainer_name")?,
            enrolled: row.get("enrolled")?,
        })
    }
}

/// A member on a class roster.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub class_id: String,
    pub member_id: String,
    pub member_name: String,
    pub booked_at: DateTime<Utc>,
}

impl FromSqliteRow for Booking {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            class_id: row.get("class_id")?,
            member_id: row.get("member_id")?,
            member_name: row.get("member_name")?,
            booked_at: row.get("booked_at")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    Booked,
    AlreadyBooked,
    ClassFull,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassInput {
    pub id: String,
    pub name: String,
    pub capacity: String,
    pub schedule: String,
    #[serde(default)]
    pub trainer_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFitnessClass {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub schedule: String,
    pub trainer_id: Option<String>,
}

impl ClassInput {
    pub fn parse(&self) -> Result<NewFitnessClass> {
        Ok(NewFitnessClass {
            id: input::code("Class ID", &self.id)?,
            name: input::required("Class name", &self.name)?,
            capacity: input::whole_number("Capacity", &self.capacity, 1..=MAX_CAPACITY)?,
            schedule: input::required("Schedule", &self.schedule)?,
            trainer_id: input::optional(Some(&self.trainer_id)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_input() {
        let input = ClassInput {
            id: "C001".to_string(),
            name: "Morning Yoga".to_string(),
            capacity: "15".to_string(),
            schedule: "Monday, 8:00 AM".to_string(),
            trainer_id: String::new(),
        };
        let class = input.parse().unwrap();

        assert_eq!(class.capacity, 15);
        assert_eq!(class.trainer_id, None);
    }

    #[test]
    fn test_parse_rejects_zero_capacity() {
        let input = ClassInput {
            id: "C001".to_string(),
            name: "Morning Yoga".to_string(),
            capacity: "0".to_string(),
            schedule: "Monday".to_string(),
            trainer_id: String::new(),
        };
        assert!(input.parse().is_err());
    }

    #[test]
    fn test_overview_spots_left() {
        let overview = ClassOverview {
            id: "C001".to_string(),
            name: "HIIT".to_string(),
            capacity: 2,
            schedule: "Tuesday".to_string(),
            trainer_id: None,
            trainer_name: None,
            enrolled: 2,
        };
        assert!(overview.is_full());
        assert_eq!(overview.spots_left(), 0);
    }
}
