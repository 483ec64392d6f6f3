use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input;
use super::FromSqliteRow;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: String,
    pub name: String,
    pub specialization: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Trainer {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            specialization: row.get("specialization")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainerInput {
    pub id: String,
    pub name: String,
    pub specialization: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTrainer {
    pub id: String,
    pub name: String,
    pub specialization: String,
}

impl TrainerInput {
    pub fn parse(&self) -> Result<NewTrainer> {
        Ok(NewTrainer {
            id: input::code("Trainer ID", &self.id)?,
            name: input::required("Name", &self.name)?,
            specialization: input::required("Specialization", &self.specialization)?,
        })
    }
}
