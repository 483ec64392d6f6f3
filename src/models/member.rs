use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input::{self, normalize_label};
use super::from_row::enum_column;
use super::FromSqliteRow;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipType {
    #[default]
    Basic,
    Premium,
    Vip,
}

impl MembershipType {
    pub const ALL: [MembershipType; 3] = [
        MembershipType::Basic,
        MembershipType::Premium,
        MembershipType::Vip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipType::Basic => "basic",
            MembershipType::Premium => "premium",
            MembershipType::Vip => "vip",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MembershipType::Basic => "Basic",
            MembershipType::Premium => "Premium",
            MembershipType::Vip => "VIP",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match normalize_label(s).as_str() {
            "basic" => Some(MembershipType::Basic),
            "premium" => Some(MembershipType::Premium),
            "vip" => Some(MembershipType::Vip),
            _ => None,
        }
    }
}

/// Suggested values offered by both interfaces; any text is accepted.
pub const FITNESS_GOAL_SUGGESTIONS: &[&str] = &["Weight Loss", "Muscle Gain", "Endurance"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub membership_type: MembershipType,
    pub fitness_goal: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl FromSqliteRow for Member {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
            membership_type: enum_column(row, "membership_type", MembershipType::parse)?,
            fitness_goal: row.get("fitness_goal")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            joined_at: row.get("joined_at")?,
        })
    }
}

/// Member fields as typed into a form or at the text prompt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberInput {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub age: String,
    pub membership_type: String,
    #[serde(default)]
    pub fitness_goal: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl MemberInput {
    pub fn from_member(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            age: member.age.to_string(),
            membership_type: member.membership_type.label().to_string(),
            fitness_goal: member.fitness_goal.clone().unwrap_or_default(),
            email: member.email.clone().unwrap_or_default(),
            phone: member.phone.clone().unwrap_or_default(),
        }
    }

    /// Validate everything except the member code, which is checked (or
    /// generated) at registration time.
    pub fn parse(&self) -> Result<MemberDetails> {
        let name = input::required("Name", &self.name)?;
        let age = input::whole_number("Age", &self.age, 1..=120)?;
        let membership_type = MembershipType::parse(&self.membership_type).ok_or_else(|| {
            AppError::validation("Membership type must be one of Basic, Premium, VIP")
        })?;
        let email = input::optional(Some(&self.email));
        if let Some(email) = &email {
            if !email.contains('@') {
                return Err(AppError::validation("Email address is not valid"));
            }
        }

        Ok(MemberDetails {
            name,
            age,
            membership_type,
            fitness_goal: input::optional(Some(&self.fitness_goal)),
            email,
            phone: input::optional(Some(&self.phone)),
        })
    }

    /// The requested member code, `None` when the user left it blank.
    pub fn code(&self) -> Result<Option<String>> {
        if self.id.trim().is_empty() {
            return Ok(None);
        }
        input::code("Member ID", &self.id).map(Some)
    }
}

/// Validated, editable member fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDetails {
    pub name: String,
    pub age: i32,
    pub membership_type: MembershipType,
    pub fitness_goal: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
