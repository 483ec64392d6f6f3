use chrono::{DateTime, Duration, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input::{self, normalize_label};
use super::from_row::enum_column;
use super::FromSqliteRow;
use crate::error::{AppError, Result};

pub const DEFAULT_DURATION_WEEKS: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    MuscleGain,
    RunningDistance,
    CaloriesToBurn,
}

impl GoalType {
    pub const ALL: [GoalType; 4] = [
        GoalType::WeightLoss,
        GoalType::MuscleGain,
        GoalType::RunningDistance,
        GoalType::CaloriesToBurn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::WeightLoss => "weight_loss",
            GoalType::MuscleGain => "muscle_gain",
            GoalType::RunningDistance => "running_distance",
            GoalType::CaloriesToBurn => "calories_to_burn",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalType::WeightLoss => "Weight Loss",
            GoalType::MuscleGain => "Muscle Gain",
            GoalType::RunningDistance => "Running Distance",
            GoalType::CaloriesToBurn => "Calories to Burn",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            GoalType::WeightLoss | GoalType::MuscleGain => "kg",
            GoalType::RunningDistance => "km",
            GoalType::CaloriesToBurn => "kcal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|t| normalize_label(t.as_str()) == wanted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Achieved,
    Abandoned,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Achieved => "achieved",
            GoalStatus::Abandoned => "abandoned",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Active => "Active",
            GoalStatus::Achieved => "Achieved",
            GoalStatus::Abandoned => "Abandoned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(GoalStatus::Active),
            "achieved" => Some(GoalStatus::Achieved),
            "abandoned" => Some(GoalStatus::Abandoned),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, GoalStatus::Active)
    }

    /// Achieved and Abandoned are terminal; only an active goal may move.
    pub fn can_transition_to(&self, next: GoalStatus) -> bool {
        self.is_active() && !next.is_active()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub member_id: String,
    pub goal_type: GoalType,
    pub target_value: f64,
    pub duration_weeks: i32,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn deadline(&self) -> DateTime<Utc> {
        self.created_at + Duration::weeks(self.duration_weeks as i64)
    }

    pub fn target_display(&self) -> String {
        format!("{:.1} {}", self.target_value, self.goal_type.unit())
    }
}

impl FromSqliteRow for Goal {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            member_id: row.get("member_id")?,
            goal_type: enum_column(row, "goal_type", GoalType::parse)?,
            target_value: row.get("target_value")?,
            duration_weeks: row.get("duration_weeks")?,
            status: enum_column(row, "status", GoalStatus::parse)?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalWithMember {
    pub goal: Goal,
    pub member_name: String,
}

impl FromSqliteRow for GoalWithMember {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            goal: Goal::from_row(row)?,
            member_name: row.get("member_name")?,
        })
    }
}

/// A goal with how far the member has come toward it.
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub member_name: String,
    pub current_value: f64,
}

impl GoalProgress {
    pub fn percent(&self) -> f64 {
        progress_percent(self.current_value, self.goal.target_value)
    }

    pub fn target_reached(&self) -> bool {
        self.current_value >= self.goal.target_value
    }

    pub fn current_display(&self) -> String {
        format!("{:.1} {}", self.current_value, self.goal.goal_type.unit())
    }

    pub fn percent_display(&self) -> String {
        format!("{:.0}%", self.percent())
    }
}

/// Share of `target` covered by `current`, clamped to 0..=100.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalInput {
    pub member_id: String,
    pub goal_type: String,
    pub target_value: String,
    #[serde(default)]
    pub duration_weeks: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub member_id: String,
    pub goal_type: GoalType,
    pub target_value: f64,
    pub duration_weeks: i32,
}

impl GoalInput {
    pub fn parse(&self) -> Result<NewGoal> {
        let member_id = input::required("Member", &self.member_id)?;
        let goal_type = GoalType::parse(&self.goal_type).ok_or_else(|| {
            AppError::validation(
                "Goal type must be one of Weight Loss, Muscle Gain, Running Distance, Calories to Burn",
            )
        })?;
        Ok(NewGoal {
            member_id,
            goal_type,
            target_value: input::positive_decimal("Target value", &self.target_value)?,
            duration_weeks: input::whole_number_or(
                "Duration (weeks)",
                &self.duration_weeks,
                1..=104,
                DEFAULT_DURATION_WEEKS,
            )?,
        })
    }
}
