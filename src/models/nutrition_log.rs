use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::input::{self, normalize_label};
use super::workout_log::parse_optional_date;
use super::from_row::enum_column;
use super::FromSqliteRow;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let wanted = normalize_label(s);
        Self::ALL.into_iter().find(|m| m.as_str() == wanted)
    }
}

pub const NUTRITION_TIPS: &[&str] = &[
    "Stay hydrated! Aim for at least 8 glasses of water daily.",
    "Include protein in every meal to support muscle recovery.",
    "Eat a variety of colorful vegetables to ensure you get different nutrients.",
    "Limit processed foods and focus on whole, natural foods.",
    "Don't skip meals, especially breakfast!",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionLog {
    pub id: String,
    pub member_id: String,
    pub meal_type: MealType,
    pub food_items: String,
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
    pub logged_at: DateTime<Utc>,
}

impl FromSqliteRow for NutritionLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            member_id: row.get("member_id")?,
            meal_type: enum_column(row, "meal_type", MealType::parse)?,
            food_items: row.get("food_items")?,
            calories: row.get("calories")?,
            protein_g: row.get("protein_g")?,
            carbs_g: row.get("carbs_g")?,
            fat_g: row.get("fat_g")?,
            logged_at: row.get("logged_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionLogWithMember {
    pub log: NutritionLog,
    pub member_name: String,
}

impl FromSqliteRow for NutritionLogWithMember {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            log: NutritionLog::from_row(row)?,
            member_name: row.get("member_name")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealInput {
    pub member_id: String,
    pub meal_type: String,
    pub food_items: String,
    pub calories: String,
    #[serde(default)]
    pub protein_g: String,
    #[serde(default)]
    pub carbs_g: String,
    #[serde(default)]
    pub fat_g: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNutritionLog {
    pub member_id: String,
    pub meal_type: MealType,
    pub food_items: String,
    pub calories: i32,
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
    pub eaten_on: Option<chrono::NaiveDate>,
}

impl MealInput {
    pub fn parse(&self) -> Result<NewNutritionLog> {
        let member_id = input::required("Member", &self.member_id)?;
        let meal_type = MealType::parse(&self.meal_type).ok_or_else(|| {
            AppError::validation("Meal type must be one of Breakfast, Lunch, Dinner, Snack")
        })?;
        Ok(NewNutritionLog {
            member_id,
            meal_type,
            food_items: input::required("Food items", &self.food_items)?,
            calories: input::whole_number_or("Calories", &self.calories, 0..=20_000, 0)?,
            protein_g: input::whole_number_or("Protein", &self.protein_g, 0..=2_000, 0)?,
            carbs_g: input::whole_number_or("Carbohydrates", &self.carbs_g, 0..=2_000, 0)?,
            fat_g: input::whole_number_or("Fat", &self.fat_g, 0..=2_000, 0)?,
            eaten_on: parse_optional_date(&self.date)?,
        })
    }
}
