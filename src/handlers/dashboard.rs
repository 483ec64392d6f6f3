use askama::Template;
use axum::{extract::State, response::Response};

use super::render;
use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::{NutritionLogWithMember, WorkoutLogWithMember};
use crate::reports::RevenueReport;

const RECENT_LIMIT: i64 = 5;

#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    trainers: i64,
    classes: i64,
    workouts: i64,
    revenue: RevenueReport,
    recent_workouts: Vec<WorkoutLogWithMember>,
    recent_meals: Vec<NutritionLogWithMember>,
}

pub async fn index(State(center): State<FitnessCenter>) -> Result<Response> {
    let template = DashboardTemplate {
        trainers: center.trainer_count().await?,
        classes: center.class_count().await?,
        workouts: center.workout_count().await?,
        revenue: center.revenue_report().await?,
        recent_workouts: center.recent_workouts(RECENT_LIMIT).await?,
        recent_meals: center.recent_meals(RECENT_LIMIT).await?,
    };
    render(&template)
}
