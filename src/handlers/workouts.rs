use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use super::{render, render_error};
use crate::center::FitnessCenter;
use crate::error::{AppError, Result};
use crate::models::workout_log::EXERCISE_TYPES;
use crate::models::{Member, WorkoutInput, WorkoutLog, WorkoutLogWithMember};

const RECENT_LIMIT: i64 = 20;

#[derive(Template)]
#[template(path = "workouts/list.html")]
struct WorkoutsListTemplate {
    workouts: Vec<WorkoutLogWithMember>,
    members: Vec<Member>,
    exercise_types: &'static [&'static str],
    form: WorkoutInput,
    error: String,
}

#[derive(Template)]
#[template(path = "workouts/edit.html")]
struct EditWorkoutTemplate {
    workout: WorkoutLog,
    member_name: String,
    exercise_types: &'static [&'static str],
    form: WorkoutInput,
    error: String,
}

async fn list_page(
    center: &FitnessCenter,
    form: WorkoutInput,
    error: String,
) -> Result<WorkoutsListTemplate> {
    Ok(WorkoutsListTemplate {
        workouts: center.recent_workouts(RECENT_LIMIT).await?,
        members: center.list_members().await?,
        exercise_types: EXERCISE_TYPES,
        form,
        error,
    })
}

async fn edit_page_for(
    center: &FitnessCenter,
    workout: WorkoutLog,
    form: WorkoutInput,
    error: String,
) -> Result<EditWorkoutTemplate> {
    let member_name = center.find_member(&workout.member_id).await?.name;
    Ok(EditWorkoutTemplate {
        workout,
        member_name,
        exercise_types: EXERCISE_TYPES,
        form,
        error,
    })
}

pub async fn list(State(center): State<FitnessCenter>) -> Result<Response> {
    let form = WorkoutInput {
        date: Utc::now().date_naive().to_string(),
        ..Default::default()
    };
    let page = list_page(&center, form, String::new()).await?;
    render(&page)
}

pub async fn create(
    State(center): State<FitnessCenter>,
    Form(form): Form<WorkoutInput>,
) -> Result<Response> {
    match center.log_workout(&form).await {
        Ok(_) => Ok(Redirect::to("/workouts").into_response()),
        Err(e) if e.is_user_facing() => {
            let page = list_page(&center, form, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn edit_page(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    let workout = center.find_workout(&id).await?;
    let form = WorkoutInput::from_log(&workout);
    let page = edit_page_for(&center, workout, form, String::new()).await?;
    render(&page)
}

pub async fn update(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
    Form(form): Form<WorkoutInput>,
) -> Result<Response> {
    match center.correct_workout(&id, &form).await {
        Ok(_) => Ok(Redirect::to("/workouts").into_response()),
        Err(e @ AppError::NotFound(_)) => Err(e),
        Err(e) if e.is_user_facing() => {
            let workout = center.find_workout(&id).await?;
            let page = edit_page_for(&center, workout, form, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn delete(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.delete_workout(&id).await?;
    Ok(Redirect::to("/workouts").into_response())
}
