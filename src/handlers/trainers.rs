use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::{render, render_error};
use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::{ClassOverview, Trainer, TrainerInput};

#[derive(Template)]
#[template(path = "trainers/list.html")]
struct TrainersListTemplate {
    trainers: Vec<Trainer>,
    form: TrainerInput,
    error: String,
}

#[derive(Template)]
#[template(path = "trainers/show.html")]
struct TrainerScheduleTemplate {
    trainer: Trainer,
    classes: Vec<ClassOverview>,
}

pub async fn list(State(center): State<FitnessCenter>) -> Result<Response> {
    render(&TrainersListTemplate {
        trainers: center.list_trainers().await?,
        form: TrainerInput::default(),
        error: String::new(),
    })
}

pub async fn create(
    State(center): State<FitnessCenter>,
    Form(form): Form<TrainerInput>,
) -> Result<Response> {
    match center.add_trainer(&form).await {
        Ok(trainer) => Ok(Redirect::to(&format!("/trainers/{}", trainer.id)).into_response()),
        Err(e) if e.is_user_facing() => {
            let page = TrainersListTemplate {
                trainers: center.list_trainers().await?,
                form,
                error: e.to_string(),
            };
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn show(State(center): State<FitnessCenter>, Path(id): Path<String>) -> Result<Response> {
    let (trainer, classes) = center.trainer_schedule(&id).await?;
    render(&TrainerScheduleTemplate { trainer, classes })
}

pub async fn delete(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.remove_trainer(&id).await?;
    Ok(Redirect::to("/trainers").into_response())
}
