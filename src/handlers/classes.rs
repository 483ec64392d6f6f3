use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::{render, render_error};
use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::{Booking, ClassInput, ClassOverview, Member, Trainer};

#[derive(Template)]
#[template(path = "classes/list.html")]
struct ClassesListTemplate {
    classes: Vec<ClassOverview>,
    trainers: Vec<Trainer>,
    form: ClassInput,
    error: String,
}

#[derive(Template)]
#[template(path = "classes/show.html")]
struct ShowClassTemplate {
    class: ClassOverview,
    roster: Vec<Booking>,
    members: Vec<Member>,
    trainers: Vec<Trainer>,
    error: String,
}

#[derive(Deserialize)]
pub struct BookingForm {
    member_id: String,
}

#[derive(Deserialize)]
pub struct TrainerForm {
    #[serde(default)]
    trainer_id: String,
}

async fn list_page(
    center: &FitnessCenter,
    form: ClassInput,
    error: String,
) -> Result<ClassesListTemplate> {
    Ok(ClassesListTemplate {
        classes: center.list_classes().await?,
        trainers: center.list_trainers().await?,
        form,
        error,
    })
}

async fn show_page(center: &FitnessCenter, id: &str, error: String) -> Result<ShowClassTemplate> {
    let (class, roster) = center.class_roster(id).await?;
    let members = center
        .list_members()
        .await?
        .into_iter()
        .filter(|m| !roster.iter().any(|b| b.member_id == m.id))
        .collect();
    Ok(ShowClassTemplate {
        class,
        roster,
        members,
        trainers: center.list_trainers().await?,
        error,
    })
}

pub async fn list(State(center): State<FitnessCenter>) -> Result<Response> {
    let page = list_page(&center, ClassInput::default(), String::new()).await?;
    render(&page)
}

pub async fn create(
    State(center): State<FitnessCenter>,
    Form(form): Form<ClassInput>,
) -> Result<Response> {
    match center.schedule_class(&form).await {
        Ok(class) => Ok(Redirect::to(&format!("/classes/{}", class.id)).into_response()),
        Err(e) if e.is_user_facing() => {
            let page = list_page(&center, form, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn show(State(center): State<FitnessCenter>, Path(id): Path<String>) -> Result<Response> {
    let page = show_page(&center, &id, String::new()).await?;
    render(&page)
}

pub async fn book(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
    Form(form): Form<BookingForm>,
) -> Result<Response> {
    match center.book_class(&id, &form.member_id).await {
        Ok(_) => Ok(Redirect::to(&format!("/classes/{id}")).into_response()),
        Err(e) if e.is_user_facing() => {
            // An unknown class surfaces here as a 404 from the roster lookup.
            let page = show_page(&center, &id, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn cancel_booking(
    State(center): State<FitnessCenter>,
    Path((id, member_id)): Path<(String, String)>,
) -> Result<Response> {
    center.cancel_booking(&id, &member_id).await?;
    Ok(Redirect::to(&format!("/classes/{id}")).into_response())
}

pub async fn assign_trainer(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
    Form(form): Form<TrainerForm>,
) -> Result<Response> {
    center.assign_trainer(&id, &form.trainer_id).await?;
    Ok(Redirect::to(&format!("/classes/{id}")).into_response())
}

pub async fn delete(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.remove_class(&id).await?;
    Ok(Redirect::to("/classes").into_response())
}
