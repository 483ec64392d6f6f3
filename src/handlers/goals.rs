use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};

use super::{render, render_error};
use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::goal::DEFAULT_DURATION_WEEKS;
use crate::models::{GoalInput, GoalProgress, GoalType, Member};

#[derive(Template)]
#[template(path = "goals/list.html")]
struct GoalsListTemplate {
    goals: Vec<GoalProgress>,
    members: Vec<Member>,
    goal_types: [GoalType; 4],
    form: GoalInput,
    error: String,
}

async fn list_page(center: &FitnessCenter, form: GoalInput, error: String) -> Result<GoalsListTemplate> {
    Ok(GoalsListTemplate {
        goals: center.list_goals().await?,
        members: center.list_members().await?,
        goal_types: GoalType::ALL,
        form,
        error,
    })
}

pub async fn list(State(center): State<FitnessCenter>) -> Result<Response> {
    let form = GoalInput {
        duration_weeks: DEFAULT_DURATION_WEEKS.to_string(),
        ..Default::default()
    };
    let page = list_page(&center, form, String::new()).await?;
    render(&page)
}

pub async fn create(
    State(center): State<FitnessCenter>,
    Form(form): Form<GoalInput>,
) -> Result<Response> {
    match center.set_goal(&form).await {
        Ok(_) => Ok(Redirect::to("/goals").into_response()),
        Err(e) if e.is_user_facing() => {
            let page = list_page(&center, form, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn achieve(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.achieve_goal(&id).await?;
    Ok(Redirect::to("/goals").into_response())
}

pub async fn abandon(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.abandon_goal(&id).await?;
    Ok(Redirect::to("/goals").into_response())
}

pub async fn delete(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.delete_goal(&id).await?;
    Ok(Redirect::to("/goals").into_response())
}
