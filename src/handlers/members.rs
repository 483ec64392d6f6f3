use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::{render, render_error};
use crate::center::{FitnessCenter, MemberProgress};
use crate::charts::{Chart, DataPoint};
use crate::error::{AppError, Result};
use crate::models::member::FITNESS_GOAL_SUGGESTIONS;
use crate::models::{Member, MemberInput, MeasurementInput, MembershipType, ProgressEntry};

#[derive(Template)]
#[template(path = "members/list.html")]
struct MembersListTemplate {
    members: Vec<Member>,
}

#[derive(Template)]
#[template(path = "members/form.html")]
struct MemberFormTemplate {
    action: String,
    heading: String,
    editing: bool,
    form: MemberInput,
    memberships: [MembershipType; 3],
    goal_suggestions: &'static [&'static str],
    error: String,
}

impl MemberFormTemplate {
    fn new_member(form: MemberInput, error: String) -> Self {
        Self {
            action: "/members".to_string(),
            heading: "Register Member".to_string(),
            editing: false,
            form,
            memberships: MembershipType::ALL,
            goal_suggestions: FITNESS_GOAL_SUGGESTIONS,
            error,
        }
    }

    fn edit_member(id: &str, form: MemberInput, error: String) -> Self {
        Self {
            action: format!("/members/{id}/edit"),
            heading: "Update Member".to_string(),
            editing: true,
            form,
            memberships: MembershipType::ALL,
            goal_suggestions: FITNESS_GOAL_SUGGESTIONS,
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "members/show.html")]
struct ShowMemberTemplate {
    progress: MemberProgress,
    entries: Vec<TimelineRow>,
    memberships: [MembershipType; 3],
    weight_chart: String,
    measurement: MeasurementInput,
    error: String,
}

struct TimelineRow {
    date: String,
    kind: &'static str,
    details: String,
}

impl From<&ProgressEntry> for TimelineRow {
    fn from(entry: &ProgressEntry) -> Self {
        Self {
            date: entry.timestamp().format("%Y-%m-%d %H:%M").to_string(),
            kind: entry.kind(),
            details: entry
                .details()
                .into_iter()
                .map(|(field, value)| format!("{field}: {value}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Deserialize)]
pub struct MembershipForm {
    membership_type: String,
}

pub async fn list(State(center): State<FitnessCenter>) -> Result<Response> {
    let members = center.list_members().await?;
    render(&MembersListTemplate { members })
}

pub async fn new_page() -> Result<Response> {
    render(&MemberFormTemplate::new_member(
        MemberInput {
            membership_type: MembershipType::Basic.label().to_string(),
            ..Default::default()
        },
        String::new(),
    ))
}

pub async fn create(
    State(center): State<FitnessCenter>,
    Form(form): Form<MemberInput>,
) -> Result<Response> {
    match center.register_member(&form).await {
        Ok(member) => Ok(Redirect::to(&format!("/members/{}", member.id)).into_response()),
        Err(e) if e.is_user_facing() => {
            let error = e.to_string();
            render_error(&e, &MemberFormTemplate::new_member(form, error))
        }
        Err(e) => Err(e),
    }
}

pub async fn show(State(center): State<FitnessCenter>, Path(id): Path<String>) -> Result<Response> {
    let page = show_page(&center, &id, MeasurementInput::default(), String::new()).await?;
    render(&page)
}

async fn show_page(
    center: &FitnessCenter,
    id: &str,
    measurement: MeasurementInput,
    error: String,
) -> Result<ShowMemberTemplate> {
    let progress = center.member_progress(id).await?;
    let weights: Vec<DataPoint> = progress
        .timeline
        .iter()
        .filter_map(|entry| match entry {
            ProgressEntry::Measurement(m) => m
                .weight_kg
                .map(|kg| DataPoint::new(m.recorded_at.format("%m-%d").to_string(), kg)),
            _ => None,
        })
        .collect();
    let weight_chart = Chart::line("Weight", "kg", weights).to_svg()?;

    Ok(ShowMemberTemplate {
        entries: progress.timeline.iter().rev().map(TimelineRow::from).collect(),
        progress,
        memberships: MembershipType::ALL,
        weight_chart,
        measurement,
        error,
    })
}

pub async fn edit_page(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    let member = center.find_member(&id).await?;
    render(&MemberFormTemplate::edit_member(
        &id,
        MemberInput::from_member(&member),
        String::new(),
    ))
}

pub async fn update(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
    Form(form): Form<MemberInput>,
) -> Result<Response> {
    match center.update_member(&id, &form).await {
        Ok(member) => Ok(Redirect::to(&format!("/members/{}", member.id)).into_response()),
        Err(e @ AppError::NotFound(_)) => Err(e),
        Err(e) if e.is_user_facing() => {
            let error = e.to_string();
            render_error(&e, &MemberFormTemplate::edit_member(&id, form, error))
        }
        Err(e) => Err(e),
    }
}

pub async fn change_membership(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
    Form(form): Form<MembershipForm>,
) -> Result<Response> {
    center.update_membership(&id, &form.membership_type).await?;
    Ok(Redirect::to(&format!("/members/{id}")).into_response())
}

pub async fn delete(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.cancel_membership(&id).await?;
    Ok(Redirect::to("/members").into_response())
}

pub async fn add_measurement(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
    Form(mut form): Form<MeasurementInput>,
) -> Result<Response> {
    form.member_id = id.clone();
    match center.record_measurement(&form).await {
        Ok(_) => Ok(Redirect::to(&format!("/members/{id}")).into_response()),
        Err(e @ AppError::Validation(_)) => {
            let page = show_page(&center, &id, form, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}
