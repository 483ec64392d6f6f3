use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use super::{render, render_error};
use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::nutrition_log::NUTRITION_TIPS;
use crate::models::{MealInput, MealType, Member, NutritionLogWithMember};

const RECENT_LIMIT: i64 = 20;

#[derive(Template)]
#[template(path = "nutrition/list.html")]
struct NutritionTemplate {
    meals: Vec<NutritionLogWithMember>,
    members: Vec<Member>,
    meal_types: [MealType; 4],
    tips: &'static [&'static str],
    form: MealInput,
    error: String,
}

async fn list_page(center: &FitnessCenter, form: MealInput, error: String) -> Result<NutritionTemplate> {
    Ok(NutritionTemplate {
        meals: center.recent_meals(RECENT_LIMIT).await?,
        members: center.list_members().await?,
        meal_types: MealType::ALL,
        tips: NUTRITION_TIPS,
        form,
        error,
    })
}

pub async fn list(State(center): State<FitnessCenter>) -> Result<Response> {
    let form = MealInput {
        date: Utc::now().date_naive().to_string(),
        ..Default::default()
    };
    let page = list_page(&center, form, String::new()).await?;
    render(&page)
}

pub async fn create(
    State(center): State<FitnessCenter>,
    Form(form): Form<MealInput>,
) -> Result<Response> {
    match center.log_meal(&form).await {
        Ok(_) => Ok(Redirect::to("/nutrition").into_response()),
        Err(e) if e.is_user_facing() => {
            let page = list_page(&center, form, e.to_string()).await?;
            render_error(&e, &page)
        }
        Err(e) => Err(e),
    }
}

pub async fn delete(
    State(center): State<FitnessCenter>,
    Path(id): Path<String>,
) -> Result<Response> {
    center.delete_meal(&id).await?;
    Ok(Redirect::to("/nutrition").into_response())
}
