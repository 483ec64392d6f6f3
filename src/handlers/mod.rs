pub mod classes;
pub mod dashboard;
pub mod goals;
pub mod health;
pub mod members;
pub mod nutrition;
pub mod payments;
pub mod reports;
pub mod trainers;
pub mod workouts;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::error::{AppError, Result};

pub(crate) fn render(template: &impl Template) -> Result<Response> {
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

/// Re-render a form page carrying a user-facing error, with that error's status.
pub(crate) fn render_error(error: &AppError, template: &impl Template) -> Result<Response> {
    let page = render(template)?;
    Ok((error.status_code(), page).into_response())
}
