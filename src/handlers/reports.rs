use askama::Template;
use axum::{
    extract::{Query, State},
    response::Response,
};
use chrono::Utc;
use serde::Deserialize;

use super::render;
use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::input;
use crate::models::Member;
use crate::reports::{
    FitnessReport, MembershipAnalysis, NutritionReport, ReportRange, RevenueReport,
    WorkoutSummary,
};

#[derive(Template)]
#[template(path = "reports/index.html")]
struct ReportsIndexTemplate {
    revenue: RevenueReport,
    enrollment_chart: String,
    membership: MembershipAnalysis,
    membership_chart: String,
    members: Vec<Member>,
    range: ReportRange,
}

#[derive(Template)]
#[template(path = "reports/workouts.html")]
struct WorkoutSummaryTemplate {
    summary: WorkoutSummary,
    chart: String,
}

#[derive(Template)]
#[template(path = "reports/fitness.html")]
struct FitnessReportTemplate {
    report: FitnessReport,
    weekly_chart: String,
    exercise_chart: String,
    weight_chart: String,
}

#[derive(Template)]
#[template(path = "reports/nutrition.html")]
struct NutritionReportTemplate {
    report: NutritionReport,
    macro_chart: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    member_id: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
}

impl ReportQuery {
    fn range(&self) -> Result<ReportRange> {
        ReportRange::parse(&self.from, &self.to, Utc::now().date_naive())
    }

    fn member_id(&self) -> Result<String> {
        input::required("Member", &self.member_id)
    }
}

pub async fn index(State(center): State<FitnessCenter>) -> Result<Response> {
    let revenue = center.revenue_report().await?;
    let membership = center.membership_analysis().await?;
    let template = ReportsIndexTemplate {
        enrollment_chart: revenue.enrollment_chart().to_svg()?,
        membership_chart: membership.membership_chart().to_svg()?,
        revenue,
        membership,
        members: center.list_members().await?,
        range: ReportRange::default(),
    };
    render(&template)
}

pub async fn workouts(
    State(center): State<FitnessCenter>,
    Query(query): Query<ReportQuery>,
) -> Result<Response> {
    let summary = center.workout_summary(query.range()?).await?;
    let chart = summary.chart().to_svg()?;
    render(&WorkoutSummaryTemplate { summary, chart })
}

pub async fn fitness(
    State(center): State<FitnessCenter>,
    Query(query): Query<ReportQuery>,
) -> Result<Response> {
    let report = center
        .fitness_report(&query.member_id()?, query.range()?)
        .await?;
    let template = FitnessReportTemplate {
        weekly_chart: report.weekly_chart().to_svg()?,
        exercise_chart: report.exercise_chart().to_svg()?,
        weight_chart: report.weight_chart().to_svg()?,
        report,
    };
    render(&template)
}

pub async fn nutrition(
    State(center): State<FitnessCenter>,
    Query(query): Query<ReportQuery>,
) -> Result<Response> {
    let report = center
        .nutrition_report(&query.member_id()?, query.range()?)
        .await?;
    let macro_chart = report.macro_chart().to_svg()?;
    render(&NutritionReportTemplate {
        report,
        macro_chart,
    })
}
