use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::center::FitnessCenter;
use crate::charts::{Chart, DataPoint};
use crate::error::{AppError, Result};
use crate::models::workout_log::parse_optional_date;
use crate::models::{
    Measurement, Member, MemberWorkoutSummary, MembershipType, NutritionLog, WorkoutLog,
};

pub const DEFAULT_RANGE_DAYS: i64 = 28;
/// Longest range a report covers, about five years.
pub const MAX_RANGE_DAYS: i64 = 5 * 366;

const PROTEIN_KCAL_PER_G: f64 = 4.0;
const CARBS_KCAL_PER_G: f64 = 4.0;
const FAT_KCAL_PER_G: f64 = 9.0;

/// An inclusive range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(AppError::validation("Start date must not be after end date"));
        }
        if (to - from).num_days() >= MAX_RANGE_DAYS {
            return Err(AppError::validation(format!(
                "Date range must not exceed {MAX_RANGE_DAYS} days"
            )));
        }
        Ok(Self { from, to })
    }

    /// The `DEFAULT_RANGE_DAYS` days ending on `today`.
    pub fn ending(today: NaiveDate) -> Self {
        Self {
            from: today - Duration::days(DEFAULT_RANGE_DAYS - 1),
            to: today,
        }
    }

    /// Build a range from optional `YYYY-MM-DD` strings. A missing end is
    /// today; a missing start is `DEFAULT_RANGE_DAYS` before the end.
    pub fn parse(from: &str, to: &str, today: NaiveDate) -> Result<Self> {
        let to = parse_optional_date(to)?.unwrap_or(today);
        let from = match parse_optional_date(from)? {
            Some(from) => from,
            None => to
                .checked_sub_signed(Duration::days(DEFAULT_RANGE_DAYS - 1))
                .ok_or_else(|| AppError::validation("End date is out of range"))?,
        };
        Self::new(from, to)
    }

    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

impl Default for ReportRange {
    fn default() -> Self {
        Self::ending(Utc::now().date_naive())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassEnrollment {
    pub class_name: String,
    pub enrolled: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueReport {
    pub total_revenue: f64,
    pub transaction_count: i64,
    pub active_members: i64,
    pub enrollments: Vec<ClassEnrollment>,
    pub top_class: Option<String>,
}

impl RevenueReport {
    pub fn total_display(&self) -> String {
        format!("${:.2}", self.total_revenue)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipCount {
    pub membership_type: MembershipType,
    pub members: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipAnalysis {
    pub total_members: i64,
    pub by_type: Vec<MembershipCount>,
    pub average_age: Option<f64>,
    pub most_popular_goal: Option<String>,
    pub average_membership_days: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutSummary {
    pub range: ReportRange,
    pub members: Vec<MemberWorkoutSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseBreakdown {
    pub exercise_type: String,
    pub sessions: i64,
    pub minutes: i64,
    pub calories: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCount {
    pub week_start: NaiveDate,
    pub workouts: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FitnessReport {
    pub member: Member,
    pub range: ReportRange,
    pub workouts: i64,
    pub total_minutes: i64,
    pub total_calories: i64,
    pub total_distance_km: f64,
    pub by_exercise: Vec<ExerciseBreakdown>,
    pub weekly: Vec<WeeklyCount>,
    pub weights: Vec<(NaiveDate, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroSplit {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionReport {
    pub member: Member,
    pub range: ReportRange,
    pub meals: i64,
    pub total_calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
    pub average_daily_calories: f64,
    pub macro_split: Option<MacroSplit>,
}

impl FitnessCenter {
    pub async fn revenue_report(&self) -> Result<RevenueReport> {
        let (total_revenue, transaction_count) = self.transactions.total_revenue().await?;
        let active_members = self.members.count().await?;
        let enrollments: Vec<ClassEnrollment> = self
            .classes
            .enrollment_counts()
            .await?
            .into_iter()
            .map(|(class_name, enrolled)| ClassEnrollment {
                class_name,
                enrolled,
            })
            .collect();

        Ok(RevenueReport {
            total_revenue,
            transaction_count,
            active_members,
            top_class: top_class(&enrollments),
            enrollments,
        })
    }

    pub async fn membership_analysis(&self) -> Result<MembershipAnalysis> {
        let members = self.members.find_all().await?;
        Ok(analyze_memberships(&members, Utc::now().date_naive()))
    }

    pub async fn workout_summary(&self, range: ReportRange) -> Result<WorkoutSummary> {
        let members = self
            .workouts
            .summary_by_member(range.from, range.to)
            .await?;
        Ok(WorkoutSummary { range, members })
    }

    pub async fn fitness_report(&self, member_id: &str, range: ReportRange) -> Result<FitnessReport> {
        let member = self.find_member(member_id).await?;
        let workouts = self
            .workouts
            .find_in_range(member_id, range.from, range.to)
            .await?;
        let measurements = self
            .measurements
            .find_in_range(member_id, range.from, range.to)
            .await?;
        Ok(build_fitness_report(member, range, &workouts, &measurements))
    }

    pub async fn nutrition_report(
        &self,
        member_id: &str,
        range: ReportRange,
    ) -> Result<NutritionReport> {
        let member = self.find_member(member_id).await?;
        let meals = self
            .nutrition
            .find_in_range(member_id, range.from, range.to)
            .await?;
        Ok(build_nutrition_report(member, range, &meals))
    }
}

impl RevenueReport {
    pub fn enrollment_chart(&self) -> Chart {
        Chart::bar(
            "Class Enrollment",
            "",
            self.enrollments
                .iter()
                .map(|e| DataPoint::new(e.class_name.clone(), e.enrolled as f64))
                .collect(),
        )
    }
}

impl MembershipAnalysis {
    pub fn membership_chart(&self) -> Chart {
        Chart::pie(
            "Membership Types",
            self.by_type
                .iter()
                .map(|c| DataPoint::new(c.membership_type.label(), c.members as f64))
                .collect(),
        )
    }

    pub fn average_age_display(&self) -> String {
        self.average_age
            .map_or_else(|| "-".to_string(), |age| format!("{age:.1}"))
    }

    pub fn average_days_display(&self) -> String {
        self.average_membership_days
            .map_or_else(|| "-".to_string(), |days| format!("{days:.0} days"))
    }
}

impl WorkoutSummary {
    pub fn chart(&self) -> Chart {
        Chart::bar(
            "Workouts per Member",
            "",
            self.members
                .iter()
                .map(|m| DataPoint::new(m.member_name.clone(), m.workouts as f64))
                .collect(),
        )
    }
}

impl FitnessReport {
    pub fn weekly_chart(&self) -> Chart {
        Chart::bar(
            "Workouts per Week",
            "",
            self.weekly
                .iter()
                .map(|w| DataPoint::new(w.week_start.format("%m-%d").to_string(), w.workouts as f64))
                .collect(),
        )
    }

    pub fn exercise_chart(&self) -> Chart {
        Chart::pie(
            "Minutes by Exercise",
            self.by_exercise
                .iter()
                .map(|e| DataPoint::new(e.exercise_type.clone(), e.minutes as f64))
                .collect(),
        )
    }

    pub fn weight_chart(&self) -> Chart {
        Chart::line(
            "Weight",
            "kg",
            self.weights
                .iter()
                .map(|(day, kg)| DataPoint::new(day.format("%m-%d").to_string(), *kg))
                .collect(),
        )
    }
}

impl NutritionReport {
    pub fn macro_chart(&self) -> Chart {
        let split = self.macro_split.unwrap_or(MacroSplit {
            protein_pct: 0.0,
            carbs_pct: 0.0,
            fat_pct: 0.0,
        });
        Chart::pie(
            "Macronutrients by Energy",
            vec![
                DataPoint::new("Protein", split.protein_pct),
                DataPoint::new("Carbs", split.carbs_pct),
                DataPoint::new("Fat", split.fat_pct),
            ],
        )
    }
}

/// The class with the most bookings. Ties go to the class listed first.
pub fn top_class(enrollments: &[ClassEnrollment]) -> Option<String> {
    let mut best: Option<&ClassEnrollment> = None;
    for entry in enrollments {
        if best.map_or(true, |b| entry.enrolled > b.enrolled) {
            best = Some(entry);
        }
    }
    best.map(|b| b.class_name.clone())
}

pub fn analyze_memberships(members: &[Member], today: NaiveDate) -> MembershipAnalysis {
    let by_type = MembershipType::ALL
        .into_iter()
        .map(|membership_type| MembershipCount {
            membership_type,
            members: members
                .iter()
                .filter(|m| m.membership_type == membership_type)
                .count() as i64,
        })
        .collect();

    let average_age = average(members.iter().map(|m| m.age as f64));
    let average_membership_days = average(
        members
            .iter()
            .map(|m| (today - m.joined_at.date_naive()).num_days().max(0) as f64),
    );

    MembershipAnalysis {
        total_members: members.len() as i64,
        by_type,
        average_age,
        most_popular_goal: most_common(members.iter().filter_map(|m| m.fitness_goal.as_deref())),
        average_membership_days,
    }
}

pub fn build_fitness_report(
    member: Member,
    range: ReportRange,
    workouts: &[WorkoutLog],
    measurements: &[Measurement],
) -> FitnessReport {
    let in_range: Vec<&WorkoutLog> = workouts
        .iter()
        .filter(|w| range.contains(w.logged_at.date_naive()))
        .collect();

    let mut by_exercise: Vec<ExerciseBreakdown> = Vec::new();
    for workout in &in_range {
        let index = match by_exercise
            .iter()
            .position(|e| e.exercise_type == workout.exercise_type)
        {
            Some(index) => index,
            None => {
                by_exercise.push(ExerciseBreakdown {
                    exercise_type: workout.exercise_type.clone(),
                    sessions: 0,
                    minutes: 0,
                    calories: 0,
                });
                by_exercise.len() - 1
            }
        };
        let entry = &mut by_exercise[index];
        entry.sessions += 1;
        entry.minutes += workout.duration_minutes as i64;
        entry.calories += workout.calories_burned as i64;
    }
    by_exercise.sort_by(|a, b| b.sessions.cmp(&a.sessions).then(b.minutes.cmp(&a.minutes)));

    let weights = measurements
        .iter()
        .filter(|m| range.contains(m.recorded_at.date_naive()))
        .filter_map(|m| m.weight_kg.map(|w| (m.recorded_at.date_naive(), w)))
        .collect();

    FitnessReport {
        member,
        range,
        workouts: in_range.len() as i64,
        total_minutes: in_range.iter().map(|w| w.duration_minutes as i64).sum(),
        total_calories: in_range.iter().map(|w| w.calories_burned as i64).sum(),
        total_distance_km: in_range.iter().filter_map(|w| w.distance_km).sum(),
        by_exercise,
        weekly: weekly_counts(range, in_range.iter().map(|w| w.logged_at.date_naive())),
        weights,
    }
}

/// Count days into 7-day buckets starting at `range.from`. The last bucket
/// may be shorter than a week.
pub fn weekly_counts(range: ReportRange, days: impl Iterator<Item = NaiveDate>) -> Vec<WeeklyCount> {
    let buckets = (range.days() + 6) / 7;
    let mut weekly: Vec<WeeklyCount> = (0..buckets)
        .map(|i| WeeklyCount {
            week_start: range.from + Duration::days(i * 7),
            workouts: 0,
        })
        .collect();
    for day in days.filter(|d| range.contains(*d)) {
        let index = ((day - range.from).num_days() / 7) as usize;
        weekly[index].workouts += 1;
    }
    weekly
}

pub fn build_nutrition_report(
    member: Member,
    range: ReportRange,
    meals: &[NutritionLog],
) -> NutritionReport {
    let in_range: Vec<&NutritionLog> = meals
        .iter()
        .filter(|m| range.contains(m.logged_at.date_naive()))
        .collect();

    let total_calories: i64 = in_range.iter().map(|m| m.calories as i64).sum();
    let protein_g: i64 = in_range.iter().map(|m| m.protein_g as i64).sum();
    let carbs_g: i64 = in_range.iter().map(|m| m.carbs_g as i64).sum();
    let fat_g: i64 = in_range.iter().map(|m| m.fat_g as i64).sum();

    let days_with_meals: BTreeSet<NaiveDate> =
        in_range.iter().map(|m| m.logged_at.date_naive()).collect();
    let average_daily_calories = if days_with_meals.is_empty() {
        0.0
    } else {
        total_calories as f64 / days_with_meals.len() as f64
    };

    NutritionReport {
        member,
        range,
        meals: in_range.len() as i64,
        total_calories,
        protein_g,
        carbs_g,
        fat_g,
        average_daily_calories,
        macro_split: macro_split(protein_g, carbs_g, fat_g),
    }
}

/// Share of energy from each macronutrient, in percent. `None` when no
/// macros were recorded.
pub fn macro_split(protein_g: i64, carbs_g: i64, fat_g: i64) -> Option<MacroSplit> {
    let protein = protein_g as f64 * PROTEIN_KCAL_PER_G;
    let carbs = carbs_g as f64 * CARBS_KCAL_PER_G;
    let fat = fat_g as f64 * FAT_KCAL_PER_G;
    let total = protein + carbs + fat;
    if total <= 0.0 {
        return None;
    }
    Some(MacroSplit {
        protein_pct: protein / total * 100.0,
        carbs_pct: carbs / total * 100.0,
        fat_pct: fat / total * 100.0,
    })
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Most frequent value; ties go to the value seen first.
fn most_common<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (position, value) in values.enumerate() {
        let entry = counts.entry(value).or_insert((0, position));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
        .map(|(value, _)| value.to_string())
}
