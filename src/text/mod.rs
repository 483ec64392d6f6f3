//! Numbered-menu front end over stdin/stdout (or any reader/writer pair).

mod prompt;

use std::io::{self, BufRead, Write};

use chrono::Utc;
use colored::Colorize;
use thiserror::Error;

pub use prompt::{PromptError, Prompter};

use crate::center::FitnessCenter;
use crate::charts::Chart;
use crate::error::AppError;
use crate::models::member::FITNESS_GOAL_SUGGESTIONS;
use crate::models::nutrition_log::NUTRITION_TIPS;
use crate::models::workout_log::EXERCISE_TYPES;
use crate::models::{
    GoalInput, GoalType, MealInput, MealType, MeasurementInput, MemberInput, MembershipType,
    PaymentInput, WorkoutInput,
};
use crate::reports::ReportRange;

const CHART_WIDTH: usize = 30;
const DEFAULT_AGE: &str = "30";

const MENU: &[(&str, &str)] = &[
    ("1", "Register New Member"),
    ("2", "View All Members"),
    ("3", "Book a Fitness Class"),
    ("4", "Process Payment"),
    ("5", "Generate Revenue Report"),
    ("6", "View Member Progress"),
    ("7", "Log Workout"),
    ("8", "Log Meal"),
    ("9", "Set Goal"),
    ("10", "Record Measurement"),
    ("11", "Update Member"),
    ("12", "Cancel Membership"),
    ("13", "Other Reports"),
    ("0", "Exit"),
];

#[derive(Debug, Error)]
enum StepError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    App(#[from] AppError),
}

type Step = std::result::Result<(), StepError>;

pub struct TextInterface<R, W> {
    center: FitnessCenter,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> TextInterface<R, W> {
    pub fn new(center: FitnessCenter, input: R, output: W) -> Self {
        Self {
            center,
            io: Prompter::new(input, output),
        }
    }

    pub fn into_output(self) -> W {
        self.io.into_output()
    }

    /// Run the menu until the user exits or input ends. Domain errors are
    /// printed and the menu continues.
    pub async fn run(&mut self) -> io::Result<()> {
        match self.menu_loop().await {
            Ok(()) | Err(PromptError::Closed) => {}
            Err(PromptError::Io(e)) => return Err(e),
        }
        match self.io.say("Thank you for using SFMS. Goodbye!") {
            Err(PromptError::Io(e)) => Err(e),
            _ => Ok(()),
        }
    }

    async fn menu_loop(&mut self) -> Result<(), PromptError> {
        self.io.say(format!(
            "\n{}",
            "Welcome to Smart Fitness Management System (Text Mode)".bold().cyan()
        ))?;

        loop {
            self.io.say(format!("\n{}", "Main Menu:".bold()))?;
            for (key, label) in MENU {
                self.io.say(format!("{key}. {label}"))?;
            }
            let choice = self.io.ask("\nEnter your choice (0-13): ")?;

            let step = match choice.trim() {
                "1" => self.register_member().await,
                "2" => self.view_members().await,
                "3" => self.book_class().await,
                "4" => self.process_payment().await,
                "5" => self.revenue_report().await,
                "6" => self.member_progress().await,
                "7" => self.log_workout().await,
                "8" => self.log_meal().await,
                "9" => self.set_goal().await,
                "10" => self.record_measurement().await,
                "11" => self.update_member().await,
                "12" => self.cancel_membership().await,
                "13" => self.other_reports().await,
                "0" => return Ok(()),
                _ => {
                    self.io.say("Invalid choice. Please try again.".yellow())?;
                    continue;
                }
            };

            match step {
                Ok(()) => {}
                Err(StepError::Prompt(e)) => return Err(e),
                Err(StepError::App(e)) => {
                    if !e.is_user_facing() {
                        tracing::error!("Menu action failed: {}", e);
                    }
                    self.io.say(format!("Error: {e}").as_str().red())?;
                }
            }
        }
    }

    fn heading(&mut self, title: &str) -> Step {
        self.io.say(format!("\n--- {title} ---").as_str().bold())?;
        Ok(())
    }

    fn chart(&mut self, chart: &Chart) -> Step {
        self.io.say(format!("\n{}", chart.to_ascii(CHART_WIDTH)))?;
        Ok(())
    }

    async fn register_member(&mut self) -> Step {
        self.heading("Register New Member")?;
        let id = self.io.ask("Enter Member ID (blank to generate): ")?;
        let name = self.io.ask("Enter Name: ")?;
        let mut age = self.io.ask("Enter Age: ")?;
        if age.trim().parse::<i32>().is_err() {
            self.io.say("Invalid age. Using default value of 30.".yellow())?;
            age = DEFAULT_AGE.to_string();
        }
        self.io.say(format!("Membership Types: {}", membership_labels()))?;
        let membership_type = self.io.ask("Enter Membership Type: ")?;
        self.io
            .say(format!("Fitness Goals: {}", FITNESS_GOAL_SUGGESTIONS.join(", ")))?;
        let fitness_goal = self.io.ask("Enter Fitness Goals: ")?;
        let email = self.io.ask("Enter Email (optional): ")?;
        let phone = self.io.ask("Enter Phone (optional): ")?;

        let member = self
            .center
            .register_member(&MemberInput {
                id,
                name,
                age,
                membership_type,
                fitness_goal,
                email,
                phone,
            })
            .await?;
        self.io.say(
            format!(
                "Member {} registered successfully with ID {}!",
                member.name, member.id
            )
            .as_str()
            .green(),
        )?;
        Ok(())
    }

    async fn view_members(&mut self) -> Step {
        self.heading("All Members")?;
        let members = self.center.list_members().await?;
        if members.is_empty() {
            self.io.say("No members found.")?;
            return Ok(());
        }
        for member in members {
            self.io.say(format!(
                "ID: {}, Name: {}, Age: {}, Membership: {}, Goals: {}",
                member.id,
                member.name,
                member.age,
                member.membership_type.label(),
                member.fitness_goal.as_deref().unwrap_or("-"),
            ))?;
        }
        Ok(())
    }

    async fn book_class(&mut self) -> Step {
        self.heading("Book a Fitness Class")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let member = self.center.find_member(member_id.trim()).await?;

        let classes = self.center.list_classes().await?;
        if classes.is_empty() {
            self.io.say("No classes scheduled.")?;
            return Ok(());
        }
        self.io.say("\nAvailable Classes:")?;
        for (i, class) in classes.iter().enumerate() {
            self.io.say(format!(
                "{}. {} - {} - {}/{} enrolled",
                i + 1,
                class.name,
                class.schedule,
                class.enrolled,
                class.capacity
            ))?;
        }

        let answer = self.io.ask("\nEnter class number to book: ")?;
        let Ok(number) = answer.trim().parse::<usize>() else {
            self.io.say("Invalid input. Please enter a number.".yellow())?;
            return Ok(());
        };
        let Some(class) = number.checked_sub(1).and_then(|i| classes.get(i)) else {
            self.io.say("Invalid class number.".yellow())?;
            return Ok(());
        };

        let class = self.center.book_class(&class.id, &member.id).await?;
        self.io.say(
            format!("Successfully booked {} for {}!", class.name, member.name).as_str().green(),
        )?;
        Ok(())
    }

    async fn process_payment(&mut self) -> Step {
        self.heading("Process Payment")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let member = self.center.find_member(member_id.trim()).await?;
        let amount = self.io.ask("Enter payment amount: $")?;
        let service = self.io.ask("Enter service description: ")?;

        let transaction = self
            .center
            .process_payment(&PaymentInput {
                member_id: member.id,
                amount,
                service,
            })
            .await?;
        self.io.say("Payment processed successfully!".green())?;
        self.io.say(transaction.receipt())?;
        Ok(())
    }

    async fn revenue_report(&mut self) -> Step {
        self.heading("Revenue Report")?;
        let report = self.center.revenue_report().await?;
        self.io.say(format!("Total Revenue: {}", report.total_display()))?;
        self.io
            .say(format!("Transactions: {}", report.transaction_count))?;
        if let Some(top) = &report.top_class {
            let enrolled = report
                .enrollments
                .iter()
                .find(|e| &e.class_name == top)
                .map_or(0, |e| e.enrolled);
            self.io
                .say(format!("Top Class: {top} ({enrolled} members)"))?;
        }
        self.io
            .say(format!("Active Members: {}", report.active_members))?;
        self.chart(&report.enrollment_chart())
    }

    async fn member_progress(&mut self) -> Step {
        self.heading("View Member Progress")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let progress = self.center.member_progress(member_id.trim()).await?;

        if progress.timeline.is_empty() && progress.goals.is_empty() {
            self.io.say("No progress data found for this member.")?;
            return Ok(());
        }

        self.io.say(format!(
            "Progress Data for Member {} ({}):",
            progress.member.id, progress.member.name
        ))?;
        for (i, entry) in progress.timeline.iter().enumerate() {
            self.io.say(format!(
                "\nEntry {} - {} - {}:",
                i + 1,
                entry.timestamp().format("%Y-%m-%d %H:%M"),
                entry.kind()
            ))?;
            for (key, value) in entry.details() {
                self.io.say(format!("  {key}: {value}"))?;
            }
        }

        if !progress.goals.is_empty() {
            self.io.say("\nGoals:".bold())?;
            for goal in &progress.goals {
                self.io.say(format!(
                    "  {} - {} of {} ({}) - {} - due {}",
                    goal.goal.goal_type.label(),
                    goal.current_display(),
                    goal.goal.target_display(),
                    goal.percent_display(),
                    goal.goal.status.label(),
                    goal.goal.deadline().format("%Y-%m-%d"),
                ))?;
            }
        }
        if !progress.classes.is_empty() {
            self.io.say("\nBooked Classes:".bold())?;
            for class in &progress.classes {
                self.io
                    .say(format!("  {} - {}", class.name, class.schedule))?;
            }
        }
        Ok(())
    }

    async fn log_workout(&mut self) -> Step {
        self.heading("Log Workout")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        self.io
            .say(format!("Exercise Types: {}", EXERCISE_TYPES.join(", ")))?;
        let exercise_type = self.io.ask("Enter Exercise Type: ")?;
        let duration_minutes = self.io.ask("Enter Duration (minutes): ")?;
        let calories_burned = self.io.ask("Enter Calories Burned: ")?;
        let distance_km = self.io.ask("Enter Distance in km (optional): ")?;
        let notes = self.io.ask("Enter Notes (optional): ")?;
        let date = self.io.ask("Enter Date YYYY-MM-DD (blank for today): ")?;

        let workout = self
            .center
            .log_workout(&WorkoutInput {
                member_id: member_id.trim().to_string(),
                exercise_type,
                duration_minutes,
                calories_burned,
                distance_km,
                notes,
                date,
            })
            .await?;
        self.io.say(
            format!(
                "Logged {} minutes of {}.",
                workout.duration_minutes, workout.exercise_type
            )
            .as_str()
            .green(),
        )?;
        Ok(())
    }

    async fn log_meal(&mut self) -> Step {
        self.heading("Log Meal")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let meal_types: Vec<&str> = MealType::ALL.iter().map(|m| m.label()).collect();
        self.io
            .say(format!("Meal Types: {}", meal_types.join(", ")))?;
        let meal_type = self.io.ask("Enter Meal Type: ")?;
        let food_items = self.io.ask("Enter Food Items: ")?;
        let calories = self.io.ask("Enter Calories: ")?;
        let protein_g = self.io.ask("Enter Protein (g): ")?;
        let carbs_g = self.io.ask("Enter Carbs (g): ")?;
        let fat_g = self.io.ask("Enter Fat (g): ")?;
        let date = self.io.ask("Enter Date YYYY-MM-DD (blank for today): ")?;

        let meal = self
            .center
            .log_meal(&MealInput {
                member_id: member_id.trim().to_string(),
                meal_type,
                food_items,
                calories,
                protein_g,
                carbs_g,
                fat_g,
                date,
            })
            .await?;
        self.io.say(
            format!("Logged {} ({} kcal).", meal.meal_type.label(), meal.calories).as_str().green(),
        )?;
        let tip = NUTRITION_TIPS[Utc::now().timestamp() as usize % NUTRITION_TIPS.len()];
        self.io.say(format!("Tip: {tip}"))?;
        Ok(())
    }

    async fn set_goal(&mut self) -> Step {
        self.heading("Set Goal")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let goal_types: Vec<String> = GoalType::ALL
            .iter()
            .map(|g| format!("{} ({})", g.label(), g.unit()))
            .collect();
        self.io
            .say(format!("Goal Types: {}", goal_types.join(", ")))?;
        let goal_type = self.io.ask("Enter Goal Type: ")?;
        let target_value = self.io.ask("Enter Target Value: ")?;
        let duration_weeks = self.io.ask("Enter Duration in weeks (blank for 4): ")?;

        let goal = self
            .center
            .set_goal(&GoalInput {
                member_id: member_id.trim().to_string(),
                goal_type,
                target_value,
                duration_weeks,
            })
            .await?;
        self.io.say(
            format!(
                "Goal set: {} {} by {}.",
                goal.goal_type.label(),
                goal.target_display(),
                goal.deadline().format("%Y-%m-%d")
            )
            .as_str()
            .green(),
        )?;
        Ok(())
    }

    async fn record_measurement(&mut self) -> Step {
        self.heading("Record Measurement")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let weight_kg = self.io.ask("Enter Weight in kg (optional): ")?;
        let running_speed_kmh = self.io.ask("Enter Running Speed in km/h (optional): ")?;

        self.center
            .record_measurement(&MeasurementInput {
                member_id: member_id.trim().to_string(),
                weight_kg,
                running_speed_kmh,
            })
            .await?;
        self.io.say("Measurement recorded.".green())?;
        Ok(())
    }

    async fn update_member(&mut self) -> Step {
        self.heading("Update Member")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let member = self.center.find_member(member_id.trim()).await?;
        self.io.say("Press Enter to keep the current value.")?;

        let current = MemberInput::from_member(&member);
        let input = MemberInput {
            id: member.id.clone(),
            name: self.io.ask_or("Name", &current.name)?,
            age: self.io.ask_or("Age", &current.age)?,
            membership_type: self.io.ask_or("Membership Type", &current.membership_type)?,
            fitness_goal: self.io.ask_or("Fitness Goals", &current.fitness_goal)?,
            email: self.io.ask_or("Email", &current.email)?,
            phone: self.io.ask_or("Phone", &current.phone)?,
        };

        let member = self.center.update_member(&member.id, &input).await?;
        self.io
            .say(format!("Member {} updated successfully!", member.name).as_str().green())?;
        Ok(())
    }

    async fn cancel_membership(&mut self) -> Step {
        self.heading("Cancel Membership")?;
        let member_id = self.io.ask("Enter Member ID: ")?;
        let member = self.center.find_member(member_id.trim()).await?;
        let confirm = self.io.ask(&format!(
            "Cancel membership of {} and delete their records? Type 'yes' to confirm: ",
            member.name
        ))?;
        if !confirm.trim().eq_ignore_ascii_case("yes") {
            self.io.say("Cancellation aborted.")?;
            return Ok(());
        }

        self.center.cancel_membership(&member.id).await?;
        self.io
            .say(format!("Membership of {} cancelled.", member.name).as_str().green())?;
        Ok(())
    }

    async fn other_reports(&mut self) -> Step {
        self.heading("Other Reports")?;
        self.io.say("1. Membership Analysis")?;
        self.io.say("2. Workout Summary")?;
        self.io.say("3. Member Fitness Report")?;
        self.io.say("4. Member Nutrition Report")?;
        self.io.say("5. Nutrition Tips")?;
        let choice = self.io.ask("Enter report number: ")?;

        match choice.trim() {
            "1" => self.membership_analysis().await,
            "2" => {
                let range = self.ask_range()?;
                let summary = self.center.workout_summary(range).await?;
                self.io.say(format!(
                    "Workouts from {} to {}:",
                    summary.range.from, summary.range.to
                ))?;
                for row in &summary.members {
                    self.io.say(format!(
                        "  {} ({}): {} workouts, {} min, {} kcal",
                        row.member_name,
                        row.member_id,
                        row.workouts,
                        row.total_minutes,
                        row.total_calories
                    ))?;
                }
                self.chart(&summary.chart())
            }
            "3" => self.fitness_report().await,
            "4" => self.nutrition_report().await,
            "5" => {
                for tip in NUTRITION_TIPS {
                    self.io.say(format!("• {tip}"))?;
                }
                Ok(())
            }
            _ => {
                self.io.say("Invalid choice. Please try again.".yellow())?;
                Ok(())
            }
        }
    }

    async fn membership_analysis(&mut self) -> Step {
        let analysis = self.center.membership_analysis().await?;
        self.io
            .say(format!("Total Members: {}", analysis.total_members))?;
        for count in &analysis.by_type {
            self.io.say(format!(
                "  {}: {}",
                count.membership_type.label(),
                count.members
            ))?;
        }
        self.io
            .say(format!("Average Age: {}", analysis.average_age_display()))?;
        self.io.say(format!(
            "Most Popular Goal: {}",
            analysis.most_popular_goal.as_deref().unwrap_or("-")
        ))?;
        self.io.say(format!(
            "Average Membership Duration: {}",
            analysis.average_days_display()
        ))?;
        self.chart(&analysis.membership_chart())
    }

    async fn fitness_report(&mut self) -> Step {
        let member_id = self.io.ask("Enter Member ID: ")?;
        let range = self.ask_range()?;
        let report = self.center.fitness_report(member_id.trim(), range).await?;

        self.io.say(format!(
            "Fitness report for {} ({} to {}):",
            report.member.name, report.range.from, report.range.to
        ))?;
        self.io.say(format!(
            "  {} workouts, {} min, {} kcal, {:.1} km",
            report.workouts, report.total_minutes, report.total_calories, report.total_distance_km
        ))?;
        for exercise in &report.by_exercise {
            self.io.say(format!(
                "  {}: {} sessions, {} min, {} kcal",
                exercise.exercise_type, exercise.sessions, exercise.minutes, exercise.calories
            ))?;
        }
        self.chart(&report.weekly_chart())?;
        self.chart(&report.weight_chart())
    }

    async fn nutrition_report(&mut self) -> Step {
        let member_id = self.io.ask("Enter Member ID: ")?;
        let range = self.ask_range()?;
        let report = self.center.nutrition_report(member_id.trim(), range).await?;

        self.io.say(format!(
            "Nutrition report for {} ({} to {}):",
            report.member.name, report.range.from, report.range.to
        ))?;
        self.io.say(format!(
            "  {} meals, {} kcal, {:.0} kcal per day logged",
            report.meals, report.total_calories, report.average_daily_calories
        ))?;
        self.io.say(format!(
            "  Protein {} g, Carbs {} g, Fat {} g",
            report.protein_g, report.carbs_g, report.fat_g
        ))?;
        self.chart(&report.macro_chart())
    }

    fn ask_range(&mut self) -> std::result::Result<ReportRange, StepError> {
        let from = self.io.ask("Start date YYYY-MM-DD (blank for 28 days before end): ")?;
        let to = self.io.ask("End date YYYY-MM-DD (blank for today): ")?;
        Ok(ReportRange::parse(&from, &to, Utc::now().date_naive())?)
    }
}

fn membership_labels() -> String {
    MembershipType::ALL
        .iter()
        .map(|m| m.label())
        .collect::<Vec<_>>()
        .join(", ")
}
