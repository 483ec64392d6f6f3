use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::progress::build_timeline;
use crate::models::{
    Booking, BookingOutcome, ClassInput, ClassOverview, FitnessClass, Goal, GoalInput,
    GoalProgress, GoalStatus, GoalType, MealInput, Measurement, MeasurementInput, Member,
    MemberInput, MembershipType, NutritionLog, NutritionLogWithMember, PaymentInput,
    ProgressEntry, Trainer, TrainerInput, Transaction, WorkoutInput, WorkoutLog,
    WorkoutLogWithMember,
};
use crate::repositories::{
    ClassRepository, GoalRepository, MeasurementRepository, MemberRepository,
    NutritionRepository, TrainerRepository, TransactionRepository, WorkoutRepository,
};

/// Everything recorded about one member, oldest entry first.
#[derive(Debug, Clone, Serialize)]
pub struct MemberProgress {
    pub member: Member,
    pub timeline: Vec<ProgressEntry>,
    pub goals: Vec<GoalProgress>,
    pub classes: Vec<ClassOverview>,
}

/// The operations both interfaces drive. Input arrives as raw strings,
/// is validated here, and reaches the repositories typed.
#[derive(Clone)]
pub struct FitnessCenter {
    pub(crate) members: MemberRepository,
    pub(crate) trainers: TrainerRepository,
    pub(crate) classes: ClassRepository,
    pub(crate) workouts: WorkoutRepository,
    pub(crate) goals: GoalRepository,
    pub(crate) nutrition: NutritionRepository,
    pub(crate) measurements: MeasurementRepository,
    pub(crate) transactions: TransactionRepository,
}

impl FitnessCenter {
    pub fn new(pool: DbPool) -> Self {
        Self {
            members: MemberRepository::new(pool.clone()),
            trainers: TrainerRepository::new(pool.clone()),
            classes: ClassRepository::new(pool.clone()),
            workouts: WorkoutRepository::new(pool.clone()),
            goals: GoalRepository::new(pool.clone()),
            nutrition: NutritionRepository::new(pool.clone()),
            measurements: MeasurementRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool),
        }
    }

    // Members

    pub async fn register_member(&self, input: &MemberInput) -> Result<Member> {
        let code = input.code()?;
        let details = input.parse()?;
        let member = self.members.create(code, details).await?;
        tracing::info!(member_id = %member.id, "Registered member {}", member.name);
        Ok(member)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.members.find_all().await
    }

    pub async fn member_count(&self) -> Result<i64> {
        self.members.count().await
    }

    pub async fn find_member(&self, id: &str) -> Result<Member> {
        self.members
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Member"))
    }

    pub async fn update_member(&self, id: &str, input: &MemberInput) -> Result<Member> {
        let details = input.parse()?;
        if !self.members.update(id, details).await? {
            return Err(AppError::not_found("Member"));
        }
        tracing::info!(member_id = %id, "Updated member profile");
        self.find_member(id).await
    }

    pub async fn update_membership(&self, id: &str, membership: &str) -> Result<Member> {
        let membership = MembershipType::parse(membership).ok_or_else(|| {
            AppError::validation("Membership type must be one of Basic, Premium, VIP")
        })?;
        if !self.members.update_membership(id, membership).await? {
            return Err(AppError::not_found("Member"));
        }
        tracing::info!(member_id = %id, membership = membership.as_str(), "Changed membership");
        self.find_member(id).await
    }

    /// Remove a member together with their bookings, workouts, goals, meals
    /// and measurements. Their payments stay on record.
    pub async fn cancel_membership(&self, id: &str) -> Result<Member> {
        let member = self.find_member(id).await?;
        self.members.delete(id).await?;
        tracing::info!(member_id = %id, "Cancelled membership of {}", member.name);
        Ok(member)
    }

    // Trainers

    pub async fn add_trainer(&self, input: &TrainerInput) -> Result<Trainer> {
        let trainer = self.trainers.create(input.parse()?).await?;
        tracing::info!(trainer_id = %trainer.id, "Added trainer {}", trainer.name);
        Ok(trainer)
    }

    pub async fn list_trainers(&self) -> Result<Vec<Trainer>> {
        self.trainers.find_all().await
    }

    pub async fn trainer_count(&self) -> Result<i64> {
        self.trainers.count().await
    }

    pub async fn find_trainer(&self, id: &str) -> Result<Trainer> {
        self.trainers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Trainer"))
    }

    /// Remove a trainer. Their classes stay on the schedule, unassigned.
    pub async fn remove_trainer(&self, id: &str) -> Result<Trainer> {
        let trainer = self.find_trainer(id).await?;
        self.trainers.delete(id).await?;
        tracing::info!(trainer_id = %id, "Removed trainer {}", trainer.name);
        Ok(trainer)
    }

    pub async fn trainer_schedule(&self, id: &str) -> Result<(Trainer, Vec<ClassOverview>)> {
        let trainer = self.find_trainer(id).await?;
        let classes = self.classes.find_by_trainer(id).await?;
        Ok((trainer, classes))
    }

    // Classes

    pub async fn schedule_class(&self, input: &ClassInput) -> Result<FitnessClass> {
        let class = self.classes.create(input.parse()?).await?;
        tracing::info!(class_id = %class.id, "Scheduled class {} ({})", class.name, class.schedule);
        Ok(class)
    }

    pub async fn list_classes(&self) -> Result<Vec<ClassOverview>> {
        self.classes.find_all().await
    }

    pub async fn class_count(&self) -> Result<i64> {
        self.classes.count().await
    }

    pub async fn find_class(&self, id: &str) -> Result<ClassOverview> {
        self.classes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Class"))
    }

    /// Assign a trainer to a class; a blank trainer id unassigns.
    pub async fn assign_trainer(&self, class_id: &str, trainer_id: &str) -> Result<ClassOverview> {
        let trainer_id = Some(trainer_id.trim())
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        if !self.classes.assign_trainer(class_id, trainer_id.clone()).await? {
            return Err(AppError::not_found("Class"));
        }
        tracing::info!(class_id = %class_id, trainer_id = ?trainer_id, "Assigned trainer");
        self.find_class(class_id).await
    }

    pub async fn book_class(&self, class_id: &str, member_id: &str) -> Result<ClassOverview> {
        match self.classes.book(class_id, member_id).await? {
            BookingOutcome::Booked => {
                tracing::info!(class_id = %class_id, member_id = %member_id, "Booked class");
                self.find_class(class_id).await
            }
            BookingOutcome::AlreadyBooked => Err(AppError::Conflict(format!(
                "Member {member_id} is already booked into class {class_id}"
            ))),
            BookingOutcome::ClassFull => {
                Err(AppError::Conflict(format!("Class {class_id} is full")))
            }
        }
    }

    pub async fn cancel_booking(&self, class_id: &str, member_id: &str) -> Result<()> {
        if !self.classes.cancel_booking(class_id, member_id).await? {
            return Err(AppError::not_found("Booking"));
        }
        tracing::info!(class_id = %class_id, member_id = %member_id, "Cancelled booking");
        Ok(())
    }

    pub async fn class_roster(&self, class_id: &str) -> Result<(ClassOverview, Vec<Booking>)> {
        let class = self.find_class(class_id).await?;
        let roster = self.classes.roster(class_id).await?;
        Ok((class, roster))
    }

    pub async fn member_bookings(&self, member_id: &str) -> Result<Vec<ClassOverview>> {
        self.find_member(member_id).await?;
        self.classes.find_by_member(member_id).await
    }

    pub async fn remove_class(&self, id: &str) -> Result<ClassOverview> {
        let class = self.find_class(id).await?;
        self.classes.delete(id).await?;
        tracing::info!(class_id = %id, "Removed class {}", class.name);
        Ok(class)
    }

    // Workouts

    pub async fn log_workout(&self, input: &WorkoutInput) -> Result<WorkoutLog> {
        let log = input.parse()?;
        let logged_at = entry_time(log.performed_on, Utc::now())?;
        let workout = self.workouts.create(log, logged_at).await?;
        tracing::info!(
            member_id = %workout.member_id,
            exercise = %workout.exercise_type,
            minutes = workout.duration_minutes,
            "Logged workout"
        );
        Ok(workout)
    }

    pub async fn workout_count(&self) -> Result<i64> {
        self.workouts.count().await
    }

    pub async fn find_workout(&self, id: &str) -> Result<WorkoutLog> {
        self.workouts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))
    }

    /// Fix a logged workout. The member cannot change.
    pub async fn correct_workout(&self, id: &str, input: &WorkoutInput) -> Result<WorkoutLog> {
        let existing = self.find_workout(id).await?;
        let mut log = input.parse()?;
        log.member_id = existing.member_id;
        let logged_at = match log.performed_on {
            Some(day) if day != existing.logged_at.date_naive() => {
                Some(entry_time(Some(day), Utc::now())?)
            }
            _ => None,
        };
        self.workouts.update(id, log, logged_at).await?;
        tracing::info!(workout_id = %id, "Corrected workout");
        self.find_workout(id).await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<()> {
        if !self.workouts.delete(id).await? {
            return Err(AppError::not_found("Workout"));
        }
        tracing::info!(workout_id = %id, "Deleted workout");
        Ok(())
    }

    pub async fn member_workouts(&self, member_id: &str) -> Result<Vec<WorkoutLog>> {
        self.find_member(member_id).await?;
        self.workouts.find_by_member(member_id).await
    }

    pub async fn recent_workouts(&self, limit: i64) -> Result<Vec<WorkoutLogWithMember>> {
        self.workouts.find_recent(limit).await
    }

    // Goals

    pub async fn set_goal(&self, input: &GoalInput) -> Result<Goal> {
        let goal = self.goals.create(input.parse()?).await?;
        tracing::info!(
            member_id = %goal.member_id,
            goal_type = goal.goal_type.as_str(),
            target = goal.target_value,
            "Set goal"
        );
        Ok(goal)
    }

    /// Every goal with its current progress.
    pub async fn list_goals(&self) -> Result<Vec<GoalProgress>> {
        let mut progress = Vec::new();
        for entry in self.goals.find_all().await? {
            progress.push(self.goal_progress(entry.goal, entry.member_name).await?);
        }
        Ok(progress)
    }

    pub async fn member_goals(&self, member_id: &str) -> Result<Vec<GoalProgress>> {
        let member = self.find_member(member_id).await?;
        let mut progress = Vec::new();
        for goal in self.goals.find_by_member(member_id).await? {
            progress.push(self.goal_progress(goal, member.name.clone()).await?);
        }
        Ok(progress)
    }

    pub async fn achieve_goal(&self, id: &str) -> Result<Goal> {
        self.close_goal(id, GoalStatus::Achieved).await
    }

    pub async fn abandon_goal(&self, id: &str) -> Result<Goal> {
        self.close_goal(id, GoalStatus::Abandoned).await
    }

    pub async fn delete_goal(&self, id: &str) -> Result<()> {
        if !self.goals.delete(id).await? {
            return Err(AppError::not_found("Goal"));
        }
        tracing::info!(goal_id = %id, "Deleted goal");
        Ok(())
    }

    async fn find_goal(&self, id: &str) -> Result<Goal> {
        self.goals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))
    }

    async fn close_goal(&self, id: &str, status: GoalStatus) -> Result<Goal> {
        let goal = self.find_goal(id).await?;
        if !goal.status.can_transition_to(status)
            || !self.goals.update_status(id, status).await?
        {
            return Err(AppError::Conflict(format!(
                "Goal is already {}",
                goal.status.label().to_lowercase()
            )));
        }
        tracing::info!(goal_id = %id, status = status.as_str(), "Closed goal");
        self.find_goal(id).await
    }

    async fn goal_progress(&self, goal: Goal, member_name: String) -> Result<GoalProgress> {
        let current_value = match goal.goal_type {
            GoalType::CaloriesToBurn => {
                self.workouts
                    .totals_since(&goal.member_id, goal.created_at)
                    .await?
                    .0
            }
            GoalType::RunningDistance => {
                self.workouts
                    .totals_since(&goal.member_id, goal.created_at)
                    .await?
                    .1
            }
            GoalType::WeightLoss | GoalType::MuscleGain => {
                let measurements = self.measurements.find_by_member(&goal.member_id).await?;
                let change = weight_change(goal.created_at, &measurements);
                if goal.goal_type == GoalType::WeightLoss {
                    -change
                } else {
                    change
                }
            }
        };
        Ok(GoalProgress {
            goal,
            member_name,
            current_value,
        })
    }

    // Nutrition

    pub async fn log_meal(&self, input: &MealInput) -> Result<NutritionLog> {
        let meal = input.parse()?;
        let logged_at = entry_time(meal.eaten_on, Utc::now())?;
        let log = self.nutrition.create(meal, logged_at).await?;
        tracing::info!(
            member_id = %log.member_id,
            meal_type = log.meal_type.as_str(),
            calories = log.calories,
            "Logged meal"
        );
        Ok(log)
    }

    pub async fn member_meals(&self, member_id: &str) -> Result<Vec<NutritionLog>> {
        self.find_member(member_id).await?;
        self.nutrition.find_by_member(member_id).await
    }

    pub async fn recent_meals(&self, limit: i64) -> Result<Vec<NutritionLogWithMember>> {
        self.nutrition.find_recent(limit).await
    }

    pub async fn delete_meal(&self, id: &str) -> Result<()> {
        if !self.nutrition.delete(id).await? {
            return Err(AppError::not_found("Meal"));
        }
        tracing::info!(meal_id = %id, "Deleted meal");
        Ok(())
    }

    // Measurements

    pub async fn record_measurement(&self, input: &MeasurementInput) -> Result<Measurement> {
        let measurement = self
            .measurements
            .create(input.parse()?, Utc::now())
            .await?;
        tracing::info!(member_id = %measurement.member_id, "Recorded measurement");
        Ok(measurement)
    }

    pub async fn member_measurements(&self, member_id: &str) -> Result<Vec<Measurement>> {
        self.find_member(member_id).await?;
        self.measurements.find_by_member(member_id).await
    }

    // Payments

    pub async fn process_payment(&self, input: &PaymentInput) -> Result<Transaction> {
        let transaction = self.transactions.create(input.parse()?).await?;
        tracing::info!(
            transaction_id = %transaction.id,
            amount = transaction.amount,
            "Processed payment for {}",
            transaction.member_name
        );
        Ok(transaction)
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.transactions.find_all().await
    }

    pub async fn find_transaction(&self, id: &str) -> Result<Transaction> {
        self.transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction"))
    }

    // Progress

    pub async fn member_progress(&self, member_id: &str) -> Result<MemberProgress> {
        let member = self.find_member(member_id).await?;
        let workouts = self.workouts.find_by_member(member_id).await?;
        let meals = self.nutrition.find_by_member(member_id).await?;
        let measurements = self.measurements.find_by_member(member_id).await?;
        let goals = self.member_goals(member_id).await?;
        let classes = self.classes.find_by_member(member_id).await?;

        Ok(MemberProgress {
            member,
            timeline: build_timeline(workouts, meals, measurements),
            goals,
            classes,
        })
    }
}

/// When an entry dated `day` is stored. Today (or no date) means now;
/// earlier days are stored at noon UTC.
fn entry_time(day: Option<NaiveDate>, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let Some(day) = day else {
        return Ok(now);
    };
    let today = now.date_naive();
    if day > today {
        return Err(AppError::validation("Date cannot be in the future"));
    }
    if day == today {
        return Ok(now);
    }
    Ok(day.and_time(NaiveTime::MIN + chrono::Duration::hours(12)).and_utc())
}

/// Latest weight minus the baseline weight. The baseline is the last weight
/// recorded at or before `since`, or the first one after it.
fn weight_change(since: DateTime<Utc>, measurements: &[Measurement]) -> f64 {
    let weights: Vec<(DateTime<Utc>, f64)> = measurements
        .iter()
        .filter_map(|m| m.weight_kg.map(|w| (m.recorded_at, w)))
        .collect();

    let baseline = weights
        .iter()
        .rev()
        .find(|(at, _)| *at <= since)
        .or_else(|| weights.iter().find(|(at, _)| *at > since));

    match (baseline, weights.iter().max_by_key(|(at, _)| *at)) {
        (Some((_, start)), Some((_, latest))) => latest - start,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;
    use chrono::{Duration, TimeZone};

    fn setup_center() -> FitnessCenter {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        FitnessCenter::new(pool)
    }

    fn member_input(id: &str, name: &str) -> MemberInput {
        MemberInput {
            id: id.to_string(),
            name: name.to_string(),
            age: "30".to_string(),
            membership_type: "Premium".to_string(),
            fitness_goal: "Weight Loss".to_string(),
            ..Default::default()
        }
    }

    fn weighing(at: DateTime<Utc>, kg: f64) -> Measurement {
        Measurement {
            id: at.to_rfc3339(),
            member_id: "M001".to_string(),
            weight_kg: Some(kg),
            running_speed_kmh: None,
            recorded_at: at,
        }
    }

    #[test]
    fn test_weight_change_uses_baseline_before_goal() {
        let start = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        let series = vec![
            weighing(start - Duration::days(5), 82.0),
            weighing(start - Duration::days(1), 80.0),
            weighing(start + Duration::days(7), 78.5),
        ];
        assert_eq!(weight_change(start, &series), -1.5);
    }

    #[test]
    fn test_weight_change_falls_back_to_first_after_goal() {
        let start = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
        let series = vec![
            weighing(start + Duration::days(1), 70.0),
            weighing(start + Duration::days(9), 71.0),
        ];
        assert_eq!(weight_change(start, &series), 1.0);
        assert_eq!(weight_change(start, &[]), 0.0);
    }

    #[test]
    fn test_entry_time() {
        let now = Utc.with_ymd_and_hms(2026, 2, 15, 18, 45, 0).unwrap();
        assert_eq!(entry_time(None, now).unwrap(), now);
        assert_eq!(entry_time(Some(now.date_naive()), now).unwrap(), now);
        assert_eq!(
            entry_time(NaiveDate::from_ymd_opt(2026, 2, 10), now).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap()
        );
        assert!(matches!(
            entry_time(NaiveDate::from_ymd_opt(2026, 2, 16), now),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_register_then_find_returns_same_member() {
        let center = setup_center();
        let registered = center
            .register_member(&member_input("M010", "John Doe"))
            .await
            .unwrap();

        let found = center.find_member("M010").await.unwrap();

        assert_eq!(found, registered);
        assert_eq!(found.membership_type, MembershipType::Premium);
        assert_eq!(found.fitness_goal.as_deref(), Some("Weight Loss"));
    }

    #[tokio::test]
    async fn test_register_generates_code() {
        let center = setup_center();
        let first = center.register_member(&member_input("", "A")).await.unwrap();
        let second = center.register_member(&member_input("", "B")).await.unwrap();
        assert_eq!(first.id, "M001");
        assert_eq!(second.id, "M002");
    }

    #[tokio::test]
    async fn test_update_membership() {
        let center = setup_center();
        center
            .register_member(&member_input("M001", "John Doe"))
            .await
            .unwrap();

        let member = center.update_membership("M001", "vip").await.unwrap();
        assert_eq!(member.membership_type, MembershipType::Vip);

        assert!(matches!(
            center.update_membership("M001", "Gold").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            center.update_membership("M404", "Basic").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_calorie_goal_progress() {
        let center = setup_center();
        center
            .register_member(&member_input("M001", "John Doe"))
            .await
            .unwrap();
        center
            .set_goal(&GoalInput {
                member_id: "M001".to_string(),
                goal_type: "Calories to Burn".to_string(),
                target_value: "1000".to_string(),
                duration_weeks: String::new(),
            })
            .await
            .unwrap();
        center
            .log_workout(&WorkoutInput {
                member_id: "M001".to_string(),
                exercise_type: "Cycling".to_string(),
                duration_minutes: "45".to_string(),
                calories_burned: "250".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let goals = center.member_goals("M001").await.unwrap();

        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].current_value, 250.0);
        assert_eq!(goals[0].percent(), 25.0);
        assert_eq!(goals[0].member_name, "John Doe");
    }

    #[tokio::test]
    async fn test_closed_goal_cannot_reopen_or_switch() {
        let center = setup_center();
        center
            .register_member(&member_input("M001", "John Doe"))
            .await
            .unwrap();
        let goal = center
            .set_goal(&GoalInput {
                member_id: "M001".to_string(),
                goal_type: "Weight Loss".to_string(),
                target_value: "5".to_string(),
                duration_weeks: "6".to_string(),
            })
            .await
            .unwrap();

        let achieved = center.achieve_goal(&goal.id).await.unwrap();
        assert_eq!(achieved.status, GoalStatus::Achieved);

        assert!(matches!(
            center.abandon_goal(&goal.id).await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            center.achieve_goal("missing").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_book_class_errors() {
        let center = setup_center();
        center.register_member(&member_input("M001", "A")).await.unwrap();
        center.register_member(&member_input("M002", "B")).await.unwrap();
        center
            .schedule_class(&ClassInput {
                id: "C001".to_string(),
                name: "Spin".to_string(),
                capacity: "1".to_string(),
                schedule: "Friday, 7:00 AM".to_string(),
                trainer_id: String::new(),
            })
            .await
            .unwrap();

        let class = center.book_class("C001", "M001").await.unwrap();
        assert!(class.is_full());

        let err = center.book_class("C001", "M001").await.unwrap_err();
        assert_eq!(err.to_string(), "Member M001 is already booked into class C001");
        let err = center.book_class("C001", "M002").await.unwrap_err();
        assert_eq!(err.to_string(), "Class C001 is full");
    }

    #[tokio::test]
    async fn test_correct_workout_keeps_member() {
        let center = setup_center();
        center.register_member(&member_input("M001", "A")).await.unwrap();
        center.register_member(&member_input("M002", "B")).await.unwrap();
        let workout = center
            .log_workout(&WorkoutInput {
                member_id: "M001".to_string(),
                exercise_type: "Running".to_string(),
                duration_minutes: "30".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let corrected = center
            .correct_workout(
                &workout.id,
                &WorkoutInput {
                    member_id: "M002".to_string(),
                    exercise_type: "Running".to_string(),
                    duration_minutes: "35".to_string(),
                    distance_km: "6.2".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(corrected.member_id, "M001");
        assert_eq!(corrected.duration_minutes, 35);
        assert_eq!(corrected.logged_at, workout.logged_at);
        assert!(corrected.is_corrected());
    }

    #[tokio::test]
    async fn test_member_progress_timeline() {
        let center = setup_center();
        center.register_member(&member_input("M001", "A")).await.unwrap();
        center
            .record_measurement(&MeasurementInput {
                member_id: "M001".to_string(),
                weight_kg: "80".to_string(),
                running_speed_kmh: "10".to_string(),
            })
            .await
            .unwrap();
        center
            .log_meal(&MealInput {
                member_id: "M001".to_string(),
                meal_type: "Lunch".to_string(),
                food_items: "Salad".to_string(),
                calories: "350".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let progress = center.member_progress("M001").await.unwrap();

        assert_eq!(progress.timeline.len(), 2);
        assert_eq!(progress.timeline[0].kind(), "Measurement");
        assert_eq!(progress.timeline[1].kind(), "Meal");
        assert!(matches!(
            center.member_progress("M404").await,
            Err(AppError::NotFound(_))
        ));
    }
}
