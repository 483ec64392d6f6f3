//! Sample data for a fresh database.

use chrono::{Duration, Utc};

use crate::center::FitnessCenter;
use crate::error::Result;
use crate::models::{
    ClassInput, MemberInput, NewMeasurement, PaymentInput, TrainerInput,
};

/// Load the sample members, trainers, classes and payments. Does nothing and
/// returns false when the database already has members.
pub async fn seed_sample_data(center: &FitnessCenter) -> Result<bool> {
    if center.member_count().await? > 0 {
        tracing::info!("Database already has members, skipping sample data");
        return Ok(false);
    }

    for (id, name, age, membership, goal) in [
        ("M001", "John Doe", "30", "Premium", "Weight Loss"),
        ("M002", "Jane Smith", "25", "Basic", "Muscle Gain"),
    ] {
        center
            .register_member(&MemberInput {
                id: id.to_string(),
                name: name.to_string(),
                age: age.to_string(),
                membership_type: membership.to_string(),
                fitness_goal: goal.to_string(),
                ..Default::default()
            })
            .await?;
    }

    let now = Utc::now();
    for (weight_kg, speed, days_ago) in [(80.0, 10.0, 7), (78.0, 11.0, 0)] {
        center
            .measurements
            .create(
                NewMeasurement {
                    member_id: "M001".to_string(),
                    weight_kg: Some(weight_kg),
                    running_speed_kmh: Some(speed),
                },
                now - Duration::days(days_ago),
            )
            .await?;
    }

    for (id, name, specialization) in [
        ("T001", "Mike Johnson", "Yoga"),
        ("T002", "Sara Brown", "Strength Training"),
    ] {
        center
            .add_trainer(&TrainerInput {
                id: id.to_string(),
                name: name.to_string(),
                specialization: specialization.to_string(),
            })
            .await?;
    }

    for (id, name, capacity, schedule, trainer_id) in [
        ("C001", "Morning Yoga", "15", "Monday, 8:00 AM", "T001"),
        ("C002", "HIIT Training", "10", "Tuesday, 6:00 PM", "T002"),
    ] {
        center
            .schedule_class(&ClassInput {
                id: id.to_string(),
                name: name.to_string(),
                capacity: capacity.to_string(),
                schedule: schedule.to_string(),
                trainer_id: trainer_id.to_string(),
            })
            .await?;
    }

    for (member_id, amount, service) in [
        ("M001", "50.00", "Premium Membership"),
        ("M002", "30.00", "Basic Membership"),
    ] {
        center
            .process_payment(&PaymentInput {
                member_id: member_id.to_string(),
                amount: amount.to_string(),
                service: service.to_string(),
            })
            .await?;
    }

    tracing::info!("Loaded sample data");
    Ok(true)
}
