use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::center::FitnessCenter;
use crate::handlers::{
    classes, dashboard, goals, health, members, nutrition, payments, reports, trainers, workouts,
};

pub fn create_router(center: FitnessCenter) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Member routes
        .route("/members", get(members::list).post(members::create))
        .route("/members/new", get(members::new_page))
        .route("/members/{id}", get(members::show))
        .route(
            "/members/{id}/edit",
            get(members::edit_page).post(members::update),
        )
        .route("/members/{id}/membership", post(members::change_membership))
        .route("/members/{id}/measurements", post(members::add_measurement))
        .route("/members/{id}/delete", post(members::delete))
        // Trainer routes
        .route("/trainers", get(trainers::list).post(trainers::create))
        .route("/trainers/{id}", get(trainers::show))
        .route("/trainers/{id}/delete", post(trainers::delete))
        // Class routes
        .route("/classes", get(classes::list).post(classes::create))
        .route("/classes/{id}", get(classes::show))
        .route("/classes/{id}/book", post(classes::book))
        .route(
            "/classes/{id}/bookings/{member_id}/delete",
            post(classes::cancel_booking),
        )
        .route("/classes/{id}/trainer", post(classes::assign_trainer))
        .route("/classes/{id}/delete", post(classes::delete))
        // Workout routes
        .route("/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/workouts/{id}/edit",
            get(workouts::edit_page).post(workouts::update),
        )
        .route("/workouts/{id}/delete", post(workouts::delete))
        // Goal routes
        .route("/goals", get(goals::list).post(goals::create))
        .route("/goals/{id}/achieve", post(goals::achieve))
        .route("/goals/{id}/abandon", post(goals::abandon))
        .route("/goals/{id}/delete", post(goals::delete))
        // Nutrition routes
        .route("/nutrition", get(nutrition::list).post(nutrition::create))
        .route("/nutrition/{id}/delete", post(nutrition::delete))
        // Payment routes
        .route("/payments", get(payments::list).post(payments::create))
        .route("/payments/{id}", get(payments::receipt))
        // Report routes
        .route("/reports", get(reports::index))
        .route("/reports/workouts", get(reports::workouts))
        .route("/reports/fitness", get(reports::fitness))
        .route("/reports/nutrition", get(reports::nutrition))
        .route("/health", get(health::health_check))
        .with_state(center)
        .layer(TraceLayer::new_for_http())
}
