#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fitcenter::center::FitnessCenter;
use fitcenter::db::{create_memory_pool, DbPool};
use fitcenter::migrations::run_migrations_for_tests;
use fitcenter::models::{ClassInput, Member, MemberInput, TrainerInput};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    fitcenter::routes::create_router(FitnessCenter::new(pool))
}

pub fn create_test_center(pool: &DbPool) -> FitnessCenter {
    FitnessCenter::new(pool.clone())
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without a location")
        .to_str()
        .unwrap()
}

// Test data creation helpers
pub async fn create_test_member(pool: &DbPool, id: &str, name: &str) -> Member {
    create_test_center(pool)
        .register_member(&MemberInput {
            id: id.to_string(),
            name: name.to_string(),
            age: "30".to_string(),
            membership_type: "Basic".to_string(),
            fitness_goal: "Weight Loss".to_string(),
            ..Default::default()
        })
        .await
        .unwrap()
}

pub async fn create_test_trainer(pool: &DbPool, id: &str, name: &str) {
    create_test_center(pool)
        .add_trainer(&TrainerInput {
            id: id.to_string(),
            name: name.to_string(),
            specialization: "Yoga".to_string(),
        })
        .await
        .unwrap();
}

pub async fn create_test_class(pool: &DbPool, id: &str, name: &str, capacity: i64) {
    create_test_center(pool)
        .schedule_class(&ClassInput {
            id: id.to_string(),
            name: name.to_string(),
            capacity: capacity.to_string(),
            schedule: "Monday, 8:00 AM".to_string(),
            trainer_id: String::new(),
        })
        .await
        .unwrap();
}
