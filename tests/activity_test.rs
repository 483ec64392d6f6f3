mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use fitcenter::models::{GoalInput, GoalStatus, WorkoutInput};

#[tokio::test]
async fn test_log_workout() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let app = common::create_test_app(pool.clone());

    let response = common::post_form(
        app,
        "/workouts",
        "member_id=M001&exercise_type=Running&duration_minutes=45&calories_burned=420&distance_km=7.5&notes=&date=",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let workouts = common::create_test_center(&pool)
        .member_workouts("M001")
        .await
        .unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].duration_minutes, 45);
    assert_eq!(workouts[0].distance_km, Some(7.5));

    let app = common::create_test_app(pool);
    let body = common::body_string(common::get(app, "/workouts").await).await;
    assert!(body.contains("John Doe"));
    assert!(body.contains("7.50 km"));
}

#[tokio::test]
async fn test_log_workout_for_unknown_member_rejected() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let app = common::create_test_app(pool.clone());

    let response = common::post_form(
        app,
        "/workouts",
        "member_id=M999&exercise_type=Running&duration_minutes=45&calories_burned=420",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(common::body_string(response)
        .await
        .contains("Member not found"));
    assert!(common::create_test_center(&pool)
        .recent_workouts(10)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_log_workout_in_future_rejected() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let app = common::create_test_app(pool);
    let tomorrow = Utc::now().date_naive() + Duration::days(1);

    let response = common::post_form(
        app,
        "/workouts",
        &format!(
            "member_id=M001&exercise_type=Yoga&duration_minutes=60&calories_burned=200&date={tomorrow}"
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::body_string(response)
        .await
        .contains("Date cannot be in the future"));
}

#[tokio::test]
async fn test_correct_and_delete_workout() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let center = common::create_test_center(&pool);
    let workout = center
        .log_workout(&WorkoutInput {
            member_id: "M001".to_string(),
            exercise_type: "Cycling".to_string(),
            duration_minutes: "30".to_string(),
            calories_burned: "250".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let app = common::create_test_app(pool.clone());
    let response = common::get(app, &format!("/workouts/{}/edit", workout.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::create_test_app(pool.clone());
    let response = common::post_form(
        app,
        &format!("/workouts/{}/edit", workout.id),
        "member_id=M001&exercise_type=Cycling&duration_minutes=40&calories_burned=320",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let corrected = center.find_workout(&workout.id).await.unwrap();
    assert_eq!(corrected.duration_minutes, 40);
    assert!(corrected.is_corrected());

    let app = common::create_test_app(pool.clone());
    let response =
        common::post_form(app, &format!("/workouts/{}/delete", workout.id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(center.find_workout(&workout.id).await.is_err());
}

#[tokio::test]
async fn test_edit_unknown_workout_returns_404() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = common::get(app, "/workouts/nope/edit").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_goal_and_track_progress() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let app = common::create_test_app(pool.clone());

    let response = common::post_form(
        app,
        "/goals",
        "member_id=M001&goal_type=running_distance&target_value=10&duration_weeks=4",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let center = common::create_test_center(&pool);
    center
        .log_workout(&WorkoutInput {
            member_id: "M001".to_string(),
            exercise_type: "Running".to_string(),
            duration_minutes: "30".to_string(),
            calories_burned: "300".to_string(),
            distance_km: "5".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let goals = center.member_goals("M001").await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].current_value, 5.0);
    assert_eq!(goals[0].percent_display(), "50%");

    let app = common::create_test_app(pool);
    let body = common::body_string(common::get(app, "/goals").await).await;
    assert!(body.contains("Running Distance"));
    assert!(body.contains("50%"));
}

#[tokio::test]
async fn test_set_goal_for_unknown_member_rejected() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let app = common::create_test_app(pool);

    let response = common::post_form(
        app,
        "/goals",
        "member_id=M999&goal_type=weight_loss&target_value=5",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_achieve_goal_only_once() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let center = common::create_test_center(&pool);
    let goal = center
        .set_goal(&GoalInput {
            member_id: "M001".to_string(),
            goal_type: "Weight Loss".to_string(),
            target_value: "5".to_string(),
            duration_weeks: String::new(),
        })
        .await
        .unwrap();

    let app = common::create_test_app(pool.clone());
    let response =
        common::post_form(app, &format!("/goals/{}/achieve", goal.id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let goals = center.member_goals("M001").await.unwrap();
    assert_eq!(goals[0].goal.status, GoalStatus::Achieved);

    let app = common::create_test_app(pool);
    let response =
        common::post_form(app, &format!("/goals/{}/abandon", goal.id), "").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        common::body_string(response).await,
        "Goal is already achieved"
    );
}

#[tokio::test]
async fn test_log_meal_and_delete() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let app = common::create_test_app(pool.clone());

    let response = common::post_form(
        app,
        "/nutrition",
        "member_id=M001&meal_type=breakfast&food_items=Oatmeal&calories=350&protein_g=12&carbs_g=60&fat_g=6&date=",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let center = common::create_test_center(&pool);
    let meals = center.member_meals("M001").await.unwrap();
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].calories, 350);

    let app = common::create_test_app(pool.clone());
    let body = common::body_string(common::get(app, "/nutrition").await).await;
    assert!(body.contains("Oatmeal"));
    assert!(body.contains("Stay hydrated!"));

    let app = common::create_test_app(pool);
    let response =
        common::post_form(app, &format!("/nutrition/{}/delete", meals[0].id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(center.member_meals("M001").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_log_meal_invalid_type_rerenders() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    let app = common::create_test_app(pool);

    let response = common::post_form(
        app,
        "/nutrition",
        "member_id=M001&meal_type=brunch&food_items=Eggs&calories=300",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::body_string(response)
        .await
        .contains("Meal type must be one of Breakfast, Lunch, Dinner, Snack"));
}
