mod common;

use std::io::Cursor;

use fitcenter::db::DbPool;
use fitcenter::text::TextInterface;

async fn run_script(pool: &DbPool, script: &str) -> String {
    colored::control::set_override(false);
    let center = common::create_test_center(pool);
    let mut text = TextInterface::new(center, Cursor::new(script.to_string()), Vec::new());
    text.run().await.unwrap();
    String::from_utf8(text.into_output()).unwrap()
}

#[tokio::test]
async fn test_exit_immediately() {
    let pool = common::setup_test_db();

    let output = run_script(&pool, "0\n").await;

    assert!(output.contains("Welcome to Smart Fitness Management System (Text Mode)"));
    assert!(output.contains("Enter your choice (0-13): "));
    assert!(output.trim_end().ends_with("Thank you for using SFMS. Goodbye!"));
}

#[tokio::test]
async fn test_end_of_input_exits() {
    let pool = common::setup_test_db();

    let output = run_script(&pool, "").await;

    assert!(output.contains("Thank you for using SFMS. Goodbye!"));
}

#[tokio::test]
async fn test_invalid_choice() {
    let pool = common::setup_test_db();

    let output = run_script(&pool, "42\n0\n").await;

    assert!(output.contains("Invalid choice. Please try again."));
}

#[tokio::test]
async fn test_register_and_view_member() {
    let pool = common::setup_test_db();

    let output = run_script(
        &pool,
        "1\nM001\nJohn Doe\n30\nPremium\nWeight Loss\n\n\n2\n0\n",
    )
    .await;

    assert!(output.contains("Member John Doe registered successfully with ID M001!"));
    assert!(output.contains(
        "ID: M001, Name: John Doe, Age: 30, Membership: Premium, Goals: Weight Loss"
    ));
}

#[tokio::test]
async fn test_register_with_invalid_age_uses_default() {
    let pool = common::setup_test_db();

    let output = run_script(&pool, "1\nM001\nJane\nabc\nBasic\n\n\n\n0\n").await;

    assert!(output.contains("Invalid age. Using default value of 30."));
    let member = common::create_test_center(&pool)
        .find_member("M001")
        .await
        .unwrap();
    assert_eq!(member.age, 30);
}

#[tokio::test]
async fn test_domain_error_is_printed_and_menu_continues() {
    let pool = common::setup_test_db();

    let output = run_script(&pool, "6\nM999\n2\n0\n").await;

    assert!(output.contains("Error: Member not found"));
    assert!(output.contains("No members found."));
}

#[tokio::test]
async fn test_book_class() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    common::create_test_class(&pool, "C001", "Morning Yoga", 15).await;

    let output = run_script(&pool, "3\nM001\n1\n3\nM001\n7\n0\n").await;

    assert!(output.contains("1. Morning Yoga - Monday, 8:00 AM - 0/15 enrolled"));
    assert!(output.contains("Successfully booked Morning Yoga for John Doe!"));
    assert!(output.contains("Invalid class number."));
}

#[tokio::test]
async fn test_book_class_rejects_non_number() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    common::create_test_class(&pool, "C001", "Morning Yoga", 15).await;

    let output = run_script(&pool, "3\nM001\nfirst\n0\n").await;

    assert!(output.contains("Invalid input. Please enter a number."));
}

#[tokio::test]
async fn test_payment_and_revenue_report() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;

    let output = run_script(&pool, "4\nM001\n50\nMonthly Membership\n5\n0\n").await;

    assert!(output.contains("Payment processed successfully!"));
    assert!(output.contains("Member: John Doe"));
    assert!(output.contains("Amount Paid: $50.00"));
    assert!(output.contains("Total Revenue: $50.00"));
    assert!(output.contains("Transactions: 1"));
    assert!(output.contains("Active Members: 1"));
}

#[tokio::test]
async fn test_log_workout_then_view_progress() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;

    let output = run_script(
        &pool,
        "7\nM001\nRunning\n30\n300\n5\n\n\n6\nM001\n0\n",
    )
    .await;

    assert!(output.contains("Logged 30 minutes of Running."));
    assert!(output.contains("Progress Data for Member M001 (John Doe):"));
    assert!(output.contains("exercise_type: Running"));
    assert!(output.contains("distance: 5.00 km"));
}

#[tokio::test]
async fn test_update_member_keeps_blank_fields() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;

    let output = run_script(&pool, "11\nM001\n\n35\n\n\n\n\n0\n").await;

    assert!(output.contains("Name [John Doe]: "));
    assert!(output.contains("Member John Doe updated successfully!"));
    let member = common::create_test_center(&pool)
        .find_member("M001")
        .await
        .unwrap();
    assert_eq!(member.age, 35);
}

#[tokio::test]
async fn test_cancel_membership_needs_confirmation() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;

    let output = run_script(&pool, "12\nM001\nno\n12\nM001\nyes\n0\n").await;

    assert!(output.contains("Cancellation aborted."));
    assert!(output.contains("Membership of John Doe cancelled."));
    assert_eq!(
        common::create_test_center(&pool).member_count().await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_membership_analysis_report() {
    let pool = common::setup_test_db();
    common::create_test_member(&pool, "M001", "John Doe").await;
    common::create_test_member(&pool, "M002", "Jane Smith").await;

    let output = run_script(&pool, "13\n1\n0\n").await;

    assert!(output.contains("Total Members: 2"));
    assert!(output.contains("Most Popular Goal: Weight Loss"));
}
