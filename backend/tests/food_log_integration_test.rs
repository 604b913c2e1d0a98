//! Integration tests for food entries and the derived daily totals

mod common;

use axum::http::StatusCode;
use calorie_tracker_backend::services::food_log::FoodLogService;
use calorie_tracker_shared::types::CreateFoodEntryRequest;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::task::JoinSet;
use uuid::Uuid;

const DAY: &str = "2024-03-01";

async fn add_entry(app: &common::TestApp, token: &str, body: Value) -> String {
    let (status, response) = app.post_auth("/api/food/entry", &body.to_string(), token).await;
    assert_eq!(status, StatusCode::CREATED, "add entry failed: {}", response);

    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Food entry added successfully");
    response["entryId"].as_str().unwrap().to_string()
}

async fn daily_total(app: &common::TestApp, token: &str, date: &str) -> Value {
    let (status, response) = app
        .get_auth(&format!("/api/food/daily-total/{}", date), token)
        .await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&response).unwrap()
}

fn apple(quantity: f64) -> Value {
    json!({
        "food_name": "Apple",
        "calories": 95,
        "protein": 0.5,
        "carbs": 25,
        "fat": 0.3,
        "serving_size": "1 medium apple",
        "quantity": quantity,
        "date": DAY
    })
}

fn chicken(quantity: f64) -> Value {
    json!({
        "food_name": "Chicken Breast",
        "calories": 165,
        "protein": 31,
        "carbs": 0,
        "fat": 3.6,
        "serving_size": "3 oz cooked",
        "quantity": quantity,
        "date": DAY
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_totals_follow_add_update_delete() {
    let app = common::TestApp::new().await;
    let user = app.register_user(json!({ "target_calories": 2000 })).await;

    let apple_id = add_entry(&app, &user.token, apple(2.0)).await;
    let totals = daily_total(&app, &user.token, DAY).await;
    assert_eq!(totals["total_calories"], 190.0);
    assert_eq!(totals["total_protein"], 1.0);
    assert_eq!(totals["total_carbs"], 50.0);

    let chicken_id = add_entry(&app, &user.token, chicken(1.0)).await;
    let totals = daily_total(&app, &user.token, DAY).await;
    assert_eq!(totals["total_calories"], 355.0);
    assert_eq!(totals["total_protein"], 32.0);
    assert_eq!(totals["total_fat"], 4.2);

    // Halving the apples removes 95 kcal
    let body = json!({ "quantity": 1 });
    let (status, response) = app
        .put_auth(&format!("/api/food/entry/{}", apple_id), &body.to_string(), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Food entry updated successfully");

    let totals = daily_total(&app, &user.token, DAY).await;
    assert_eq!(totals["total_calories"], 260.0);
    assert_eq!(totals["target_calories"], 2000);
    assert_eq!(totals["remaining_calories"], 1740.0);
    assert_eq!(totals["progress_percent"], 13.0);

    let (status, _) = app
        .delete_auth(&format!("/api/food/entry/{}", chicken_id), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .delete_auth(&format!("/api/food/entry/{}", apple_id), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Last entry gone: the row stays, all zeros
    let totals = daily_total(&app, &user.token, DAY).await;
    assert_eq!(totals["total_calories"], 0.0);
    assert_eq!(totals["total_protein"], 0.0);
    assert_eq!(totals["progress_percent"], 0.0);

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_entries_listed_newest_first() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let first = add_entry(&app, &user.token, apple(1.0)).await;
    let second = add_entry(&app, &user.token, chicken(1.5)).await;

    let (status, response) = app
        .get_auth(&format!("/api/food/entries/{}", DAY), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let entries: Vec<Value> = serde_json::from_str(&response).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], second);
    assert_eq!(entries[1]["id"], first);
    assert_eq!(entries[0]["quantity"], 1.5);
    assert_eq!(entries[0]["serving_size"], "3 oz cooked");

    let (_, response) = app.get_auth("/api/food/entries/2024-03-02", &user.token).await;
    let entries: Vec<Value> = serde_json::from_str(&response).unwrap();
    assert!(entries.is_empty());

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_entries_are_private() {
    let app = common::TestApp::new().await;
    let alice = app.create_test_user().await;
    let bob = app.create_test_user().await;

    let entry_id = add_entry(&app, &alice.token, apple(1.0)).await;

    let body = json!({ "quantity": 3 });
    let (status, _) = app
        .put_auth(&format!("/api/food/entry/{}", entry_id), &body.to_string(), &bob.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .delete_auth(&format!("/api/food/entry/{}", entry_id), &bob.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, response) = app
        .get_auth(&format!("/api/food/entries/{}", DAY), &bob.token)
        .await;
    let entries: Vec<Value> = serde_json::from_str(&response).unwrap();
    assert!(entries.is_empty());

    // Alice's totals are untouched
    let totals = daily_total(&app, &alice.token, DAY).await;
    assert_eq!(totals["total_calories"], 95.0);

    app.cleanup_user(&alice).await;
    app.cleanup_user(&bob).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_invalid_entries_rejected() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let mut zero_quantity = apple(1.0);
    zero_quantity["quantity"] = json!(0);
    let mut negative_calories = apple(1.0);
    negative_calories["calories"] = json!(-5);
    let mut blank_name = apple(1.0);
    blank_name["food_name"] = json!("");

    for body in [zero_quantity, negative_calories, blank_name] {
        let (status, _) = app.post_auth("/api/food/entry", &body.to_string(), &user.token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }

    let totals = daily_total(&app, &user.token, DAY).await;
    assert_eq!(totals["total_calories"], 0.0);

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_daily_total_without_target() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    add_entry(&app, &user.token, chicken(2.0)).await;
    let totals = daily_total(&app, &user.token, DAY).await;

    assert_eq!(totals["total_calories"], 330.0);
    assert!(totals["target_calories"].is_null());
    assert!(totals["remaining_calories"].is_null());
    assert_eq!(totals["progress_percent"], 0.0);

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_weekly_progress_window() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    for date in ["2024-02-22", "2024-02-23", "2024-03-01", "2024-03-02"] {
        let mut body = apple(1.0);
        body["date"] = json!(date);
        add_entry(&app, &user.token, body).await;
    }

    let (status, response) = app
        .get_auth("/api/food/weekly-progress?end=2024-03-01", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let points: Vec<Value> = serde_json::from_str(&response).unwrap();
    assert_eq!(points.len(), 8);
    assert_eq!(points[0]["date"], "2024-02-23");
    assert_eq!(points[0]["total_calories"], 95.0);
    assert_eq!(points[1]["total_calories"], 0.0);
    assert_eq!(points[7]["date"], "2024-03-01");
    assert_eq!(points[7]["total_calories"], 95.0);

    app.cleanup_user(&user).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_writes_keep_totals_consistent() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let user_id = Uuid::parse_str(&user.id).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    let mut adds = JoinSet::new();
    for i in 0..20 {
        let pool = app.pool.clone();
        adds.spawn(async move {
            let req = CreateFoodEntryRequest {
                food_name: format!("Snack {}", i),
                calories: 100.0,
                protein: Some(1.0),
                carbs: None,
                fat: None,
                serving_size: None,
                quantity: 1.0,
                date,
            };
            FoodLogService::add_entry(&pool, user_id, req).await
        });
    }
    let mut entry_ids = Vec::new();
    while let Some(result) = adds.join_next().await {
        entry_ids.push(Uuid::parse_str(&result.unwrap().unwrap().entry_id).unwrap());
    }

    let totals = daily_total(&app, &user.token, DAY).await;
    assert_eq!(totals["total_calories"], 2000.0);
    assert_eq!(totals["total_protein"], 20.0);

    let mut deletes = JoinSet::new();
    for entry_id in entry_ids.into_iter().take(10) {
        let pool = app.pool.clone();
        deletes.spawn(async move { FoodLogService::delete_entry(&pool, user_id, entry_id).await });
    }
    while let Some(result) = deletes.join_next().await {
        result.unwrap().unwrap();
    }

    let totals = daily_total(&app, &user.token, DAY).await;
    assert_eq!(totals["total_calories"], 1000.0);
    assert_eq!(totals["total_protein"], 10.0);

    app.cleanup_user(&user).await;
}
