mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

fn registration() -> serde_json::Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "0712345678",
        "password": "correct horse"
    })
}

#[tokio::test]
async fn test_register_login_profile() {
    let app = TestApp::new().await;

    let res = app.post("/customer/add", registration()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["message"], "New customer added successfully");
    assert_eq!(body["customer"]["email"], "jane@example.com");
    assert!(body["customer"].get("passwordHash").is_none());

    let res = app.post("/customer/login", json!({"email": "jane@example.com", "password": "correct horse"})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["name"], "Jane Doe");

    app.post("/tableReservation/add", json!({
        "customerName": "Jane Doe",
        "email": "jane@example.com",
        "phoneNumber": "0712345678",
        "numberOfGuests": 2,
        "tableNo": "4",
        "date": "2024-06-01",
        "timeFrom": "19:00",
        "timeTo": "20:30"
    })).await;

    let res = app.get("/customer/profile/jane@example.com").await;
    assert_eq!(res.status(), StatusCode::OK);
    let profile = parse_body(res).await;
    assert_eq!(profile["customer"]["name"], "Jane Doe");
    assert_eq!(profile["tableReservations"].as_array().unwrap().len(), 1);
    assert!(profile["outdoorReservations"].as_array().unwrap().is_empty());
    assert!(profile["roomReservations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_credentials() {
    let app = TestApp::new().await;
    app.post("/customer/add", registration()).await;

    let res = app.post("/customer/login", json!({"email": "jane@example.com", "password": "wrong"})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse_body(res).await["error"], "Invalid email or password");

    let res = app.post("/customer/login", json!({"email": "nobody@example.com", "password": "correct horse"})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_registration_rules() {
    let app = TestApp::new().await;

    let res = app.post("/customer/add", json!({"name": "Jane Doe", "email": "jane@example.com"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "All fields are required");

    assert_eq!(app.post("/customer/add", registration()).await.status(), StatusCode::CREATED);
    assert_eq!(app.post("/customer/add", registration()).await.status(), StatusCode::CONFLICT);

    let res = app.get("/customer/profile/nobody@example.com").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new().await;
    app.post("/customer/add", registration()).await;

    let res = app.post("/customer/login", json!({"email": "jane@example.com"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Email and password are required");

    let res = app.post("/admin/login", json!({"password": "anything"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["error"], "Email and password are required");
}

#[tokio::test]
async fn test_numeric_phone_registers() {
    let app = TestApp::new().await;

    let res = app.post("/customer/add", json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": 712345678,
        "password": "correct horse"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}
