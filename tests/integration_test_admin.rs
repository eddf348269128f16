mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{parse_body, TestApp, ADMIN_EMAIL};
use serde_json::json;
use tower::ServiceExt;

async fn dashboard(app: &TestApp, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri("/admin/dashboard");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("access_token={}", token));
    }
    app.router.clone().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let res = app.get("/health").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "ok");
}

#[tokio::test]
async fn test_dashboard_requires_admin_cookie() {
    let app = TestApp::new().await;

    assert_eq!(dashboard(&app, None).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(dashboard(&app, Some("not-a-jwt")).await.status(), StatusCode::UNAUTHORIZED);

    let res = app.post("/admin/login", json!({"email": ADMIN_EMAIL, "password": "guess"})).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = TestApp::new().await;

    app.post("/outdoorReservation/add", json!({
        "customerName": "Garden Party",
        "email": "party@example.com",
        "phoneNumber": "0712345678",
        "numberOfGuests": 30,
        "eventType": "Birthday",
        "date": "2024-07-04",
        "timeFrom": "12:00",
        "timeTo": "16:00"
    })).await;
    for (table_no, from, to) in [("1", "12:00", "13:00"), ("2", "12:00", "13:00")] {
        app.post("/tableReservation/add", json!({
            "customerName": "Ann Lee",
            "email": "ann@example.com",
            "phoneNumber": "0712345678",
            "numberOfGuests": 2,
            "tableNo": table_no,
            "date": "2024-07-04",
            "timeFrom": from,
            "timeTo": to
        })).await;
    }

    let token = app.login_admin().await;
    let res = dashboard(&app, Some(&token)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["outdoorReservations"], 1);
    assert_eq!(body["tableReservations"], 2);
    assert_eq!(body["roomReservations"], 0);
    assert_eq!(body["total"], 3);
}
