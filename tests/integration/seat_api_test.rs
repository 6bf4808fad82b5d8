//! Integration tests for the seat reservation endpoints.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_lock_confirm_flow() {
    let app = TestApp::new();

    let token = app.lock(&["A1", "A2"], 60).await;
    assert_eq!(app.seat_status("A1").await, "claimed");

    let response = app
        .request(
            "POST",
            "/api/seats/confirm",
            Some(json!({ "token": token, "seatIds": ["A1", "A2"] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["confirmedResources"], json!(["A1", "A2"]));
    assert_eq!(app.seat_status("A1").await, "confirmed");
    assert_eq!(app.seat_status("A2").await, "confirmed");
}

#[tokio::test]
async fn test_lock_response_shape() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/seats/lock",
            Some(json!({ "seatIds": ["B2"], "ttlSeconds": 30 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["seatIds"], json!(["B2"]));
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(response.body["expiresAt"].is_string());
}

#[tokio::test]
async fn test_resource_ids_alias_is_accepted() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/seats/lock",
            Some(json!({ "resourceIds": ["C1"] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.seat_status("C1").await, "claimed");
}

#[tokio::test]
async fn test_overlapping_lock_is_rejected_without_side_effects() {
    let app = TestApp::new();
    app.lock(&["A1", "A2"], 5).await;

    let response = app
        .request(
            "POST",
            "/api/seats/lock",
            Some(json!({ "seatIds": ["A2", "A3"], "ttlSeconds": 5 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["success"], false);
    assert_eq!(
        response.failed_resources(),
        vec![("A2".to_string(), "ACTIVELY_CLAIMED".to_string())]
    );
    assert_eq!(app.seat_status("A3").await, "available");
}

#[tokio::test]
async fn test_rejection_lists_every_failing_seat() {
    let app = TestApp::new();
    let token = app.lock(&["A1"], 60).await;
    app.request(
        "POST",
        "/api/seats/confirm",
        Some(json!({ "token": token, "seatIds": ["A1"] })),
    )
    .await;
    app.lock(&["A2"], 60).await;

    let response = app
        .request(
            "POST",
            "/api/seats/lock",
            Some(json!({ "seatIds": ["A1", "A2", "Z9", "A3"] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.failed_resources(),
        vec![
            ("A1".to_string(), "ALREADY_CONFIRMED".to_string()),
            ("A2".to_string(), "ACTIVELY_CLAIMED".to_string()),
            ("Z9".to_string(), "NOT_FOUND".to_string()),
        ]
    );
    assert_eq!(app.seat_status("A3").await, "available");
}

#[tokio::test]
async fn test_expiry_scenario() {
    let app = TestApp::new();

    let t1 = app.lock(&["A1", "A2"], 5).await;

    let blocked = app
        .request(
            "POST",
            "/api/seats/lock",
            Some(json!({ "seatIds": ["A2", "A3"], "ttlSeconds": 5 })),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert_eq!(app.seat_status("A3").await, "available");

    app.advance(5);

    let t2 = app.lock(&["A2", "A3"], 5).await;
    assert_ne!(t1, t2);

    let response = app
        .request(
            "POST",
            "/api/seats/confirm",
            Some(json!({ "token": t1, "seatIds": ["A1", "A2"] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.failed_resources(),
        vec![
            ("A1".to_string(), "CLAIM_EXPIRED".to_string()),
            ("A2".to_string(), "TOKEN_MISMATCH".to_string()),
        ]
    );
    assert_eq!(app.seat_status("A1").await, "available");
    assert_eq!(app.seat_status("A2").await, "claimed");
}

#[tokio::test]
async fn test_confirm_unclaimed_seat_is_rejected() {
    let app = TestApp::new();
    let token = app.lock(&["A1"], 60).await;

    let response = app
        .request(
            "POST",
            "/api/seats/confirm",
            Some(json!({ "token": token, "seatIds": ["A1", "B1"] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.failed_resources(),
        vec![("B1".to_string(), "NOT_CLAIMED".to_string())]
    );
    assert_eq!(app.seat_status("A1").await, "claimed");
}

#[tokio::test]
async fn test_release_reports_per_seat_outcomes() {
    let app = TestApp::new();
    let mine = app.lock(&["A1", "A2"], 60).await;
    app.lock(&["B1"], 60).await;

    let response = app
        .request(
            "POST",
            "/api/seats/release",
            Some(json!({ "token": mine, "seatIds": ["A1", "B1", "C1", "Q7"] })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["details"],
        json!([
            { "id": "A1", "outcome": "RELEASED" },
            { "id": "B1", "outcome": "TOKEN_MISMATCH" },
            { "id": "C1", "outcome": "NOT_CLAIMED" },
            { "id": "Q7", "outcome": "NOT_FOUND" },
        ])
    );

    assert_eq!(app.seat_status("A1").await, "available");
    assert_eq!(app.seat_status("A2").await, "claimed");
    assert_eq!(app.seat_status("B1").await, "claimed");
}

#[tokio::test]
async fn test_released_seat_can_be_locked_again() {
    let app = TestApp::new();
    let token = app.lock(&["C5"], 60).await;

    app.request(
        "POST",
        "/api/seats/release",
        Some(json!({ "token": token, "seatIds": ["C5"] })),
    )
    .await;

    let again = app.lock(&["C5"], 60).await;
    assert_ne!(again, token);
}

#[tokio::test]
async fn test_empty_seat_list_is_invalid() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/seats/lock", Some(json!({ "seatIds": [] })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_missing_token_is_invalid() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/seats/confirm",
            Some(json!({ "seatIds": ["A1"] })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let blank = app
        .request(
            "POST",
            "/api/seats/release",
            Some(json!({ "token": "", "seatIds": ["A1"] })),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body["error"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_zero_ttl_is_invalid() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/seats/lock",
            Some(json!({ "seatIds": ["A1"], "ttlSeconds": 0 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.seat_status("A1").await, "available");
}

#[tokio::test]
async fn test_too_many_seats_is_invalid() {
    let app = TestApp::new();
    let seats: Vec<String> = ["A", "B", "C"]
        .iter()
        .flat_map(|row| (1..=5).map(move |n| format!("{row}{n}")))
        .collect();

    let response = app
        .request(
            "POST",
            "/api/seats/lock",
            Some(json!({ "seatIds": seats })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.reservations.summary().available, 15);
}

#[tokio::test]
async fn test_malformed_json_is_invalid() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/seats/lock", Some(json!({ "seatIds": "A1" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_unknown_seat_returns_404() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/seats/Z99", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_seats_in_layout_order() {
    let app = TestApp::new();
    app.lock(&["B3"], 60).await;

    let response = app.request("GET", "/api/seats", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let seats = response.body["data"].as_array().expect("seat list");
    assert_eq!(seats.len(), 15);
    assert_eq!(seats[0]["id"], "A1");
    assert_eq!(seats[14]["id"], "C5");

    let b3 = seats.iter().find(|s| s["id"] == "B3").expect("B3 listed");
    assert_eq!(b3["status"], "claimed");
    assert!(b3["claimExpiresAt"].is_string());
}

#[tokio::test]
async fn test_summary_reflects_lazy_expiry() {
    let app = TestApp::new();
    let token = app.lock(&["A1"], 60).await;
    app.request(
        "POST",
        "/api/seats/confirm",
        Some(json!({ "token": token, "seatIds": ["A1"] })),
    )
    .await;
    app.lock(&["A2", "A3"], 10).await;

    let before = app.request("GET", "/api/seats/summary", None).await;
    assert_eq!(before.status, StatusCode::OK);
    assert_eq!(
        before.body["data"],
        json!({ "total": 15, "available": 12, "claimed": 2, "confirmed": 1 })
    );

    app.advance(10);

    let after = app.request("GET", "/api/seats/summary", None).await;
    assert_eq!(
        after.body["data"],
        json!({ "total": 15, "available": 14, "claimed": 0, "confirmed": 1 })
    );
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].is_string());
}
