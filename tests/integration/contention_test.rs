//! Concurrent lock requests through the HTTP router.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_locks_have_single_winner() {
    let app = std::sync::Arc::new(TestApp::new());

    let requests = [
        vec!["A1", "A2", "A3"],
        vec!["A3", "A4"],
        vec!["A2", "A4", "B1"],
        vec!["A1", "A4"],
    ];

    let mut handles = Vec::new();
    for seats in requests {
        let app = std::sync::Arc::clone(&app);
        handles.push(tokio::spawn(async move {
            app.request(
                "POST",
                "/api/seats/lock",
                Some(json!({ "seatIds": seats, "ttlSeconds": 60 })),
            )
            .await
        }));
    }

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.expect("lock task panicked").status);
    }

    let winners = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let losers = statuses
        .iter()
        .filter(|s| **s == StatusCode::CONFLICT)
        .count();
    assert_eq!(winners, 1, "statuses: {statuses:?}");
    assert_eq!(losers, 3, "statuses: {statuses:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_disjoint_locks_all_succeed() {
    let app = std::sync::Arc::new(TestApp::new());

    let mut handles = Vec::new();
    for row in ["A", "B", "C"] {
        let app = std::sync::Arc::clone(&app);
        handles.push(tokio::spawn(async move {
            let seats: Vec<String> = (1..=5).map(|n| format!("{row}{n}")).collect();
            app.request(
                "POST",
                "/api/seats/lock",
                Some(json!({ "seatIds": seats })),
            )
            .await
        }));
    }

    for handle in handles {
        let response = handle.await.expect("lock task panicked");
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    let summary = app.reservations.summary();
    assert_eq!(summary.claimed, 15);
    assert_eq!(summary.available, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_confirm_races_with_relock_after_expiry() {
    let app = std::sync::Arc::new(TestApp::new());
    let token = app.lock(&["C1", "C2"], 5).await;
    app.advance(5);

    let confirm = {
        let app = std::sync::Arc::clone(&app);
        let token = token.clone();
        tokio::spawn(async move {
            app.request(
                "POST",
                "/api/seats/confirm",
                Some(json!({ "token": token, "seatIds": ["C1", "C2"] })),
            )
            .await
        })
    };
    let relock = {
        let app = std::sync::Arc::clone(&app);
        tokio::spawn(async move {
            app.request(
                "POST",
                "/api/seats/lock",
                Some(json!({ "seatIds": ["C2"] })),
            )
            .await
        })
    };

    let confirm = confirm.await.expect("confirm task panicked");
    let relock = relock.await.expect("lock task panicked");

    // The expired claim can never be confirmed, whichever request ran first.
    assert_eq!(confirm.status, StatusCode::CONFLICT);
    assert_eq!(relock.status, StatusCode::OK);
    assert_eq!(app.seat_status("C1").await, "available");
    assert_eq!(app.seat_status("C2").await, "claimed");
}
